use dotenvy::dotenv;
use registrar::logging::init_logging;
use registrar::metrics::{init_metrics, metrics_router};
use registrar::router::init_router;
use registrar::state::init_app_state;
use registrar_config::ServerConfig;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let server_config = ServerConfig::from_env();
    let state = init_app_state(&server_config).await?;
    let mut app = init_router(state);

    if server_config.metrics_enabled {
        match init_metrics() {
            Ok(handle) => app = app.merge(metrics_router(handle)),
            Err(err) => warn!(error = %err, "Prometheus recorder not installed; metrics disabled"),
        }
    }

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "Server listening");
    info!("Swagger UI available at http://{address}/swagger-ui");

    axum::serve(listener, app).await?;
    Ok(())
}
