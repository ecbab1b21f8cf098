use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use registrar_core::{AppError, verify_password};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// HTTP basic authentication against the admin table.
///
/// The password hash is verified on every request. This path does not touch
/// the session store.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = req
        .headers()
        .typed_get::<Authorization<Basic>>()
        .ok_or_else(|| AppError::unauthorized(anyhow!("Unauthorized")))?;

    let admin = state
        .store
        .find_admin_by_username(credentials.username())
        .await
        .map_err(|e| AppError::internal(e).tagged("middleware/basic", "BasicAuth/FindAdmin"))?
        .ok_or_else(|| AppError::unauthorized(anyhow!("Unauthorized")))?;

    if !verify_password(credentials.password(), &admin.password)? {
        return Err(AppError::unauthorized(anyhow!("Unauthorized")));
    }

    req.extensions_mut().insert(CurrentUser {
        user_id: admin.id.into_inner(),
    });

    Ok(next.run(req).await)
}
