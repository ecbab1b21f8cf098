use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{create_class, get_class, list_lecturer_sessions, list_offering_classes};
use crate::middleware::auth::require_session;
use crate::middleware::role::{require_admin, require_lecturer};
use crate::state::AppState;

pub fn init_classes_router(state: &AppState) -> Router<AppState> {
    let any_session = Router::new()
        .route("/classes/{id}", get(get_class))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let admin = Router::new()
        .route("/classes", post(create_class))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let lecturer = Router::new()
        .route("/lecturer/sessions", get(list_lecturer_sessions))
        .route("/lecturer/sessions/{id}/classes", get(list_offering_classes))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_lecturer));

    any_session.merge(admin).merge(lecturer)
}
