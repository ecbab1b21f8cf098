use axum::{
    Router, middleware,
    routing::{get, put},
};

use super::controller::{list_class_attendances, update_attendance};
use crate::middleware::auth::require_session;
use crate::middleware::role::require_lecturer;
use crate::state::AppState;

pub fn init_attendance_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/lecturer/classes/{id}/attendances",
            get(list_class_attendances),
        )
        .route("/lecturer/attendances/{id}", put(update_attendance))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_lecturer))
}
