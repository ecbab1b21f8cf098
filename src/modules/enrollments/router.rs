use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::controller::{
    enroll, get_enrollment, list_my_enrollments, list_offering_enrollments, withdraw,
};
use crate::middleware::auth::require_session;
use crate::middleware::role::{require_admin, require_lecturer, require_student};
use crate::state::AppState;

pub fn init_enrollments_router(state: &AppState) -> Router<AppState> {
    let any_session = Router::new()
        .route("/student-enrolls/{id}", get(get_enrollment))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let admin = Router::new()
        .route("/student-enrolls/{id}", delete(withdraw))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let student = Router::new()
        .route("/student-enrolls", post(enroll))
        .route("/student/student-enrolls", get(list_my_enrollments))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_student));

    let lecturer = Router::new()
        .route(
            "/lecturer/sessions/{id}/student-enrolls",
            get(list_offering_enrollments),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_lecturer));

    any_session.merge(admin).merge(student).merge(lecturer)
}
