use axum::{
    Router, middleware,
    routing::{get, put},
};

use super::controller::{get_result, list_enrollment_results, list_my_results, update_result};
use crate::middleware::auth::require_session;
use crate::middleware::role::{require_admin_or_lecturer, require_lecturer, require_student};
use crate::state::AppState;

pub fn init_results_router(state: &AppState) -> Router<AppState> {
    let any_session = Router::new()
        .route("/results/{id}", get(get_result))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let staff = Router::new()
        .route("/results/{id}", put(update_result))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_or_lecturer,
        ));

    let student = Router::new()
        .route("/student/results", get(list_my_results))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_student));

    let lecturer = Router::new()
        .route(
            "/lecturer/student-enrolls/{id}/results",
            get(list_enrollment_results),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_lecturer));

    any_session.merge(staff).merge(student).merge(lecturer)
}
