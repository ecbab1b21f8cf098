use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::controller::{
    admin_login, admin_me, admin_password_update, lecturer_login, lecturer_password_update,
    logout, student_login, student_password_update,
};
use crate::middleware::auth::require_session;
use crate::middleware::basic::require_basic_auth;
use crate::middleware::role::{require_admin, require_lecturer, require_student};
use crate::state::AppState;

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/admin/login", post(admin_login))
        .route("/lecturer/login", post(lecturer_login))
        .route("/student/login", post(student_login));

    let any_session = Router::new()
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let admin = Router::new()
        .route("/admin/password-update", put(admin_password_update))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let lecturer = Router::new()
        .route("/lecturer/password-update", put(lecturer_password_update))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_lecturer));

    let student = Router::new()
        .route("/student/password-update", put(student_password_update))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_student));

    let basic = Router::new()
        .route("/admin/me", get(admin_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_basic_auth));

    public
        .merge(any_session)
        .merge(admin)
        .merge(lecturer)
        .merge(student)
        .merge(basic)
}
