use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use registrar_auth::Role;
use registrar_core::AppError;

use crate::middleware::auth::resolve_session;
use crate::state::AppState;

/// Re-resolves the request's session and rejects it with 403 unless its role
/// is in `allowed_roles`. An invalid session is still a 401.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (_, session) =
        resolve_session(&state.sessions, req.headers(), "RequireRoles/Resolve").await?;

    if !allowed_roles.contains(&session.role) {
        return Err(AppError::forbidden(anyhow!("Forbidden")));
    }

    Ok(next.run(req).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[Role::Admin])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_lecturer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[Role::Lecturer])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[Role::Student])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_admin_or_lecturer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    require_roles(State(state), req, next, &[Role::Admin, Role::Lecturer])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}
