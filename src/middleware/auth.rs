use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use registrar_auth::{SessionData, SessionError, SessionManager};
use registrar_core::AppError;
use uuid::Uuid;

use crate::state::AppState;

/// The authenticated principal, placed in request extensions by
/// [`require_session`] or the basic-auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Uuid,
}

/// The raw session key of the current request.
#[derive(Debug, Clone)]
pub struct SessionKey(pub String);

pub(crate) fn unauthorized() -> AppError {
    AppError::unauthorized(anyhow!("Unauthorized"))
}

pub(crate) fn session_key(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Resolves the session carried by the request headers.
///
/// 401 when the header is missing or the session is unknown or expired;
/// 500 when the session store cannot be read.
pub(crate) async fn resolve_session(
    sessions: &SessionManager,
    headers: &HeaderMap,
    operation: &str,
) -> Result<(String, SessionData), AppError> {
    let key = session_key(headers, sessions.header_name()).ok_or_else(unauthorized)?;

    match sessions.resolve(&key).await {
        Ok(session) => Ok((key, session)),
        Err(SessionError::NotFound) => Err(unauthorized()),
        Err(err) => Err(AppError::internal(err).tagged("middleware/auth", operation)),
    }
}

pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (key, session) =
        resolve_session(&state.sessions, req.headers(), "RequireSession/Resolve").await?;

    req.extensions_mut().insert(CurrentUser {
        user_id: session.user_id,
    });
    req.extensions_mut().insert(SessionKey(key));

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(unauthorized)
    }
}

impl<S> FromRequestParts<S> for SessionKey
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionKey>()
            .cloned()
            .ok_or_else(unauthorized)
    }
}
