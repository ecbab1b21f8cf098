use axum::Json;
use axum::extract::State;
use registrar_core::{AppError, Envelope};
use registrar_db::Account;
use registrar_models::auth::{
    AdminLoginDto, AdminLoginResponse, LecturerLoginDto, LecturerLoginResponse, MessageResponse,
    PasswordUpdateDto, StudentLoginDto, StudentLoginResponse,
};
use registrar_models::{Admin, AdminId, LecturerId, StudentId};
use tracing::instrument;

use super::service::AuthService;
use crate::middleware::auth::{CurrentUser, SessionKey};
use crate::state::AppState;
use crate::utils::errors::store_failure;
use crate::validator::ValidatedJson;

/// Log in as an admin
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = AdminLoginDto,
    responses(
        (status = 200, description = "Session created", body = Envelope<AdminLoginResponse>),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Incorrect username or password")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AdminLoginDto>,
) -> Result<Json<Envelope<AdminLoginResponse>>, AppError> {
    let response = AuthService::login_admin(state.store.as_ref(), &state.sessions, dto).await?;
    Ok(Json(Envelope::ok(response)))
}

/// Log in as a lecturer
#[utoipa::path(
    post,
    path = "/api/v1/lecturer/login",
    request_body = LecturerLoginDto,
    responses(
        (status = 200, description = "Session created", body = Envelope<LecturerLoginResponse>),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Incorrect email or password")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn lecturer_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LecturerLoginDto>,
) -> Result<Json<Envelope<LecturerLoginResponse>>, AppError> {
    let response = AuthService::login_lecturer(state.store.as_ref(), &state.sessions, dto).await?;
    Ok(Json(Envelope::ok(response)))
}

/// Log in as a student
#[utoipa::path(
    post,
    path = "/api/v1/student/login",
    request_body = StudentLoginDto,
    responses(
        (status = 200, description = "Session created", body = Envelope<StudentLoginResponse>),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Incorrect student code or password")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn student_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<StudentLoginDto>,
) -> Result<Json<Envelope<StudentLoginResponse>>, AppError> {
    let response = AuthService::login_student(state.store.as_ref(), &state.sessions, dto).await?;
    Ok(Json(Envelope::ok(response)))
}

/// Revoke the current session
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Session revoked", body = Envelope<MessageResponse>),
        (status = 401, description = "Missing or expired session")
    ),
    tag = "Authentication",
    security(("session" = []))
)]
#[instrument(skip(state, session_key))]
pub async fn logout(
    State(state): State<AppState>,
    session_key: SessionKey,
) -> Result<Json<Envelope<MessageResponse>>, AppError> {
    let response = AuthService::logout(&state.sessions, &session_key.0).await?;
    Ok(Json(Envelope::ok(response)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/password-update",
    request_body = PasswordUpdateDto,
    responses(
        (status = 200, description = "Password changed", body = Envelope<MessageResponse>),
        (status = 400, description = "Current password incorrect or new password rejected"),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not an admin session")
    ),
    tag = "Authentication",
    security(("session" = []))
)]
#[instrument(skip(state, dto))]
pub async fn admin_password_update(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<PasswordUpdateDto>,
) -> Result<Json<Envelope<MessageResponse>>, AppError> {
    let account = Account::Admin(AdminId::from(user.user_id));
    let response = AuthService::update_password(state.store.as_ref(), account, dto).await?;
    Ok(Json(Envelope::ok(response)))
}

#[utoipa::path(
    put,
    path = "/api/v1/lecturer/password-update",
    request_body = PasswordUpdateDto,
    responses(
        (status = 200, description = "Password changed", body = Envelope<MessageResponse>),
        (status = 400, description = "Current password incorrect or new password rejected"),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a lecturer session")
    ),
    tag = "Authentication",
    security(("session" = []))
)]
#[instrument(skip(state, dto))]
pub async fn lecturer_password_update(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<PasswordUpdateDto>,
) -> Result<Json<Envelope<MessageResponse>>, AppError> {
    let account = Account::Lecturer(LecturerId::from(user.user_id));
    let response = AuthService::update_password(state.store.as_ref(), account, dto).await?;
    Ok(Json(Envelope::ok(response)))
}

#[utoipa::path(
    put,
    path = "/api/v1/student/password-update",
    request_body = PasswordUpdateDto,
    responses(
        (status = 200, description = "Password changed", body = Envelope<MessageResponse>),
        (status = 400, description = "Current password incorrect or new password rejected"),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a student session")
    ),
    tag = "Authentication",
    security(("session" = []))
)]
#[instrument(skip(state, dto))]
pub async fn student_password_update(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<PasswordUpdateDto>,
) -> Result<Json<Envelope<MessageResponse>>, AppError> {
    let account = Account::Student(StudentId::from(user.user_id));
    let response = AuthService::update_password(state.store.as_ref(), account, dto).await?;
    Ok(Json(Envelope::ok(response)))
}

/// The admin authenticated with HTTP basic credentials
#[utoipa::path(
    get,
    path = "/api/v1/admin/me",
    responses(
        (status = 200, description = "Admin profile", body = Envelope<Admin>),
        (status = 401, description = "Missing or incorrect basic credentials")
    ),
    tag = "Authentication",
    security(("basic_auth" = []))
)]
#[instrument(skip(state))]
pub async fn admin_me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Envelope<Admin>>, AppError> {
    let admin = state
        .store
        .get_admin(AdminId::from(user.user_id))
        .await
        .map_err(|e| store_failure(e, "Admin not found", "module/auth", "Me/GetOneAdmin"))?;
    Ok(Json(Envelope::ok(admin)))
}
