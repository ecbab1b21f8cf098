use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use registrar_core::{AppError, Envelope, PaginationParams};
use registrar_models::{
    ClassMeeting, ClassMeetingId, ClassResponse, CreateClassDto, LecturerId, SessionOffering,
    SessionOfferingId,
};
use tracing::instrument;
use uuid::Uuid;

use super::service::ClassService;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedPath, ValidatedQuery};

/// Create a class meeting and its attendance sheet
#[utoipa::path(
    post,
    path = "/api/v1/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class meeting created", body = Envelope<ClassResponse>),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not an admin session"),
        (status = 404, description = "Session not found")
    ),
    tag = "Classes",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn create_class(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(dto): JsonBody<CreateClassDto>,
) -> Result<(StatusCode, Json<Envelope<ClassResponse>>), AppError> {
    let response = ClassService::create_class_meeting(
        state.store.as_ref(),
        dto.session_id,
        dto.date,
        user.user_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(response))))
}

#[utoipa::path(
    get,
    path = "/api/v1/classes/{id}",
    params(("id" = Uuid, Path, description = "Class meeting ID")),
    responses(
        (status = 200, description = "Class meeting with its attendance", body = Envelope<ClassResponse>),
        (status = 401, description = "Missing or expired session"),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<ClassMeetingId>,
) -> Result<Json<Envelope<ClassResponse>>, AppError> {
    let response = ClassService::get_class(state.store.as_ref(), id).await?;
    Ok(Json(Envelope::ok(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/lecturer/sessions/{id}/classes",
    params(("id" = Uuid, Path, description = "Session offering ID"), PaginationParams),
    responses(
        (status = 200, description = "Class meetings of the offering", body = Envelope<Vec<ClassMeeting>>),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a lecturer session, or not their offering"),
        (status = 404, description = "Session not found")
    ),
    tag = "Classes",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn list_offering_classes(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<SessionOfferingId>,
    ValidatedQuery(page): ValidatedQuery<PaginationParams>,
) -> Result<Json<Envelope<Vec<ClassMeeting>>>, AppError> {
    let classes = ClassService::list_for_offering(
        state.store.as_ref(),
        LecturerId::from(user.user_id),
        id,
        &page,
    )
    .await?;
    Ok(Json(Envelope::ok(classes)))
}

/// List the session offerings taught by the current lecturer
#[utoipa::path(
    get,
    path = "/api/v1/lecturer/sessions",
    params(PaginationParams),
    responses(
        (status = 200, description = "Offerings taught by the lecturer", body = Envelope<Vec<SessionOffering>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a lecturer session")
    ),
    tag = "Classes",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn list_lecturer_sessions(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedQuery(page): ValidatedQuery<PaginationParams>,
) -> Result<Json<Envelope<Vec<SessionOffering>>>, AppError> {
    let offerings = ClassService::list_lecturer_offerings(
        state.store.as_ref(),
        LecturerId::from(user.user_id),
        &page,
    )
    .await?;
    Ok(Json(Envelope::ok(offerings)))
}
