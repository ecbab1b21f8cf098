use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use registrar_core::{AppError, Envelope, PaginationParams};
use registrar_models::{
    EnrollDto, Enrollment, EnrollmentId, EnrollmentResponse, LecturerId, SessionOfferingId,
    StudentId,
};
use tracing::instrument;
use uuid::Uuid;

use super::service::EnrollmentService;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedPath, ValidatedQuery};

/// Enroll the calling student into a session offering
#[utoipa::path(
    post,
    path = "/api/v1/student-enrolls",
    request_body = EnrollDto,
    responses(
        (status = 201, description = "Enrolled", body = Envelope<EnrollmentResponse>),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a student session"),
        (status = 500, description = "Already enrolled, outside the enrollment window, or another program")
    ),
    tag = "Enrollments",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn enroll(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(dto): JsonBody<EnrollDto>,
) -> Result<(StatusCode, Json<Envelope<EnrollmentResponse>>), AppError> {
    let response = EnrollmentService::enroll(
        state.store.as_ref(),
        StudentId::from(user.user_id),
        dto.session_id,
        Utc::now(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(response))))
}

/// Withdraw an enrollment and its results
#[utoipa::path(
    delete,
    path = "/api/v1/student-enrolls/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Withdrawn"),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not an admin session"),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "Enrollments",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn withdraw(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<EnrollmentId>,
) -> Result<Json<Envelope<()>>, AppError> {
    EnrollmentService::withdraw(state.store.as_ref(), id, user.user_id).await?;
    Ok(Json(Envelope::ok(())))
}

#[utoipa::path(
    get,
    path = "/api/v1/student-enrolls/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment", body = Envelope<EnrollmentResponse>),
        (status = 401, description = "Missing or expired session"),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "Enrollments",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn get_enrollment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<EnrollmentId>,
) -> Result<Json<Envelope<EnrollmentResponse>>, AppError> {
    let response = EnrollmentService::get_enrollment(state.store.as_ref(), id).await?;
    Ok(Json(Envelope::ok(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/student/student-enrolls",
    params(PaginationParams),
    responses(
        (status = 200, description = "The calling student's active enrollments", body = Envelope<Vec<Enrollment>>),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a student session")
    ),
    tag = "Enrollments",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn list_my_enrollments(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedQuery(page): ValidatedQuery<PaginationParams>,
) -> Result<Json<Envelope<Vec<Enrollment>>>, AppError> {
    let enrollments =
        EnrollmentService::list_for_student(state.store.as_ref(), StudentId::from(user.user_id), &page)
            .await?;
    Ok(Json(Envelope::ok(enrollments)))
}

#[utoipa::path(
    get,
    path = "/api/v1/lecturer/sessions/{id}/student-enrolls",
    params(("id" = Uuid, Path, description = "Session offering ID"), PaginationParams),
    responses(
        (status = 200, description = "Active enrollments of the offering", body = Envelope<Vec<Enrollment>>),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a lecturer session, or not their offering"),
        (status = 404, description = "Session not found")
    ),
    tag = "Enrollments",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn list_offering_enrollments(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<SessionOfferingId>,
    ValidatedQuery(page): ValidatedQuery<PaginationParams>,
) -> Result<Json<Envelope<Vec<Enrollment>>>, AppError> {
    let enrollments = EnrollmentService::list_for_offering(
        state.store.as_ref(),
        LecturerId::from(user.user_id),
        id,
        &page,
    )
    .await?;
    Ok(Json(Envelope::ok(enrollments)))
}
