use axum::{
    Json,
    extract::State,
};
use registrar_core::{AppError, Envelope, PaginationParams};
use registrar_models::{
    EnrollmentId, LecturerId, ResultId, ResultRecord, StudentId, UpdateResultDto,
};
use tracing::instrument;
use uuid::Uuid;

use super::service::ResultService;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    get,
    path = "/api/v1/results/{id}",
    params(("id" = Uuid, Path, description = "Result ID")),
    responses(
        (status = 200, description = "Result", body = Envelope<ResultRecord>),
        (status = 401, description = "Missing or expired session"),
        (status = 404, description = "Result not found")
    ),
    tag = "Results",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn get_result(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<ResultId>,
) -> Result<Json<Envelope<ResultRecord>>, AppError> {
    let result = ResultService::get_result(state.store.as_ref(), id).await?;
    Ok(Json(Envelope::ok(result)))
}

/// Record marks for a result; the grade is derived from them
#[utoipa::path(
    put,
    path = "/api/v1/results/{id}",
    params(("id" = Uuid, Path, description = "Result ID")),
    request_body = UpdateResultDto,
    responses(
        (status = 200, description = "Result updated", body = Envelope<ResultRecord>),
        (status = 400, description = "Marks outside 0..=100"),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not an admin or lecturer session"),
        (status = 404, description = "Result not found")
    ),
    tag = "Results",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn update_result(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<ResultId>,
    ValidatedJson(dto): ValidatedJson<UpdateResultDto>,
) -> Result<Json<Envelope<ResultRecord>>, AppError> {
    let result =
        ResultService::update_marks(state.store.as_ref(), id, dto.marks, user.user_id).await?;
    Ok(Json(Envelope::ok(result)))
}

#[utoipa::path(
    get,
    path = "/api/v1/student/results",
    params(PaginationParams),
    responses(
        (status = 200, description = "The calling student's active results", body = Envelope<Vec<ResultRecord>>),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a student session")
    ),
    tag = "Results",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn list_my_results(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedQuery(page): ValidatedQuery<PaginationParams>,
) -> Result<Json<Envelope<Vec<ResultRecord>>>, AppError> {
    let results =
        ResultService::list_for_student(state.store.as_ref(), StudentId::from(user.user_id), &page)
            .await?;
    Ok(Json(Envelope::ok(results)))
}

#[utoipa::path(
    get,
    path = "/api/v1/lecturer/student-enrolls/{id}/results",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Active results of the enrollment", body = Envelope<Vec<ResultRecord>>),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a lecturer session, or not their offering"),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "Results",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn list_enrollment_results(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<EnrollmentId>,
) -> Result<Json<Envelope<Vec<ResultRecord>>>, AppError> {
    let results =
        ResultService::list_for_enrollment(state.store.as_ref(), LecturerId::from(user.user_id), id)
            .await?;
    Ok(Json(Envelope::ok(results)))
}
