use axum::{
    Json,
    extract::State,
};
use registrar_core::{AppError, Envelope};
use registrar_models::{Attendance, AttendanceId, ClassMeetingId, LecturerId, UpdateAttendanceDto};
use tracing::instrument;
use uuid::Uuid;

use super::service::AttendanceService;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedPath};

#[utoipa::path(
    get,
    path = "/api/v1/lecturer/classes/{id}/attendances",
    params(("id" = Uuid, Path, description = "Class meeting ID")),
    responses(
        (status = 200, description = "Attendance sheet", body = Envelope<Vec<Attendance>>),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a lecturer session, or not their offering"),
        (status = 404, description = "Class not found")
    ),
    tag = "Attendance",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn list_class_attendances(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<ClassMeetingId>,
) -> Result<Json<Envelope<Vec<Attendance>>>, AppError> {
    let sheet =
        AttendanceService::list_for_class(state.store.as_ref(), LecturerId::from(user.user_id), id)
            .await?;
    Ok(Json(Envelope::ok(sheet)))
}

/// Mark a student present or absent
#[utoipa::path(
    put,
    path = "/api/v1/lecturer/attendances/{id}",
    params(("id" = Uuid, Path, description = "Attendance ID")),
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Attendance updated", body = Envelope<Attendance>),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or expired session"),
        (status = 403, description = "Not a lecturer session, or not their offering"),
        (status = 404, description = "Attendance not found")
    ),
    tag = "Attendance",
    security(("session" = []))
)]
#[instrument(skip(state))]
pub async fn update_attendance(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedPath(id): ValidatedPath<AttendanceId>,
    JsonBody(dto): JsonBody<UpdateAttendanceDto>,
) -> Result<Json<Envelope<Attendance>>, AppError> {
    let attendance = AttendanceService::mark(
        state.store.as_ref(),
        LecturerId::from(user.user_id),
        id,
        dto.attended,
    )
    .await?;
    Ok(Json(Envelope::ok(attendance)))
}
