use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::catalog::SessionOffering;
use crate::ids::{AttendanceId, ClassMeetingId, SessionOfferingId, StudentId};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ClassMeeting {
    pub id: ClassMeetingId,
    pub session_offering_id: SessionOfferingId,
    pub date: NaiveDate,
    pub is_delete: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Attendance {
    pub id: AttendanceId,
    pub class_meeting_id: ClassMeetingId,
    pub student_id: StudentId,
    pub attended: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClassDto {
    pub session_id: SessionOfferingId,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAttendanceDto {
    pub attended: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassResponse {
    #[serde(flatten)]
    pub class: ClassMeeting,
    pub session: SessionOffering,
    pub attendances: Vec<Attendance>,
}
