use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::catalog::SessionOffering;
use crate::ids::{EnrollmentId, SessionOfferingId, StudentId};
use crate::people::Student;

/// A student's claim on a session offering.
///
/// Withdrawal flips `is_delete`; the row is kept for audit.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub session_offering_id: SessionOfferingId,
    pub student_id: StudentId,
    pub is_delete: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn is_active(&self) -> bool {
        !self.is_delete
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollDto {
    pub session_id: SessionOfferingId,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub session: SessionOffering,
    pub student: Student,
}
