//! The course catalog an enrollment points into.
//!
//! These records are provisioned by migrations and the CLI seeder; the API
//! only reads them.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{
    ClassroomId, FacultyId, IntakeId, LecturerId, ProgramId, SessionOfferingId, SubjectId,
};

/// Days before an intake starts that enrollment opens.
pub const ENROLLMENT_OPENS_DAYS_BEFORE: i64 = 5;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Program {
    pub id: ProgramId,
    pub faculty_id: FacultyId,
    pub code: String,
    pub name: String,
}

/// An academic term or cohort.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Intake {
    pub id: IntakeId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Intake {
    /// The inclusive `[open, close]` window during which students may enroll
    /// into offerings of this intake: from five days before the start date up
    /// to one second before it.
    pub fn enrollment_window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let open = self.start_date - Duration::days(ENROLLMENT_OPENS_DAYS_BEFORE);
        let close = self.start_date - Duration::seconds(1);
        (open, close)
    }

    pub fn is_enrollment_open(&self, now: DateTime<Utc>) -> bool {
        let (open, close) = self.enrollment_window();
        open <= now && now <= close
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: SubjectId,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Classroom {
    pub id: ClassroomId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SessionOffering {
    pub id: SessionOfferingId,
    pub subject_id: SubjectId,
    pub lecturer_id: LecturerId,
    pub intake_id: IntakeId,
    pub classroom_id: ClassroomId,
    pub program_id: ProgramId,
    pub day: String,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "11:00:00")]
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}
