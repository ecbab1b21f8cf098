//! Seeding configuration and the rows it generates.

use chrono::{DateTime, Duration, Utc};
use registrar_models::{IntakeId, LecturerId, ProgramId, SessionOfferingId};

/// Password given to every seeded lecturer and student.
pub const SEED_PASSWORD: &str = "password123";

/// A student row before insertion. `password_hash` is shared by the batch.
pub struct StudentSeed {
    pub student_code: String,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub students: usize,
    /// Days from now until the seeded intake starts. Enrollment is open when
    /// this is between 1 and 5.
    pub opens_in_days: i64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: 20,
            opens_in_days: 3,
        }
    }
}

impl SeedConfig {
    pub fn new(students: usize) -> Self {
        Self {
            students,
            ..Default::default()
        }
    }

    pub fn with_opens_in_days(mut self, days: i64) -> Self {
        self.opens_in_days = days;
        self
    }

    pub fn intake_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(self.opens_in_days)
    }
}

/// What a seed run created, for printing.
#[derive(Debug)]
pub struct SeedSummary {
    pub program_id: ProgramId,
    pub intake_id: IntakeId,
    pub lecturer_id: LecturerId,
    pub lecturer_email: String,
    pub session_offering_id: SessionOfferingId,
    pub student_codes: Vec<String>,
}
