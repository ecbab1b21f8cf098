//! Principals that can log in: admins, lecturers and students.
//!
//! Password hashes are loaded from the store but never serialized.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{AdminId, IntakeId, LecturerId, ProgramId, StudentId};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Admin {
    pub id: AdminId,
    pub username: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Lecturer {
    pub id: LecturerId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub program_id: ProgramId,
    pub intake_id: IntakeId,
    pub student_code: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
