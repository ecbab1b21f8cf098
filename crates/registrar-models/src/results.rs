use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::ids::{EnrollmentId, ResultId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "grade")]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Letter grade for a mark. Bands are inclusive at their lower bound;
    /// anything outside `0..=100` falls through to `F`.
    pub fn from_marks(marks: i32) -> Self {
        match marks {
            75..=100 => Grade::A,
            60..=74 => Grade::B,
            47..=59 => Grade::C,
            40..=46 => Grade::D,
            _ => Grade::F,
        }
    }
}

/// The result placeholder owned by an enrollment. `marks` and `grade` stay
/// empty until a lecturer or admin records them.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ResultRecord {
    pub id: ResultId,
    pub enrollment_id: EnrollmentId,
    pub marks: Option<i32>,
    pub grade: Option<Grade>,
    pub is_delete: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateResultDto {
    #[validate(range(min = 0, max = 100, message = "marks must be between 0 and 100"))]
    pub marks: i32,
}
