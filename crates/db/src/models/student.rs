//! Student record models.

use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
///
/// `academic_standing` is `regular` until an approved course shift marks the
/// student `irregular`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub user_id: DbId,
    pub student_number: String,
    pub course_id: Option<DbId>,
    pub section_id: Option<DbId>,
    pub academic_standing: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub user_id: DbId,
    pub student_number: String,
    pub course_id: Option<DbId>,
    pub section_id: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudent {
    pub course_id: Option<DbId>,
    pub section_id: Option<DbId>,
}
