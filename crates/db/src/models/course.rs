use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub program_id: DbId,
    pub code: String,
    pub name: String,
    pub years: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub program_id: DbId,
    pub code: String,
    pub name: String,
    #[serde(default = "default_years")]
    pub years: i16,
}

fn default_years() -> i16 {
    4
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub years: Option<i16>,
}
