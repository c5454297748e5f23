use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub course_id: DbId,
    pub name: String,
    pub year_level: i16,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSection {
    pub course_id: DbId,
    pub name: String,
    pub year_level: i16,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
}

fn default_capacity() -> i32 {
    40
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSection {
    pub name: Option<String>,
    pub year_level: Option<i16>,
    pub capacity: Option<i32>,
}
