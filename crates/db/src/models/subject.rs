use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub code: String,
    pub title: String,
    pub units: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubject {
    pub code: String,
    pub title: String,
    #[serde(default = "default_units")]
    pub units: i16,
}

fn default_units() -> i16 {
    3
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubject {
    pub title: Option<String>,
    pub units: Option<i16>,
}
