use chrono::NaiveTime;
use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `schedules` table: one meeting slot of a section.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub id: DbId,
    pub section_id: DbId,
    pub subject_id: DbId,
    pub instructor_id: Option<DbId>,
    /// ISO weekday, 1 = Monday .. 7 = Sunday.
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchedule {
    pub subject_id: DbId,
    pub instructor_id: Option<DbId>,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: Option<String>,
}
