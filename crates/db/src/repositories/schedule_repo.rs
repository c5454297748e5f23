//! Repository for the `schedules` table.

use registra_core::types::DbId;
use sqlx::PgPool;

use crate::models::schedule::{CreateSchedule, Schedule};

const COLUMNS: &str = "id, section_id, subject_id, instructor_id, day_of_week, \
    start_time, end_time, room, created_at, updated_at";

/// Provides operations for section meeting schedules.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Insert a new schedule slot for a section, returning the created row.
    pub async fn create(
        pool: &PgPool,
        section_id: DbId,
        input: &CreateSchedule,
    ) -> Result<Schedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO schedules
                (section_id, subject_id, instructor_id, day_of_week, start_time, end_time, room)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(section_id)
            .bind(input.subject_id)
            .bind(input.instructor_id)
            .bind(input.day_of_week)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.room)
            .fetch_one(pool)
            .await
    }

    /// List a section's schedule, ordered by weekday then start time.
    pub async fn list_for_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE section_id = $1
             ORDER BY day_of_week ASC, start_time ASC"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a schedule slot. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
