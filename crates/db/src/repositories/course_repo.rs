//! Repository for the `courses` table.

use registra_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CreateCourse, UpdateCourse};

const COLUMNS: &str = "id, program_id, code, name, years, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (program_id, code, name, years)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(input.program_id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.years)
            .fetch_one(pool)
            .await
    }

    /// Find a course by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses, optionally filtered by program.
    pub async fn list(pool: &PgPool, program_id: Option<DbId>) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE ($1::bigint IS NULL OR program_id = $1)
             ORDER BY code ASC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(program_id)
            .fetch_all(pool)
            .await
    }

    /// Update a course's mutable fields, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                name = COALESCE($2, name),
                years = COALESCE($3, years),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.years)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
