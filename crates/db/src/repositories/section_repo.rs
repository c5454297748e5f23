//! Repository for the `sections` table.

use registra_core::types::DbId;
use sqlx::PgPool;

use crate::models::section::{CreateSection, Section, UpdateSection};

const COLUMNS: &str = "id, course_id, name, year_level, capacity, created_at, updated_at";

/// Provides CRUD operations for class sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSection) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections (course_id, name, year_level, capacity)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(input.course_id)
            .bind(&input.name)
            .bind(input.year_level)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    /// Find a section by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sections, optionally filtered by course.
    pub async fn list(pool: &PgPool, course_id: Option<DbId>) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sections
             WHERE ($1::bigint IS NULL OR course_id = $1)
             ORDER BY year_level ASC, name ASC"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Update a section's mutable fields, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSection,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET
                name = COALESCE($2, name),
                year_level = COALESCE($3, year_level),
                capacity = COALESCE($4, capacity),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.year_level)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a section. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
