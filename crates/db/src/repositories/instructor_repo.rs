//! Repository for the `instructors` table.

use registra_core::types::DbId;
use sqlx::PgPool;

use crate::models::instructor::{CreateInstructor, Instructor, UpdateInstructor};

const COLUMNS: &str = "id, user_id, first_name, last_name, email, created_at, updated_at";

/// Provides CRUD operations for instructors.
pub struct InstructorRepo;

impl InstructorRepo {
    /// Insert a new instructor, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInstructor,
    ) -> Result<Instructor, sqlx::Error> {
        let query = format!(
            "INSERT INTO instructors (user_id, first_name, last_name, email)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Instructor>(&query)
            .bind(input.user_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find an instructor by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Instructor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM instructors WHERE id = $1");
        sqlx::query_as::<_, Instructor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all instructors, ordered by last name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Instructor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM instructors ORDER BY last_name ASC");
        sqlx::query_as::<_, Instructor>(&query).fetch_all(pool).await
    }

    /// Update an instructor's mutable fields, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInstructor,
    ) -> Result<Option<Instructor>, sqlx::Error> {
        let query = format!(
            "UPDATE instructors SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Instructor>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Delete an instructor. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM instructors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
