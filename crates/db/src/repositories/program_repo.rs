//! Repository for the `programs` table.

use registra_core::types::DbId;
use sqlx::PgPool;

use crate::models::program::{CreateProgram, Program, UpdateProgram};

const COLUMNS: &str = "id, code, name, description, created_at, updated_at";

/// Provides CRUD operations for academic programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a new program, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProgram) -> Result<Program, sqlx::Error> {
        let query = format!(
            "INSERT INTO programs (code, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a program by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all programs, ordered by code.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs ORDER BY code ASC");
        sqlx::query_as::<_, Program>(&query).fetch_all(pool).await
    }

    /// Update a program's mutable fields, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgram,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a program. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
