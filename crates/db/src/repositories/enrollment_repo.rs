//! Repository for the `enrollments` table.

use registra_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::enrollment::Enrollment;

const COLUMNS: &str = "id, student_id, course_id, school_year, semester, enrollment_code, \
    status, remarks, total_fee, created_at, updated_at";

/// Provides operations for enrollment applications.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert a new enrollment application with a pre-generated code.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
        school_year: i32,
        semester: i16,
        enrollment_code: &str,
        total_fee: i64,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments
                (student_id, course_id, school_year, semester, enrollment_code, total_fee)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .bind(school_year)
            .bind(semester)
            .bind(enrollment_code)
            .bind(total_fee)
            .fetch_one(pool)
            .await
    }

    /// Find an enrollment by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List enrollments, optionally filtered by student, newest first.
    pub async fn list(
        pool: &PgPool,
        student_id: Option<DbId>,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE ($1::bigint IS NULL OR student_id = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// All enrollment codes issued for a school year, for the uniqueness
    /// check during code generation.
    pub async fn list_codes_for_year(
        pool: &PgPool,
        school_year: i32,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT enrollment_code FROM enrollments WHERE school_year = $1")
                .bind(school_year)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(code,)| code).collect())
    }

    /// Lock an enrollment row for the duration of a decision transaction.
    ///
    /// `FOR UPDATE` serializes concurrent decisions on the same enrollment.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Write the recomputed aggregate status inside a decision transaction.
    pub async fn update_status(
        conn: &mut PgConnection,
        id: DbId,
        status: &str,
        remarks: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE enrollments SET
                status = $2,
                remarks = COALESCE($3, remarks),
                updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .bind(remarks)
        .execute(conn)
        .await?;
        Ok(())
    }
}
