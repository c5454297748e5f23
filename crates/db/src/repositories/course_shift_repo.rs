//! Repository for the `course_shift_requests` table.

use registra_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::course_shift::CourseShiftRequest;

const COLUMNS: &str = "id, student_id, from_course_id, to_course_id, reason, status, \
    remarks, decided_by_id, created_at, updated_at";

/// Provides operations for course-shift requests.
pub struct CourseShiftRepo;

impl CourseShiftRepo {
    /// Insert a new request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        from_course_id: DbId,
        to_course_id: DbId,
        reason: Option<&str>,
    ) -> Result<CourseShiftRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_shift_requests (student_id, from_course_id, to_course_id, reason)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseShiftRequest>(&query)
            .bind(student_id)
            .bind(from_course_id)
            .bind(to_course_id)
            .bind(reason)
            .fetch_one(pool)
            .await
    }

    /// Find a request by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CourseShiftRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM course_shift_requests WHERE id = $1");
        sqlx::query_as::<_, CourseShiftRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests, optionally filtered by student, newest first.
    pub async fn list(
        pool: &PgPool,
        student_id: Option<DbId>,
    ) -> Result<Vec<CourseShiftRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_shift_requests
             WHERE ($1::bigint IS NULL OR student_id = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CourseShiftRequest>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Whether the student already has a request in a non-terminal state.
    pub async fn has_pending_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM course_shift_requests
                WHERE student_id = $1 AND status = 'pending_program_head'
             )",
        )
        .bind(student_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Whether the student holds an approved course shift (the "shiftee"
    /// flag consulted by the subject-change workflow).
    pub async fn has_approved_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM course_shift_requests
                WHERE student_id = $1 AND status = 'approved'
             )",
        )
        .bind(student_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Lock a request row for the duration of a decision transaction.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<CourseShiftRequest>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM course_shift_requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, CourseShiftRequest>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Write a decision's status, remarks, and actor inside its transaction.
    pub async fn update_decision(
        conn: &mut PgConnection,
        id: DbId,
        status: &str,
        remarks: Option<&str>,
        decided_by_id: DbId,
    ) -> Result<CourseShiftRequest, sqlx::Error> {
        let query = format!(
            "UPDATE course_shift_requests SET
                status = $2,
                remarks = COALESCE($3, remarks),
                decided_by_id = $4,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseShiftRequest>(&query)
            .bind(id)
            .bind(status)
            .bind(remarks)
            .bind(decided_by_id)
            .fetch_one(conn)
            .await
    }
}
