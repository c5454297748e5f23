//! Repository for the `subject_change_requests` and `subject_change_items`
//! tables.

use registra_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::subject_change::{
    SubjectChangeItem, SubjectChangeItemInput, SubjectChangeRequest,
};

const COLUMNS: &str =
    "id, student_id, status, remarks, decided_by_id, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, request_id, subject_id, action";

/// Provides operations for subject-change requests.
pub struct SubjectChangeRepo;

impl SubjectChangeRepo {
    /// Insert a request together with its add/drop items, in one transaction.
    pub async fn create_with_items(
        pool: &PgPool,
        student_id: DbId,
        items: &[SubjectChangeItemInput],
    ) -> Result<SubjectChangeRequest, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO subject_change_requests (student_id)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, SubjectChangeRequest>(&query)
            .bind(student_id)
            .fetch_one(&mut *tx)
            .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO subject_change_items (request_id, subject_id, action)
                 VALUES ($1, $2, $3)",
            )
            .bind(request.id)
            .bind(item.subject_id)
            .bind(&item.action)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(request)
    }

    /// Find a request by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubjectChangeRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subject_change_requests WHERE id = $1");
        sqlx::query_as::<_, SubjectChangeRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests, optionally filtered by student, newest first.
    pub async fn list(
        pool: &PgPool,
        student_id: Option<DbId>,
    ) -> Result<Vec<SubjectChangeRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subject_change_requests
             WHERE ($1::bigint IS NULL OR student_id = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SubjectChangeRequest>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// List the add/drop items of a request.
    pub async fn list_items(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<SubjectChangeItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM subject_change_items
             WHERE request_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, SubjectChangeItem>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }

    /// List items inside the decision transaction.
    pub async fn list_items_tx(
        conn: &mut PgConnection,
        request_id: DbId,
    ) -> Result<Vec<SubjectChangeItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM subject_change_items
             WHERE request_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, SubjectChangeItem>(&query)
            .bind(request_id)
            .fetch_all(conn)
            .await
    }

    /// Whether the student already has a request in a non-terminal state.
    pub async fn has_pending_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM subject_change_requests
                WHERE student_id = $1
                  AND status IN ('pending_program_head', 'pending_cashier')
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
    ) -> Result<Option<SubjectChangeRequest>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM subject_change_requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, SubjectChangeRequest>(&query)
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
    ) -> Result<SubjectChangeRequest, sqlx::Error> {
        let query = format!(
            "UPDATE subject_change_requests SET
                status = $2,
                remarks = COALESCE($3, remarks),
                decided_by_id = $4,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubjectChangeRequest>(&query)
            .bind(id)
            .bind(status)
            .bind(remarks)
            .bind(decided_by_id)
            .fetch_one(conn)
            .await
    }
}
