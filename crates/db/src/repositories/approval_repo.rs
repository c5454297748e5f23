//! Repository for the `enrollment_approvals` table.

use registra_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::approval::{ApprovalWithActor, EnrollmentApproval};

const COLUMNS: &str = "id, enrollment_id, role, status, remarks, decided_by_id, \
    decided_at, created_at, updated_at";

/// Provides operations for per-role enrollment approvals.
pub struct ApprovalRepo;

impl ApprovalRepo {
    /// List all approvals for an enrollment.
    pub async fn list_for_enrollment(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Vec<EnrollmentApproval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollment_approvals
             WHERE enrollment_id = $1
             ORDER BY decided_at ASC"
        );
        sqlx::query_as::<_, EnrollmentApproval>(&query)
            .bind(enrollment_id)
            .fetch_all(pool)
            .await
    }

    /// List approvals inside a decision transaction (after the row lock).
    pub async fn list_for_enrollment_tx(
        conn: &mut PgConnection,
        enrollment_id: DbId,
    ) -> Result<Vec<EnrollmentApproval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollment_approvals
             WHERE enrollment_id = $1
             ORDER BY decided_at ASC"
        );
        sqlx::query_as::<_, EnrollmentApproval>(&query)
            .bind(enrollment_id)
            .fetch_all(conn)
            .await
    }

    /// Insert or update the approval for (enrollment, role).
    ///
    /// Created lazily the first time a role acts; a re-decision by the same
    /// role updates the existing row. Runs inside the decision transaction.
    pub async fn upsert(
        conn: &mut PgConnection,
        enrollment_id: DbId,
        role: &str,
        status: &str,
        remarks: Option<&str>,
        decided_by_id: DbId,
    ) -> Result<EnrollmentApproval, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollment_approvals
                (enrollment_id, role, status, remarks, decided_by_id)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_enrollment_approvals_role DO UPDATE SET
                status = EXCLUDED.status,
                remarks = EXCLUDED.remarks,
                decided_by_id = EXCLUDED.decided_by_id,
                decided_at = now(),
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EnrollmentApproval>(&query)
            .bind(enrollment_id)
            .bind(role)
            .bind(status)
            .bind(remarks)
            .bind(decided_by_id)
            .fetch_one(conn)
            .await
    }

    /// Load one role's approval joined with the deciding actor's username.
    pub async fn find_with_actor(
        pool: &PgPool,
        enrollment_id: DbId,
        role: &str,
    ) -> Result<Option<ApprovalWithActor>, sqlx::Error> {
        sqlx::query_as::<_, ApprovalWithActor>(
            "SELECT a.id, a.enrollment_id, a.role, a.status, a.remarks,
                    a.decided_by_id, u.username AS decided_by_username, a.decided_at
             FROM enrollment_approvals a
             JOIN users u ON u.id = a.decided_by_id
             WHERE a.enrollment_id = $1 AND a.role = $2",
        )
        .bind(enrollment_id)
        .bind(role)
        .fetch_optional(pool)
        .await
    }
}
