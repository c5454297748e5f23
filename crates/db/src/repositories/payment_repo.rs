//! Repository for the `payments` table.

use registra_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::{Payment, RecordPayment};

const COLUMNS: &str = "id, enrollment_id, amount, method, reference_number, \
    recorded_by_id, paid_at, created_at";

/// Provides operations for installment payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a payment against an enrollment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        enrollment_id: DbId,
        input: &RecordPayment,
        recorded_by_id: DbId,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (enrollment_id, amount, method, reference_number, recorded_by_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(enrollment_id)
            .bind(input.amount)
            .bind(&input.method)
            .bind(&input.reference_number)
            .bind(recorded_by_id)
            .fetch_one(pool)
            .await
    }

    /// List payments for an enrollment, oldest first.
    pub async fn list_for_enrollment(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments
             WHERE enrollment_id = $1
             ORDER BY paid_at ASC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(enrollment_id)
            .fetch_all(pool)
            .await
    }

    /// Sum of all payments recorded against an enrollment, in centavos.
    pub async fn total_paid(pool: &PgPool, enrollment_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM payments WHERE enrollment_id = $1",
        )
        .bind(enrollment_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
