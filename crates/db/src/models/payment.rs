use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `payments` table: one installment against an enrollment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub enrollment_id: DbId,
    /// Amount paid in centavos.
    pub amount: i64,
    pub method: String,
    pub reference_number: Option<String>,
    pub recorded_by_id: DbId,
    pub paid_at: Timestamp,
    pub created_at: Timestamp,
}

/// Request body for recording a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPayment {
    pub amount: i64,
    #[serde(default = "default_method")]
    pub method: String,
    pub reference_number: Option<String>,
}

fn default_method() -> String {
    "cash".to_string()
}
