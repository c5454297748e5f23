//! Per-role enrollment approval models.

use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `enrollment_approvals` table: one decision per
/// (enrollment, role), upserted the first time that role acts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrollmentApproval {
    pub id: DbId,
    pub enrollment_id: DbId,
    pub role: String,
    pub status: String,
    pub remarks: Option<String>,
    pub decided_by_id: DbId,
    pub decided_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An approval joined with the deciding actor's username, for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApprovalWithActor {
    pub id: DbId,
    pub enrollment_id: DbId,
    pub role: String,
    pub status: String,
    pub remarks: Option<String>,
    pub decided_by_id: DbId,
    pub decided_by_username: String,
    pub decided_at: Timestamp,
}

/// Request body for the decision endpoints (all three workflows).
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    /// `approved` | `rejected`.
    pub decision: String,
    /// Free-text remarks, at most 1000 characters.
    pub remarks: Option<String>,
}
