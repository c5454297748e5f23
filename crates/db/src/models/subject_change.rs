//! Subject-change request models.

use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subject_change_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubjectChangeRequest {
    pub id: DbId,
    pub student_id: DbId,
    pub status: String,
    pub remarks: Option<String>,
    pub decided_by_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `subject_change_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubjectChangeItem {
    pub id: DbId,
    pub request_id: DbId,
    pub subject_id: DbId,
    /// `add` | `drop`.
    pub action: String,
}

/// One add/drop line of a submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectChangeItemInput {
    pub subject_id: DbId,
    pub action: String,
}

/// Request body for submitting a subject-change request.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitSubjectChange {
    pub items: Vec<SubjectChangeItemInput>,
}
