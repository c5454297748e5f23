//! Enrollment application models.

use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `enrollments` table.
///
/// `status` is a cache of the aggregate derived from the approval set; it is
/// only ever written in the same transaction as an approval upsert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub student_id: DbId,
    pub course_id: DbId,
    pub school_year: i32,
    pub semester: i16,
    pub enrollment_code: String,
    pub status: String,
    pub remarks: Option<String>,
    /// Total assessed fee in centavos.
    pub total_fee: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for submitting an enrollment application.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitEnrollment {
    pub course_id: DbId,
    pub school_year: i32,
    pub semester: i16,
    #[serde(default)]
    pub total_fee: i64,
}
