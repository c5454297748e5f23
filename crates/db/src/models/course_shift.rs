//! Course-shift request models.

use registra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `course_shift_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseShiftRequest {
    pub id: DbId,
    pub student_id: DbId,
    pub from_course_id: DbId,
    pub to_course_id: DbId,
    pub reason: Option<String>,
    pub status: String,
    pub remarks: Option<String>,
    pub decided_by_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for submitting a course-shift request.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitCourseShift {
    pub to_course_id: DbId,
    pub reason: Option<String>,
}
