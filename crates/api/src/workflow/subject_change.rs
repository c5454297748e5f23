//! Transactional applier for subject-change decisions.

use registra_core::error::CoreError;
use registra_core::types::DbId;
use registra_core::workflow::subject_change::{SubjectChangeState, SubjectChangeStatus};
use registra_core::workflow::{Decision, SubjectChangePolicy, WorkflowPolicy};
use registra_db::models::subject_change::SubjectChangeRequest;
use registra_db::repositories::{CourseShiftRepo, StudentRepo, SubjectChangeRepo};
use registra_db::DbPool;

use crate::error::{AppError, AppResult};

/// Record a decision on a subject-change request and, when the request
/// reaches its approved state, apply the add/drop items to the student's
/// enrolled-subject set in the same transaction.
pub async fn decide(
    pool: &DbPool,
    request_id: DbId,
    actor_id: DbId,
    actor_role: &str,
    decision: Decision,
    remarks: Option<&str>,
) -> AppResult<SubjectChangeRequest> {
    // The shiftee flag only ever flips through a committed course-shift
    // approval, so reading it before the lock is safe.
    let request = SubjectChangeRepo::find_by_id(pool, request_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "SubjectChangeRequest",
            id: request_id,
        })?;
    let shiftee = CourseShiftRepo::has_approved_for_student(pool, request.student_id).await?;

    let mut tx = pool.begin().await?;

    let request = SubjectChangeRepo::find_by_id_for_update(&mut tx, request_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "SubjectChangeRequest",
            id: request_id,
        })?;

    let status = SubjectChangeStatus::parse(&request.status).ok_or_else(|| {
        AppError::InternalError(format!(
            "subject_change_request {request_id} has unknown status '{}'",
            request.status
        ))
    })?;
    let state = SubjectChangeState { status, shiftee };

    let policy = SubjectChangePolicy;
    let transition = policy
        .transition(actor_role, &state, decision)
        .map_err(CoreError::from)?;

    if transition.effect.is_some() {
        let items = SubjectChangeRepo::list_items_tx(&mut tx, request_id).await?;
        for item in &items {
            match item.action.as_str() {
                "add" => {
                    StudentRepo::attach_subject(&mut tx, request.student_id, item.subject_id)
                        .await?
                }
                "drop" => {
                    StudentRepo::detach_subject(&mut tx, request.student_id, item.subject_id)
                        .await?
                }
                other => {
                    // The CHECK constraint on the table makes this unreachable.
                    return Err(AppError::InternalError(format!(
                        "subject_change_item {} has unknown action '{other}'",
                        item.id
                    )));
                }
            }
        }
    }

    let updated = SubjectChangeRepo::update_decision(
        &mut tx,
        request_id,
        transition.next.status.as_str(),
        remarks,
        actor_id,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        request_id,
        actor_id,
        decision = decision.as_str(),
        status = transition.next.status.as_str(),
        shiftee,
        "Subject-change decision recorded"
    );

    Ok(updated)
}
