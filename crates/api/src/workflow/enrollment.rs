//! Transactional applier for enrollment decisions.

use registra_core::error::CoreError;
use registra_core::types::DbId;
use registra_core::workflow::enrollment::{
    project, ApprovalRole, ApprovalSet, StatusProjection,
};
use registra_core::workflow::{Decision, EnrollmentPolicy, WorkflowPolicy};
use registra_db::models::approval::{ApprovalWithActor, EnrollmentApproval};
use registra_db::models::enrollment::Enrollment;
use registra_db::repositories::{ApprovalRepo, EnrollmentRepo};
use registra_db::DbPool;

use crate::error::{AppError, AppResult};

/// Outcome of a committed enrollment decision.
#[derive(Debug)]
pub struct EnrollmentDecisionOutcome {
    pub enrollment: Enrollment,
    pub approval: ApprovalWithActor,
    pub projection: StatusProjection,
}

/// Build the in-memory approval set from the stored rows.
///
/// Rows still marked `pending` count as "has not acted", the same as a
/// missing row.
pub fn approval_set_from_rows(rows: &[EnrollmentApproval]) -> ApprovalSet {
    let mut set = ApprovalSet::default();
    for row in rows {
        let Some(role) = ApprovalRole::parse(&row.role) else {
            continue;
        };
        if let Ok(decision) = Decision::parse(&row.status) {
            set = set.with(role, decision);
        }
    }
    set
}

/// Record one role's decision on an enrollment and write the recomputed
/// aggregate status, atomically.
///
/// The row lock taken by `find_by_id_for_update` serializes concurrent
/// decisions on the same enrollment, so two staff members deciding at once
/// each see a consistent approval set.
pub async fn decide(
    pool: &DbPool,
    enrollment_id: DbId,
    actor_id: DbId,
    actor_role: &str,
    decision: Decision,
    remarks: Option<&str>,
) -> AppResult<EnrollmentDecisionOutcome> {
    let mut tx = pool.begin().await?;

    let mut enrollment = EnrollmentRepo::find_by_id_for_update(&mut tx, enrollment_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        })?;

    let rows = ApprovalRepo::list_for_enrollment_tx(&mut tx, enrollment_id).await?;
    let set = approval_set_from_rows(&rows);

    let policy = EnrollmentPolicy;
    let transition = policy
        .transition(actor_role, &set, decision)
        .map_err(CoreError::from)?;
    // acting_stage cannot fail here: transition already authorized the role.
    let stage = EnrollmentPolicy::acting_stage(actor_role).map_err(CoreError::from)?;

    ApprovalRepo::upsert(
        &mut tx,
        enrollment_id,
        stage.as_str(),
        decision.as_str(),
        remarks,
        actor_id,
    )
    .await?;

    // transition always carries the recomputed aggregate for this policy.
    let status = transition.effect.unwrap_or_else(|| {
        registra_core::workflow::enrollment::aggregate(&transition.next)
    });
    EnrollmentRepo::update_status(&mut tx, enrollment_id, status.as_str(), remarks).await?;

    tx.commit().await?;

    enrollment.status = status.as_str().to_string();
    if let Some(r) = remarks {
        enrollment.remarks = Some(r.to_string());
    }

    // Re-read the committed approval joined with the actor's username for
    // the response body.
    let approval = ApprovalRepo::find_with_actor(pool, enrollment_id, stage.as_str())
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "approval for enrollment {enrollment_id} role '{}' missing after commit",
                stage.as_str()
            ))
        })?;

    tracing::info!(
        enrollment_id,
        actor_id,
        role = stage.as_str(),
        decision = decision.as_str(),
        status = status.as_str(),
        "Enrollment decision recorded"
    );

    Ok(EnrollmentDecisionOutcome {
        enrollment,
        approval,
        projection: project(&transition.next),
    })
}
