//! Enrollment admission workflow: Program Head, then Registrar, then Cashier.
//!
//! Unlike the other two workflows, enrollment keeps one approval row per
//! (enrollment, role) and derives the aggregate status from the full set on
//! every decision. The aggregate is a pure, order-independent function of the
//! set: the same approvals always yield the same status regardless of arrival
//! order. A role re-deciding updates its own row and the aggregate follows,
//! so a prior rejection can be superseded by a later approval.

use serde::Serialize;

use crate::roles::{ROLE_ADMIN, ROLE_CASHIER, ROLE_PROGRAM_HEAD, ROLE_REGISTRAR};

use super::{Decision, Transition, WorkflowError, WorkflowPolicy};

/// The three approval stages, in sequence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalRole {
    ProgramHead,
    Registrar,
    Cashier,
}

impl ApprovalRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalRole::ProgramHead => "program_head",
            ApprovalRole::Registrar => "registrar",
            ApprovalRole::Cashier => "cashier",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "program_head" => Some(ApprovalRole::ProgramHead),
            "registrar" => Some(ApprovalRole::Registrar),
            "cashier" => Some(ApprovalRole::Cashier),
            _ => None,
        }
    }
}

/// Aggregate status of an enrollment, derived from its approval set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Pending,
    Enrolled,
    Rejected,
}

impl EnrollmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Enrolled => "enrolled",
            EnrollmentStatus::Rejected => "rejected",
        }
    }
}

/// Snapshot of the per-role decisions recorded for one enrollment.
///
/// `None` means the role has not acted yet (no row exists, or the row is
/// still `pending`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApprovalSet {
    pub program_head: Option<Decision>,
    pub registrar: Option<Decision>,
    pub cashier: Option<Decision>,
}

impl ApprovalSet {
    pub fn get(&self, role: ApprovalRole) -> Option<Decision> {
        match role {
            ApprovalRole::ProgramHead => self.program_head,
            ApprovalRole::Registrar => self.registrar,
            ApprovalRole::Cashier => self.cashier,
        }
    }

    /// Return a copy with `role`'s decision replaced.
    pub fn with(&self, role: ApprovalRole, decision: Decision) -> Self {
        let mut next = *self;
        match role {
            ApprovalRole::ProgramHead => next.program_head = Some(decision),
            ApprovalRole::Registrar => next.registrar = Some(decision),
            ApprovalRole::Cashier => next.cashier = Some(decision),
        }
        next
    }

    pub fn approved_count(&self) -> u32 {
        [self.program_head, self.registrar, self.cashier]
            .iter()
            .filter(|d| **d == Some(Decision::Approved))
            .count() as u32
    }

    fn any_rejected(&self) -> bool {
        [self.program_head, self.registrar, self.cashier]
            .iter()
            .any(|d| *d == Some(Decision::Rejected))
    }
}

/// Recompute the aggregate status from an approval set.
///
/// Any rejection wins; all three approvals mean enrolled; anything else is
/// still pending.
pub fn aggregate(set: &ApprovalSet) -> EnrollmentStatus {
    if set.any_rejected() {
        EnrollmentStatus::Rejected
    } else if set.approved_count() == 3 {
        EnrollmentStatus::Enrolled
    } else {
        EnrollmentStatus::Pending
    }
}

/// Human-facing view of an enrollment's position in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusProjection {
    pub status: EnrollmentStatus,
    /// Display label, e.g. `"Registrar Review"`.
    pub label: &'static str,
    /// Percentage of approval stages completed (0, 33, 66, 100).
    pub progress: u8,
}

/// Derive the display label and progress percentage from an approval set.
/// Read-only; never mutates anything.
pub fn project(set: &ApprovalSet) -> StatusProjection {
    let status = aggregate(set);
    let progress = (set.approved_count() * 100 / 3) as u8;
    let label = match status {
        EnrollmentStatus::Enrolled => "Enrolled",
        EnrollmentStatus::Rejected => "Rejected",
        EnrollmentStatus::Pending => {
            if set.program_head != Some(Decision::Approved) {
                "Program Head Review"
            } else if set.registrar != Some(Decision::Approved) {
                "Registrar Review"
            } else {
                "Pending Payment"
            }
        }
    };
    StatusProjection {
        status,
        label,
        progress,
    }
}

/// Policy for the three-role enrollment admission workflow.
pub struct EnrollmentPolicy;

impl EnrollmentPolicy {
    /// Map an actor's user role to the approval stage it acts at.
    ///
    /// Admins decide on behalf of the Program Head stage; the other two
    /// stages are owned by their matching roles. Any other role never acts.
    pub fn acting_stage(actor_role: &str) -> Result<ApprovalRole, WorkflowError> {
        match actor_role {
            r if r == ROLE_ADMIN || r == ROLE_PROGRAM_HEAD => Ok(ApprovalRole::ProgramHead),
            r if r == ROLE_REGISTRAR => Ok(ApprovalRole::Registrar),
            r if r == ROLE_CASHIER => Ok(ApprovalRole::Cashier),
            other => Err(WorkflowError::NotAuthorized {
                role: other.to_string(),
            }),
        }
    }
}

impl WorkflowPolicy for EnrollmentPolicy {
    type State = ApprovalSet;
    type Effect = EnrollmentStatus;

    fn authorize(&self, actor_role: &str, state: &ApprovalSet) -> Result<(), WorkflowError> {
        let stage = Self::acting_stage(actor_role)?;
        let prerequisites_met = match stage {
            // Program Head acts first, no prerequisite.
            ApprovalRole::ProgramHead => true,
            ApprovalRole::Registrar => state.program_head == Some(Decision::Approved),
            ApprovalRole::Cashier => {
                state.program_head == Some(Decision::Approved)
                    && state.registrar == Some(Decision::Approved)
            }
        };
        if prerequisites_met {
            Ok(())
        } else {
            Err(WorkflowError::NotAuthorized {
                role: actor_role.to_string(),
            })
        }
    }

    fn transition(
        &self,
        actor_role: &str,
        state: &ApprovalSet,
        decision: Decision,
    ) -> Result<Transition<ApprovalSet, EnrollmentStatus>, WorkflowError> {
        self.authorize(actor_role, state)?;
        let stage = Self::acting_stage(actor_role)?;
        let next = state.with(stage, decision);
        // The recomputed aggregate is always written alongside the approval.
        Ok(Transition {
            effect: Some(aggregate(&next)),
            next,
        })
    }
}
