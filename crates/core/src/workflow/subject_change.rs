//! Subject add/drop workflow: Program Head, then conditionally Cashier.
//!
//! Unlike enrollment, this workflow stores an explicit status on the request
//! row and walks it forward one stage at a time. A student with a previously
//! approved course shift (a "shiftee") skips the Cashier stage entirely.
//! Terminal states are final; there is no recomputation.

use serde::Serialize;

use crate::roles::{ROLE_ADMIN, ROLE_CASHIER, ROLE_PROGRAM_HEAD};

use super::{Decision, Transition, WorkflowError, WorkflowPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectChangeStatus {
    PendingProgramHead,
    PendingCashier,
    Approved,
    Rejected,
}

impl SubjectChangeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubjectChangeStatus::PendingProgramHead => "pending_program_head",
            SubjectChangeStatus::PendingCashier => "pending_cashier",
            SubjectChangeStatus::Approved => "approved",
            SubjectChangeStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending_program_head" => Some(SubjectChangeStatus::PendingProgramHead),
            "pending_cashier" => Some(SubjectChangeStatus::PendingCashier),
            "approved" => Some(SubjectChangeStatus::Approved),
            "rejected" => Some(SubjectChangeStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SubjectChangeStatus::Approved | SubjectChangeStatus::Rejected
        )
    }
}

/// Workflow-relevant snapshot of a subject-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectChangeState {
    pub status: SubjectChangeStatus,
    /// Whether the requester holds a previously approved course shift.
    pub shiftee: bool,
}

/// Side effect emitted when the request reaches its approved state: attach
/// every requested "add" subject and detach every "drop" subject, atomically
/// with the status write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplySubjectItems;

pub struct SubjectChangePolicy;

impl WorkflowPolicy for SubjectChangePolicy {
    type State = SubjectChangeState;
    type Effect = ApplySubjectItems;

    fn authorize(&self, actor_role: &str, state: &SubjectChangeState) -> Result<(), WorkflowError> {
        if state.status.is_terminal() {
            return Err(WorkflowError::AlreadyProcessed);
        }
        let at_turn = match state.status {
            SubjectChangeStatus::PendingProgramHead => {
                actor_role == ROLE_PROGRAM_HEAD || actor_role == ROLE_ADMIN
            }
            SubjectChangeStatus::PendingCashier => actor_role == ROLE_CASHIER,
            // Terminal states handled above.
            _ => false,
        };
        if at_turn {
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
        state: &SubjectChangeState,
        decision: Decision,
    ) -> Result<Transition<SubjectChangeState, ApplySubjectItems>, WorkflowError> {
        self.authorize(actor_role, state)?;

        let (next_status, effect) = match decision {
            Decision::Rejected => (SubjectChangeStatus::Rejected, None),
            Decision::Approved => match state.status {
                SubjectChangeStatus::PendingProgramHead if state.shiftee => {
                    // Policy shortcut for shifted students: skip the Cashier.
                    (SubjectChangeStatus::Approved, Some(ApplySubjectItems))
                }
                SubjectChangeStatus::PendingProgramHead => {
                    (SubjectChangeStatus::PendingCashier, None)
                }
                SubjectChangeStatus::PendingCashier => {
                    (SubjectChangeStatus::Approved, Some(ApplySubjectItems))
                }
                _ => unreachable!("authorize rejects terminal states"),
            },
        };

        Ok(Transition {
            next: SubjectChangeState {
                status: next_status,
                shiftee: state.shiftee,
            },
            effect,
        })
    }
}
