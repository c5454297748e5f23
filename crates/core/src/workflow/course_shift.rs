//! Course shift workflow: a single Program Head decision.
//!
//! On approval the student is reassigned to the target course and marked with
//! "irregular" academic standing, atomically with the status write. Terminal
//! states are final.

use serde::Serialize;

use crate::roles::{ROLE_ADMIN, ROLE_PROGRAM_HEAD};

use super::{Decision, Transition, WorkflowError, WorkflowPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseShiftStatus {
    PendingProgramHead,
    Approved,
    Rejected,
}

impl CourseShiftStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CourseShiftStatus::PendingProgramHead => "pending_program_head",
            CourseShiftStatus::Approved => "approved",
            CourseShiftStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending_program_head" => Some(CourseShiftStatus::PendingProgramHead),
            "approved" => Some(CourseShiftStatus::Approved),
            "rejected" => Some(CourseShiftStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CourseShiftStatus::Approved | CourseShiftStatus::Rejected)
    }
}

/// Side effect emitted on approval: point the student at the target course
/// and set academic standing to "irregular".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReassignCourse;

pub struct CourseShiftPolicy;

impl WorkflowPolicy for CourseShiftPolicy {
    type State = CourseShiftStatus;
    type Effect = ReassignCourse;

    fn authorize(&self, actor_role: &str, state: &CourseShiftStatus) -> Result<(), WorkflowError> {
        if state.is_terminal() {
            return Err(WorkflowError::AlreadyProcessed);
        }
        if actor_role == ROLE_PROGRAM_HEAD || actor_role == ROLE_ADMIN {
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
        state: &CourseShiftStatus,
        decision: Decision,
    ) -> Result<Transition<CourseShiftStatus, ReassignCourse>, WorkflowError> {
        self.authorize(actor_role, state)?;
        let (next, effect) = match decision {
            Decision::Approved => (CourseShiftStatus::Approved, Some(ReassignCourse)),
            Decision::Rejected => (CourseShiftStatus::Rejected, None),
        };
        Ok(Transition { next, effect })
    }
}
