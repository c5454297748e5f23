//! Sequential approval workflows.
//!
//! Three request types share one shape: an authorization gate that decides
//! whether the acting role may record a decision given the request's current
//! state, and a transition that computes the next state plus any side effect
//! to apply. All three policies implement [`WorkflowPolicy`] so handlers never
//! compare role strings directly.
//!
//! The policies are pure. The transactional application of a transition
//! (writing the decision, the new status, and the side effect atomically)
//! lives in the API crate's `workflow` module.

pub mod course_shift;
pub mod enrollment;
pub mod subject_change;

pub use course_shift::CourseShiftPolicy;
pub use enrollment::EnrollmentPolicy;
pub use subject_change::SubjectChangePolicy;

/// A decision recorded by an acting role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Parse a decision from its wire/database representation.
    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value {
            "approved" => Ok(Decision::Approved),
            "rejected" => Ok(Decision::Rejected),
            other => Err(WorkflowError::InvalidDecision(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Approved => "approved",
            Decision::Rejected => "rejected",
        }
    }
}

/// Errors produced by the authorization gate and state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// The acting role may not decide at the request's current stage.
    #[error("Role '{role}' is not authorized or prerequisites are not met")]
    NotAuthorized { role: String },

    /// The request is already in a terminal state.
    #[error("Request has already been processed")]
    AlreadyProcessed,

    /// The decision value is not one of `approved` | `rejected`.
    #[error("Invalid decision '{0}'. Must be one of: approved, rejected")]
    InvalidDecision(String),
}

/// Result of a successful [`WorkflowPolicy::transition`]: the state the
/// request moves to, and the side effect (if any) that must be applied in the
/// same transaction as the status write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub next: S,
    pub effect: Option<E>,
}

/// Common interface for the three approval workflows.
pub trait WorkflowPolicy {
    /// Snapshot of the request's workflow-relevant state.
    type State;
    /// Side effect directive emitted on terminal approval.
    type Effect;

    /// Check whether `actor_role` may record a decision right now.
    ///
    /// On failure nothing may be written; callers surface the error as
    /// "not authorized or prerequisites not met", not as a generic error.
    fn authorize(&self, actor_role: &str, state: &Self::State) -> Result<(), WorkflowError>;

    /// Compute the state the request moves to when `actor_role` records
    /// `decision`. Includes the authorization check.
    fn transition(
        &self,
        actor_role: &str,
        state: &Self::State,
        decision: Decision,
    ) -> Result<Transition<Self::State, Self::Effect>, WorkflowError>;
}
