//! Transactional application of workflow transitions.
//!
//! The policies in `registra_core::workflow` are pure; these modules wrap
//! them in database transactions so that the decision row, the request's new
//! status, and any side effect commit or roll back together. Every applier
//! follows the same shape: begin a transaction, lock the request row with
//! `FOR UPDATE`, snapshot the state, run the policy, write the results, and
//! commit.

pub mod course_shift;
pub mod enrollment;
pub mod subject_change;
