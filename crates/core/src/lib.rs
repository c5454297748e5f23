//! Domain logic for the Registra enrollment platform.
//!
//! Everything in this crate is pure: the approval workflows, status
//! projection, and enrollment-code generation take snapshots in and return
//! values out. Persistence and HTTP live in `registra-db` and `registra-api`.

pub mod enrollment_code;
pub mod error;
pub mod roles;
pub mod types;
pub mod workflow;
