//! Row structs and create/update DTOs, one module per table group.

pub mod approval;
pub mod course;
pub mod course_shift;
pub mod enrollment;
pub mod instructor;
pub mod payment;
pub mod program;
pub mod schedule;
pub mod section;
pub mod session;
pub mod student;
pub mod subject;
pub mod subject_change;
pub mod user;
