//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod course_shifts;
pub mod courses;
pub mod enrollments;
pub mod instructors;
pub mod payments;
pub mod programs;
pub mod sections;
pub mod students;
pub mod subject_changes;
pub mod subjects;
pub mod users;
