//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that must run inside a
//! workflow transaction accept `&mut PgConnection` instead.

pub mod approval_repo;
pub mod course_repo;
pub mod course_shift_repo;
pub mod enrollment_repo;
pub mod instructor_repo;
pub mod payment_repo;
pub mod program_repo;
pub mod schedule_repo;
pub mod section_repo;
pub mod session_repo;
pub mod student_repo;
pub mod subject_change_repo;
pub mod subject_repo;
pub mod user_repo;

pub use approval_repo::ApprovalRepo;
pub use course_repo::CourseRepo;
pub use course_shift_repo::CourseShiftRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use instructor_repo::InstructorRepo;
pub use payment_repo::PaymentRepo;
pub use program_repo::ProgramRepo;
pub use schedule_repo::ScheduleRepo;
pub use section_repo::SectionRepo;
pub use session_repo::SessionRepo;
pub use student_repo::StudentRepo;
pub use subject_change_repo::SubjectChangeRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;
