//! Repository for the `students` and `student_subjects` tables.

use registra_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::student::{CreateStudent, Student, UpdateStudent};

const COLUMNS: &str = "id, user_id, student_number, course_id, section_id, \
    academic_standing, created_at, updated_at";

/// Provides CRUD operations for student records and their enrolled-subject
/// set. The subject set and course reassignment are only ever mutated inside
/// workflow transactions, so those methods take `&mut PgConnection`.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (user_id, student_number, course_id, section_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(input.user_id)
            .bind(&input.student_number)
            .bind(input.course_id)
            .bind(input.section_id)
            .fetch_one(pool)
            .await
    }

    /// Find a student by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the student record belonging to a user account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE user_id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all students, ordered by student number.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students ORDER BY student_number ASC");
        sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
    }

    /// Update a student's course/section assignment, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                course_id = COALESCE($2, course_id),
                section_id = COALESCE($3, section_id),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(input.course_id)
            .bind(input.section_id)
            .fetch_optional(pool)
            .await
    }

    /// List the ids of the subjects a student is currently enrolled in.
    pub async fn list_subject_ids(pool: &PgPool, student_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT subject_id FROM student_subjects WHERE student_id = $1 ORDER BY subject_id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Attach a subject to a student's enrolled set. Idempotent.
    ///
    /// Runs inside a workflow transaction.
    pub async fn attach_subject(
        conn: &mut PgConnection,
        student_id: DbId,
        subject_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO student_subjects (student_id, subject_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_student_subjects DO NOTHING",
        )
        .bind(student_id)
        .bind(subject_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Detach a subject from a student's enrolled set.
    ///
    /// Runs inside a workflow transaction.
    pub async fn detach_subject(
        conn: &mut PgConnection,
        student_id: DbId,
        subject_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM student_subjects WHERE student_id = $1 AND subject_id = $2")
            .bind(student_id)
            .bind(subject_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Reassign a student to a new course and mark their standing irregular.
    ///
    /// Runs inside the course-shift approval transaction so the reassignment
    /// and the request's status write commit or roll back together.
    pub async fn reassign_course(
        conn: &mut PgConnection,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE students SET
                course_id = $2,
                academic_standing = 'irregular',
                updated_at = now()
             WHERE id = $1",
        )
        .bind(student_id)
        .bind(course_id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
