//! Handlers for the `/students` resource.
//!
//! Staff manage student records; a student may read their own record and
//! enrolled-subject list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::roles::ROLE_STUDENT;
use registra_core::types::DbId;
use registra_db::models::student::{CreateStudent, Student, UpdateStudent};
use registra_db::repositories::StudentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/students
pub async fn create(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    let student = StudentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/students
pub async fn list(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Student>>> {
    let students = StudentRepo::list_all(&state.pool).await?;
    Ok(Json(students))
}

/// GET /api/v1/students/{id}
///
/// Staff may read any record; a student only their own.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Student>> {
    let student = find_readable(&state, &auth, id).await?;
    Ok(Json(student))
}

/// PUT /api/v1/students/{id}
pub async fn update(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    Ok(Json(student))
}

/// GET /api/v1/students/{id}/subjects
///
/// The ids of the subjects the student is currently enrolled in.
pub async fn list_subjects(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<DbId>>>> {
    let student = find_readable(&state, &auth, id).await?;
    let subject_ids = StudentRepo::list_subject_ids(&state.pool, student.id).await?;
    Ok(Json(DataResponse { data: subject_ids }))
}

/// Load a student record, enforcing that students only see themselves.
async fn find_readable(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Student> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    if auth.role == ROLE_STUDENT && student.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Students may only access their own record".into(),
        )));
    }
    Ok(student)
}
