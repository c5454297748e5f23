//! Handlers for the `/courses` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::types::DbId;
use registra_db::models::course::{Course, CreateCourse, UpdateCourse};
use registra_db::repositories::{CourseRepo, ProgramRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Query parameters for `GET /courses`.
#[derive(Debug, Deserialize)]
pub struct CourseListParams {
    pub program_id: Option<DbId>,
}

/// POST /api/v1/courses
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    // 404 before insert so a bad program id is not reported as an FK error.
    ProgramRepo::find_by_id(&state.pool, input.program_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id: input.program_id,
        }))?;

    let course = CourseRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/v1/courses?program_id=
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> AppResult<Json<Vec<Course>>> {
    let courses = CourseRepo::list(&state.pool, params.program_id).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Course>> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(course))
}

/// PUT /api/v1/courses/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<Course>> {
    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(course))
}

/// DELETE /api/v1/courses/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))
    }
}
