//! Handlers for the `/instructors` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::types::DbId;
use registra_db::models::instructor::{CreateInstructor, Instructor, UpdateInstructor};
use registra_db::repositories::InstructorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// POST /api/v1/instructors
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateInstructor>,
) -> AppResult<(StatusCode, Json<Instructor>)> {
    let instructor = InstructorRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(instructor)))
}

/// GET /api/v1/instructors
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Instructor>>> {
    let instructors = InstructorRepo::list_all(&state.pool).await?;
    Ok(Json(instructors))
}

/// GET /api/v1/instructors/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Instructor>> {
    let instructor = InstructorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Instructor",
            id,
        }))?;
    Ok(Json(instructor))
}

/// PUT /api/v1/instructors/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInstructor>,
) -> AppResult<Json<Instructor>> {
    let instructor = InstructorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Instructor",
            id,
        }))?;
    Ok(Json(instructor))
}

/// DELETE /api/v1/instructors/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = InstructorRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Instructor",
            id,
        }))
    }
}
