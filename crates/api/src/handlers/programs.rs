//! Handlers for the `/programs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::types::DbId;
use registra_db::models::program::{CreateProgram, Program, UpdateProgram};
use registra_db::repositories::ProgramRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// POST /api/v1/programs
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProgram>,
) -> AppResult<(StatusCode, Json<Program>)> {
    let program = ProgramRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

/// GET /api/v1/programs
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Program>>> {
    let programs = ProgramRepo::list_all(&state.pool).await?;
    Ok(Json(programs))
}

/// GET /api/v1/programs/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Program>> {
    let program = ProgramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(program))
}

/// PUT /api/v1/programs/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgram>,
) -> AppResult<Json<Program>> {
    let program = ProgramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(program))
}

/// DELETE /api/v1/programs/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProgramRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))
    }
}
