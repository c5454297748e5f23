//! Handlers for the `/subjects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::types::DbId;
use registra_db::models::subject::{CreateSubject, Subject, UpdateSubject};
use registra_db::repositories::SubjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// POST /api/v1/subjects
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<Subject>)> {
    if input.units <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Units must be positive".into(),
        )));
    }
    let subject = SubjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// GET /api/v1/subjects
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Subject>>> {
    let subjects = SubjectRepo::list_all(&state.pool).await?;
    Ok(Json(subjects))
}

/// GET /api/v1/subjects/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Subject>> {
    let subject = SubjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    Ok(Json(subject))
}

/// PUT /api/v1/subjects/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<Json<Subject>> {
    let subject = SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    Ok(Json(subject))
}

/// DELETE /api/v1/subjects/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SubjectRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))
    }
}
