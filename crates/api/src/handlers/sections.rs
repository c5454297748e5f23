//! Handlers for the `/sections` resource and its nested `/schedules`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::types::DbId;
use registra_db::models::schedule::{CreateSchedule, Schedule};
use registra_db::models::section::{CreateSection, Section, UpdateSection};
use registra_db::repositories::{ScheduleRepo, SectionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Query parameters for `GET /sections`.
#[derive(Debug, Deserialize)]
pub struct SectionListParams {
    pub course_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// POST /api/v1/sections
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSection>,
) -> AppResult<(StatusCode, Json<Section>)> {
    if input.capacity <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Capacity must be positive".into(),
        )));
    }
    let section = SectionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// GET /api/v1/sections?course_id=
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<SectionListParams>,
) -> AppResult<Json<Vec<Section>>> {
    let sections = SectionRepo::list(&state.pool, params.course_id).await?;
    Ok(Json(sections))
}

/// GET /api/v1/sections/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Section>> {
    let section = SectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id,
        }))?;
    Ok(Json(section))
}

/// PUT /api/v1/sections/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSection>,
) -> AppResult<Json<Section>> {
    let section = SectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id,
        }))?;
    Ok(Json(section))
}

/// DELETE /api/v1/sections/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SectionRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Schedules (nested under a section)
// ---------------------------------------------------------------------------

/// POST /api/v1/sections/{section_id}/schedules
pub async fn create_schedule(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(section_id): Path<DbId>,
    Json(input): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    if !(1..=7).contains(&input.day_of_week) {
        return Err(AppError::Core(CoreError::Validation(
            "day_of_week must be 1 (Monday) through 7 (Sunday)".into(),
        )));
    }
    if input.start_time >= input.end_time {
        return Err(AppError::Core(CoreError::Validation(
            "start_time must be before end_time".into(),
        )));
    }

    // 404 before insert so a bad section id is not reported as an FK error.
    SectionRepo::find_by_id(&state.pool, section_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id: section_id,
        }))?;

    let schedule = ScheduleRepo::create(&state.pool, section_id, &input).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// GET /api/v1/sections/{section_id}/schedules
pub async fn list_schedules(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(section_id): Path<DbId>,
) -> AppResult<Json<Vec<Schedule>>> {
    let schedules = ScheduleRepo::list_for_section(&state.pool, section_id).await?;
    Ok(Json(schedules))
}

/// DELETE /api/v1/sections/{section_id}/schedules/{id}
pub async fn delete_schedule(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((_section_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ScheduleRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))
    }
}
