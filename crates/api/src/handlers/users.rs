//! Admin handlers for user account management, including PIN setup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::roles::validate_role;
use registra_core::types::DbId;
use registra_db::models::user::{CreateUser, UpdateUser, User};
use registra_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_pin_format};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}/pin`.
#[derive(Debug, Deserialize)]
pub struct SetPinRequest {
    /// 4 to 8 digits, or null to remove the PIN.
    pub pin: Option<String>,
}

/// POST /api/v1/admin/users
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_role(&input.role).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if input.password.len() < 8 {
        return Err(AppError::Core(CoreError::Validation(
            "Password must be at least 8 characters".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/admin/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list_all(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    if let Some(role) = &input.role {
        validate_role(role).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/admin/users/{id}/pin
///
/// Set or remove a user's login PIN (second factor). Returns 204 No Content.
pub async fn set_pin(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetPinRequest>,
) -> AppResult<StatusCode> {
    let pin_hash = match &input.pin {
        Some(pin) => {
            validate_pin_format(pin).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
            Some(
                hash_password(pin)
                    .map_err(|e| AppError::InternalError(format!("PIN hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let updated = UserRepo::set_pin_hash(&state.pool, id, pin_hash.as_deref()).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, enabled = input.pin.is_some(), "User PIN updated");

    Ok(StatusCode::NO_CONTENT)
}
