//! Handlers for the caller's own profile and the staff picker.

use agency_core::error::CoreError;
use agency_core::roles::Role;
use agency_db::models::user::{UpdateProfile, UserResponse};
use agency_db::repositories::UserRepo;
use axum::extract::{Query, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::{validate_staff_email, validate_staff_name};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::query::RoleFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(name) = &input.name {
        validate_staff_name(name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(email) = &input.email {
        validate_staff_email(email).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// GET /api/v1/users?role=
///
/// Active users holding a role, for the PR / creative / writer pickers.
pub async fn list_by_role(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Query(params): Query<RoleFilterParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let role = Role::from_str_value(&params.role)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    let users = UserRepo::list_by_role(&state.pool, role.as_str()).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}
