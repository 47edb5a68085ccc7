//! User CRUD handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
    routing::get,
    Router,
};

use common::{ApiResponse, AppError, AppResult, Created};
use domain::{
    CreateUserRequest, UpdateUserRequest, UserId, UserResponse, MSG_USER_CREATED,
    MSG_USER_DELETED, MSG_USER_UPDATED,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;

/// Create user routes (mounted under `/api/v1/users`)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

fn user_id(path: Result<Path<UserId>, PathRejection>) -> AppResult<UserId> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::bad_request("Invalid user ID"))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = [UserResponse])
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.user_service.get_all_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let id = user_id(path)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.user_service.create_user(payload).await?;
    Ok(Created(ApiResponse::with_message(user, MSG_USER_CREATED)))
}

/// Update user name and email
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let id = user_id(path)?;
    let user = state.user_service.update_user(id, payload).await?;
    Ok(Json(ApiResponse::with_message(user, MSG_USER_UPDATED)))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = user_id(path)?;
    state.user_service.delete_user(id).await?;
    Ok(Json(ApiResponse::message(MSG_USER_DELETED)))
}
