//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, user_handler};
use domain::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// OpenAPI documentation for the user service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service",
        version = "0.1.0",
        description = "User management REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        health_handler::health,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            UserResponse,
            CreateUserRequest,
            UpdateUserRequest,
            health_handler::HealthResponse,
            health_handler::ServiceHealth,
            health_handler::StorageStatus,
        )
    ),
    tags(
        (name = "Users", description = "User management operations"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
