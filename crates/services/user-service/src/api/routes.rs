//! Application route configuration.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health, user_routes};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1/users", user_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::service::MockUserService;
    use domain::{DomainError, ValidationError};

    async fn error_code(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json["error"]["code"].as_str().unwrap_or_default().to_string())
    }

    #[tokio::test]
    async fn test_internal_error_maps_to_500() {
        let mut service = MockUserService::new();
        service
            .expect_get_user()
            .returning(|_| Err(DomainError::internal("hash failure")));
        let app = create_router(AppState::new(Arc::new(service), None));

        let request = Request::get("/api/v1/users/1").body(Body::empty()).unwrap();
        let (status, code) = error_code(app, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_entity_validation_code_reaches_client() {
        let mut service = MockUserService::new();
        service
            .expect_update_user()
            .withf(|id, request| *id == 3 && request.name == "李四")
            .returning(|_, _| Err(ValidationError::InvalidEmailFormat.into()));
        let app = create_router(AppState::new(Arc::new(service), None));

        let request = Request::put("/api/v1/users/3")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name": " 李四 ", "email": "lisi@example.com"}"#))
            .unwrap();
        let (status, code) = error_code(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "INVALID_EMAIL");
    }
}
