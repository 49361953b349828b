use crate::config::HttpConfig;
use crate::middleware::request_id_middleware;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::url_handlers;
use super::AppState;

/// Create application router
pub fn create_router(state: Arc<AppState>, http_config: &HttpConfig) -> axum::Router {
    let cors = if http_config.allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<http::HeaderValue> = http_config
            .allowed_origins
            .iter()
            .filter_map(|s| s.parse::<http::HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = axum::Router::new()
        .route("/api/shorten", post(url_handlers::shorten_url))
        .route("/api/actualURL/{short_url}", get(url_handlers::actual_url))
        .layer(DefaultBodyLimit::max(http_config.max_body_bytes));

    let health_routes = axum::Router::new().route("/_health", get(health::health_check));

    // Layers run outside-in in reverse order of application
    api_routes
        .merge(health_routes)
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MappingStore, MockMappingStore};
    use crate::models::Mapping;
    use crate::services::{ShortCodeGenerator, ShortenerService};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app(store: MockMappingStore) -> axum::Router {
        let store: Arc<dyn MappingStore> = Arc::new(store);
        let shortener = ShortenerService::new(
            store.clone(),
            ShortCodeGenerator::new(),
            &crate::config::ShortenerConfig {
                short_code_length: 8,
                short_code_max_attempts: 5,
            },
        );
        let http_config = HttpConfig {
            allowed_origins: vec!["*".to_string()],
            max_body_bytes: 1024,
        };

        create_router(Arc::new(AppState { store, shortener }), &http_config)
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_code().returning(|short| {
            Ok(Some(Mapping {
                url: "https://example.com".to_string(),
                short: short.to_string(),
                created_at: chrono::Utc::now(),
            }))
        });

        let response = app(store)
            .oneshot(
                Request::builder()
                    .uri("/api/actualURL/abcd1234")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let mut store = MockMappingStore::new();
        store.expect_insert_mapping().never();

        let body = format!(r#"{{"url": "https://example.com/{}"}}"#, "a".repeat(2048));
        let response = app(store)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/shorten")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app(MockMappingStore::new())
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
