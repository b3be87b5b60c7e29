use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/generate-article", post(handlers::generate_article))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> sg_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use sg_core::{Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use sg_core::{ContentGenerator, Error, Result};
    use sg_inference::images::PlaceholderImageGenerator;
    use sg_inference::models::DummyGenerator;
    use sg_pipeline::ArticlePipeline;
    use sg_scrapers::HttpPageFetcher;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct Offline;

    #[async_trait]
    impl ContentGenerator for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Err(Error::Generation("model unavailable".to_string()))
        }
    }

    fn app_with(generator: Arc<dyn ContentGenerator>) -> Router {
        let pipeline = ArticlePipeline::new(
            Arc::new(HttpPageFetcher::new().unwrap()),
            generator,
            Arc::new(PlaceholderImageGenerator),
        );
        create_app(AppState::new(pipeline))
    }

    fn app() -> Router {
        app_with(Arc::new(DummyGenerator::new()))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/generate-article")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_generate_article() {
        let body = r#"{
            "topic": "Smart Watch",
            "keywords": "smart watch",
            "targetCountry": "US",
            "affiliateLinks": { "amazon": "https://aff.example/watch", "shopee": "" }
        }"#;
        let response = app().oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let article = json["article"].as_str().unwrap();
        assert!(article.contains("<h1>Smart Watch: Complete Review</h1>"));
        assert!(article.contains("https://aff.example/watch"));
        assert!(article.contains("https://via.placeholder.com/800x600/4F46E5/ffffff?text=Smart+Watch"));
        assert!(article.contains(r#"content="en_US""#));

        let metadata = &json["metadata"];
        assert_eq!(metadata["targetCountry"], "US");
        assert_eq!(metadata["keywords"], "smart watch");
        assert!(metadata["wordCount"].as_u64().unwrap() > 0);
        assert!(metadata["seoScore"].as_u64().unwrap() <= 100);
        assert!(metadata["generatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_blank_topic_is_bad_request() {
        let response = app().oneshot(post_json(r#"{"topic": "  "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].as_str().unwrap().contains("topic"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        for body in [r#"{"keywords": "x"}"#, "not json"] {
            let response = app().oneshot(post_json(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(json_body(response).await["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_generation_failure_is_server_error() {
        let response = app_with(Arc::new(Offline))
            .oneshot(post_json(r#"{"topic": "Watch"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("model unavailable"));
    }
}
