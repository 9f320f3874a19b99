#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

//! The HTTP status surface: a small `axum` router exposing the Status
//! Record the Mirroring Engine maintains, for operators and health checks.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use sunflower_engine::MirroringEngine;
use tower_http::trace::TraceLayer;

/// Builds the router. Shares one `MirroringEngine` with the background
/// drivers via `Arc`.
pub fn router(engine: Arc<MirroringEngine>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/status", get(status))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

async fn index() -> impl IntoResponse {
    Json(json!({
        "service": "sunflower",
        "description": "Hitomi.la mirror status surface",
    }))
}

async fn status(State(engine): State<Arc<MirroringEngine>>) -> impl IntoResponse {
    Json(engine.status_snapshot().await)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use sunflower_domain::Galleryinfo;
    use sunflower_repo::{InMemoryDocumentRepository, InMemoryRelationalRepository};
    use tower::ServiceExt;

    struct EmptyRemote;

    #[async_trait::async_trait]
    impl sunflower_repo::RemoteIndexRepository for EmptyRemote {
        async fn get(&self, id: u64) -> anyhow::Result<Galleryinfo> {
            Err(sunflower_domain::DomainError::GalleryinfoNotFound(id).into())
        }
        async fn all_ids(&self) -> anyhow::Result<Vec<u64>> {
            Ok(vec![])
        }
        fn index_files(&self) -> &[String] {
            &[]
        }
    }

    fn test_engine() -> Arc<MirroringEngine> {
        Arc::new(MirroringEngine::new(
            Arc::new(EmptyRemote),
            Arc::new(InMemoryRelationalRepository::default()),
            Arc::new(InMemoryDocumentRepository::default()),
            true,
        ))
    }

    #[tokio::test]
    async fn status_endpoint_returns_json_status_record() {
        let app = router(test_engine());
        let response = app
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_returns_json_404() {
        let app = router(test_engine());
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
