use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use pantry_lib::pipeline::recommend::{Recommendation, RecommendResponse, Recommender};
use pantry_lib::runtime::Runtime;

/// Shared handler state. Everything behind it is read-only.
#[derive(Clone)]
pub struct AppState {
    recommender: Arc<Recommender>,
    health: Arc<HealthResponse>,
}

/// Body of `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub recipes: usize,
    pub indexed_rows: usize,
    pub dataset_sha256: String,
    pub index_sha256: String,
}

impl AppState {
    pub fn from_runtime(runtime: &Runtime, top_k: usize) -> Self {
        let health = HealthResponse {
            status: "ok",
            recipes: runtime.recipes.len(),
            indexed_rows: runtime.index.len(),
            dataset_sha256: runtime.dataset_sha256.clone(),
            index_sha256: runtime.index_sha256.clone(),
        };
        Self {
            recommender: Arc::new(runtime.recommender().with_top_k(top_k.max(1))),
            health: Arc::new(health),
        }
    }
}

/// Routes: `POST /recommend`, `GET /healthz`. Cross-origin requests are
/// allowed from anywhere.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/recommend", post(recommend))
        .route("/healthz", get(healthz))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn recommend(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<RecommendResponse>) {
    let recommender = Arc::clone(&state.recommender);
    let outcome = tokio::task::spawn_blocking(move || recommender.recommend_json(&body))
        .await
        .unwrap_or_else(|err| {
            let details = err.to_string();
            error!(details = %details, "Recommendation task aborted");
            Recommendation::Failed { details }
        });

    let status =
        StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome.into_response()))
}

async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.health.as_ref().clone())
}

/// Bind the listening socket.
pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))
}

/// Serve requests until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!(%addr, "HTTP server started");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use pantry_lib::runtime::Runtime;
    use pantry_test_util::request::request_json;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::test_util::sample_context;

    fn app() -> (tempfile::TempDir, Router) {
        let (tmp, ctx) = sample_context();
        let runtime = Runtime::load(ctx).unwrap();
        (tmp, router(AppState::from_runtime(&runtime, 5)))
    }

    async fn post_recommend(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/recommend")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn recommend_returns_filtered_recipes() {
        let (_tmp, app) = app();
        let body = request_json(30.0, 400.0, &["peanut"], Some("Soup"));

        let (status, json) = post_recommend(app, body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_recommendations"], 3);
        assert_eq!(json["recommended_recipes"][0]["name"], "Chocolate Lava Cake");
        assert_eq!(json["recommended_recipes"][0]["category"], "Dessert");
    }

    #[tokio::test]
    async fn recommend_accepts_numeric_strings() {
        let (_tmp, app) = app();
        let body = r#"{"preferences": {"max_cook_time": "30", "max_calories": "400",
            "recipe_category": "Soup", "ingredient_restrictions": ["peanut"]}}"#;

        let (status, json) = post_recommend(app, body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_recommendations"], 3);
    }

    #[tokio::test]
    async fn recommend_unusable_bound_is_server_error() {
        let (_tmp, app) = app();
        let body = r#"{"preferences": {"max_cook_time": "soon", "max_calories": 400,
            "ingredient_restrictions": []}}"#;

        let (status, json) = post_recommend(app, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({
                "error": "An error occurred while processing your request.",
                "details": "max_cook_time must be a number, got \"soon\""
            })
        );
    }

    #[tokio::test]
    async fn recommend_without_matches_is_ok() {
        let (_tmp, app) = app();
        let body = request_json(
            30.0,
            400.0,
            &["peanut", "chocolate", "lentils", "bananas"],
            Some("Soup"),
        );

        let (status, json) = post_recommend(app, body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "message": "No recipes found matching your criteria.",
                "recommended_recipes": []
            })
        );
    }

    #[tokio::test]
    async fn recommend_missing_field_is_bad_request() {
        let (_tmp, app) = app();
        let body = r#"{"preferences": {"max_calories": 400, "ingredient_restrictions": []}}"#;

        let (status, json) = post_recommend(app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Missing required field: max_cook_time"}));
    }

    #[tokio::test]
    async fn recommend_empty_body_is_bad_request() {
        let (_tmp, app) = app();

        let (status, json) = post_recommend(app, Body::empty()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({"error": "Invalid request format. Missing preferences."})
        );
    }

    #[tokio::test]
    async fn healthz_reports_artifacts() {
        let (tmp, app) = app();
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["recipes"], 8);
        assert_eq!(json["indexed_rows"], 8);
        let dataset_sha =
            pantry_lib::runtime::fingerprint(&tmp.path().join("recipes.csv")).unwrap();
        assert_eq!(json["dataset_sha256"], dataset_sha);
    }

    #[tokio::test]
    async fn cors_preflight_allows_any_origin() {
        let (_tmp, app) = app();
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/recommend")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (_tmp, app) = app();
        let request = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
