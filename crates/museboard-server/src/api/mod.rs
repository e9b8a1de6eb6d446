mod ads;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id;

pub(super) const DEFAULT_LIST_LIMIT: i64 = 50;
pub(super) const AD_NOT_FOUND: &str = "Ad not found";

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub max_list_limit: i64,
}

/// Error response. Serializes as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    code: &'static str,
    detail: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ApiError {
    pub fn new(code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("not_found", detail)
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new("validation_error", detail)
    }

    fn status(&self) -> StatusCode {
        match self.code {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<i64>, max: i64) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(0, max)
}

pub(super) fn map_db_error(request_id: &str, error: &museboard_db::DbError) -> ApiError {
    match error {
        museboard_db::DbError::NotFound => {
            tracing::debug!(request_id, "ad not found");
            ApiError::not_found(AD_NOT_FOUND)
        }
        museboard_db::DbError::Sqlx(_) => {
            tracing::error!(request_id, error = %error, "database query failed");
            ApiError::new("internal_error", "database query failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/ads", get(ads::list_ads))
        .route("/api/ads/generate", post(ads::generate_ad))
        .route("/api/ads/{id}", get(ads::get_ad).delete(ads::delete_ad))
        .route("/api/ads/{id}/like", post(ads::like_ad))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "MuseBoard API - The Billboard for the AI-Made World",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate": "/api/ads/generate",
            "list": "/api/ads",
            "detail": "/api/ads/{id}",
            "like": "/api/ads/{id}/like",
            "delete": "/api/ads/{id}",
            "health": "/api/health",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match museboard_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

async fn fallback() -> ApiError {
    ApiError::not_found("Not Found")
}
