use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use chrono::{DateTime, Utc};
use museboard_core::{generate_ad_copy, DEFAULT_CATEGORY, DEFAULT_FORMAT, DEFAULT_TONE};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, AppState};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct GenerateAdRequest {
    pub product_description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_tone")]
    pub tone: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_owned()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_owned()
}

fn default_tone() -> String {
    DEFAULT_TONE.to_owned()
}

#[derive(Debug, Deserialize)]
pub(super) struct ListAdsQuery {
    pub limit: Option<i64>,
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct AdItem {
    id: i64,
    title: String,
    content: String,
    category: String,
    format: String,
    tone: Option<String>,
    created_at: DateTime<Utc>,
    views: i64,
    likes: i64,
}

impl From<museboard_db::AdRow> for AdItem {
    fn from(row: museboard_db::AdRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            category: row.category,
            format: row.format,
            tone: row.tone,
            created_at: row.created_at,
            views: row.views,
            likes: row.likes,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct LikeResponse {
    likes: i64,
}

#[derive(Debug, Serialize)]
pub(super) struct MessageResponse {
    message: &'static str,
}

fn ad_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::validation(rejection.body_text()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/ads/generate — fill a template and store the result.
pub(super) async fn generate_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<GenerateAdRequest>, JsonRejection>,
) -> Result<Json<AdItem>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::validation(rejection.body_text()))?;

    let copy = generate_ad_copy(&body.category, &body.product_description);
    let row = museboard_db::create_ad(
        &state.pool,
        museboard_db::NewAd {
            title: &copy.title,
            content: &copy.content,
            category: &body.category,
            format: &body.format,
            tone: Some(body.tone.as_str()),
        },
    )
    .await
    .map_err(|e| map_db_error(&req_id.0, &e))?;

    tracing::info!(
        request_id = %req_id.0,
        ad_id = row.id,
        category = %row.category,
        "ad generated"
    );

    Ok(Json(row.into()))
}

/// GET /api/ads — newest ads first, optionally filtered by category.
pub(super) async fn list_ads(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<ListAdsQuery>, QueryRejection>,
) -> Result<Json<Vec<AdItem>>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::validation(rejection.body_text()))?;

    let rows = museboard_db::list_ads(
        &state.pool,
        museboard_db::AdListFilters {
            category: query.category.as_deref(),
            limit: normalize_limit(query.limit, state.max_list_limit),
        },
    )
    .await
    .map_err(|e| map_db_error(&req_id.0, &e))?;

    Ok(Json(rows.into_iter().map(AdItem::from).collect()))
}

/// GET /api/ads/{id} — counts as one view.
pub(super) async fn get_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<AdItem>, ApiError> {
    let id = ad_id(path)?;

    let row = museboard_db::record_view(&state.pool, id)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    Ok(Json(row.into()))
}

/// POST /api/ads/{id}/like
pub(super) async fn like_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<LikeResponse>, ApiError> {
    let id = ad_id(path)?;

    let likes = museboard_db::like_ad(&state.pool, id)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    Ok(Json(LikeResponse { likes }))
}

/// DELETE /api/ads/{id}
pub(super) async fn delete_ad(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ad_id(path)?;

    museboard_db::delete_ad(&state.pool, id)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    tracing::info!(request_id = %req_id.0, ad_id = id, "ad deleted");

    Ok(Json(MessageResponse {
        message: "Ad deleted successfully",
    }))
}
