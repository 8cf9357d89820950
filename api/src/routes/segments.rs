//! Segment endpoints

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use desk_crm::{ContentType, Segment};
use desk_segments::{AdHocSegment, EngineError};
use serde::{Deserialize, Serialize};

use crate::models::{ApiError, ApiResponse};
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_segments))
        .route("/preview", post(preview_segment))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentListParams {
    #[serde(default = "default_content_type")]
    pub content_type: ContentType,
}

fn default_content_type() -> ContentType {
    ContentType::Customer
}

/// How many records an unsaved definition would match
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentPreview {
    pub count: usize,
}

/// List stored segments for one content type
pub async fn list_segments(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<SegmentListParams>,
) -> Result<Json<ApiResponse<Vec<Segment>>>, ApiError> {
    let segments = state
        .segments
        .of_type(params.content_type)
        .await
        .map_err(EngineError::from)?;
    Ok(Json(ApiResponse::success(segments)))
}

/// Preview an unsaved segment definition; nothing is persisted
pub async fn preview_segment(
    State(state): State<Arc<ApiState>>,
    Json(definition): Json<AdHocSegment>,
) -> Result<Json<ApiResponse<SegmentPreview>>, ApiError> {
    let ids = state
        .resolver
        .resolve_ad_hoc(definition.content_type, &definition.conditions)
        .await?;
    Ok(Json(ApiResponse::success(SegmentPreview {
        count: ids.len(),
    })))
}
