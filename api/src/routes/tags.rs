//! Tag endpoints

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use desk_crm::{ContentType, Tag};
use desk_segments::EngineError;
use serde::Deserialize;

use crate::models::{ApiError, ApiResponse};
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/", get(list_tags))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagListParams {
    #[serde(default = "default_content_type")]
    pub content_type: ContentType,
}

fn default_content_type() -> ContentType {
    ContentType::Customer
}

/// List stored tags for one content type
pub async fn list_tags(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<TagListParams>,
) -> Result<Json<ApiResponse<Vec<Tag>>>, ApiError> {
    let tags = state
        .tags
        .of_type(params.content_type)
        .await
        .map_err(EngineError::from)?;
    Ok(Json(ApiResponse::success(tags)))
}
