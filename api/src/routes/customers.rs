//! Customer query endpoints

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use desk_crm::{Customer, EntityId};
use desk_segments::{CountReport, CustomerPage, FilterRequest};
use serde::Deserialize;

use crate::models::{ApiError, ApiResponse};
use crate::ApiState;

/// Upper bound on one facet-count aggregation
const COUNT_DEADLINE: Duration = Duration::from_secs(10);

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_customers))
        .route("/main", get(main_list))
        .route("/counts", post(count_customers))
        .route("/:id", get(get_customer))
}

/// Filter parameters accepted on the query string. `ids` arrives
/// comma-separated; ad-hoc segment definitions only arrive in count
/// request bodies.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub ids: Option<String>,
    pub tag_id: Option<EntityId>,
    pub segment_id: Option<EntityId>,
    pub search_value: Option<String>,
    pub form_id: Option<EntityId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<CustomerListParams> for FilterRequest {
    fn from(params: CustomerListParams) -> Self {
        FilterRequest {
            page: params.page,
            per_page: params.per_page,
            ids: params.ids.map(|ids| {
                ids.split(',')
                    .filter(|id| !id.is_empty())
                    .map(EntityId::from_string)
                    .collect()
            }),
            tag_id: params.tag_id,
            segment_id: params.segment_id,
            search_value: params.search_value,
            form_id: params.form_id,
            start_date: params.start_date,
            end_date: params.end_date,
            fake_segment: None,
        }
    }
}

/// Flat customer listing
pub async fn list_customers(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<CustomerListParams>,
) -> Result<Json<ApiResponse<Vec<Customer>>>, ApiError> {
    let list = state.query.list(&params.into()).await?;
    Ok(Json(ApiResponse::success(list)))
}

/// Customer listing with the unpaginated total count
pub async fn main_list(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<CustomerListParams>,
) -> Result<Json<ApiResponse<CustomerPage>>, ApiError> {
    let page = state.query.list_with_count(&params.into()).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Facet counts for the request's filtered population
pub async fn count_customers(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<ApiResponse<CountReport>>, ApiError> {
    let report = state
        .counter
        .counts_with_deadline(&request, COUNT_DEADLINE)
        .await?;
    Ok(Json(ApiResponse::success(report)))
}

/// Customer detail by id
pub async fn get_customer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    let customer = state.query.find(&id).await?;
    Ok(Json(ApiResponse::success(customer)))
}
