//! OpenDesk REST API
//!
//! Thin HTTP layer over the segmentation engine: customer listing and
//! detail, facet counts, segment listing and ad-hoc previews, tags.
//! Handlers hold no state of their own; everything flows through the
//! engine services in [`ApiState`].

pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use desk_crm::{SegmentRepository, TagRepository};
use desk_segments::{CustomerQueryService, FacetCounter, SegmentResolver};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use models::*;

/// Shared handler state
#[derive(Clone)]
pub struct ApiState {
    pub query: Arc<CustomerQueryService>,
    pub counter: Arc<FacetCounter>,
    pub resolver: Arc<SegmentResolver>,
    pub segments: Arc<dyn SegmentRepository>,
    pub tags: Arc<dyn TagRepository>,
}

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .nest("/customers", routes::customers::router())
        .nest("/segments", routes::segments::router())
        .nest("/tags", routes::tags::router())
}
