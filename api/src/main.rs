//! OpenDesk API - Main Entry Point

use std::sync::Arc;

use desk_crm::infrastructure::persistence::{
    InMemoryCompanyRepository, InMemoryCustomerRepository, InMemoryFormRepository,
    InMemorySegmentRepository, InMemoryTagRepository,
};
use desk_segments::{CustomerQueryService, FacetCounter, FilterCompiler, SegmentResolver};
use opendesk_api::{build_router, ApiState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("OpenDesk API v{}", env!("CARGO_PKG_VERSION"));

    let customers = Arc::new(InMemoryCustomerRepository::new());
    let companies = Arc::new(InMemoryCompanyRepository::new());
    let segments = Arc::new(InMemorySegmentRepository::new());
    let tags = Arc::new(InMemoryTagRepository::new());
    let forms = Arc::new(InMemoryFormRepository::new());

    let resolver = Arc::new(SegmentResolver::new(
        segments.clone(),
        customers.clone(),
        companies,
    ));
    let compiler = Arc::new(FilterCompiler::new(
        resolver.clone(),
        segments.clone(),
        forms,
    ));
    let query = Arc::new(CustomerQueryService::new(
        compiler.clone(),
        customers.clone(),
    ));
    let counter = Arc::new(FacetCounter::new(
        resolver.clone(),
        compiler,
        customers,
        segments.clone(),
        tags.clone(),
    ));

    let state = ApiState {
        query,
        counter,
        resolver,
        segments,
        tags,
    };

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
