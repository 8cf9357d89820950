//! Facet Counter
//!
//! Breaks the filtered customer population down into per-segment and
//! per-tag counts, plus an optional ad-hoc segment count. All facets
//! are computed against one population snapshot taken at the start of
//! the call, so concurrent writes cannot skew one facet against
//! another. Zero-match facets are omitted, not reported as zero.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use desk_crm::{
    ContentType, Customer, CustomerRepository, EntityId, RepositoryError, SegmentRepository,
    TagRepository,
};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;

use crate::condition::matches;
use crate::error::EngineError;
use crate::filter::{FilterCompiler, FilterRequest};
use crate::resolver::SegmentResolver;

/// Facet counts over one filtered population snapshot
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountReport {
    /// Matches per customer segment; segments with zero matches are absent
    pub by_segment: HashMap<EntityId, usize>,
    /// Matches per customer tag; tags with zero matches are absent
    pub by_tag: HashMap<EntityId, usize>,
    /// Present only when the request carried an ad-hoc definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_fake_segment: Option<usize>,
}

/// Computes facet counts for customer count requests
pub struct FacetCounter {
    resolver: Arc<SegmentResolver>,
    compiler: Arc<FilterCompiler>,
    customers: Arc<dyn CustomerRepository>,
    segments: Arc<dyn SegmentRepository>,
    tags: Arc<dyn TagRepository>,
}

impl FacetCounter {
    pub fn new(
        resolver: Arc<SegmentResolver>,
        compiler: Arc<FilterCompiler>,
        customers: Arc<dyn CustomerRepository>,
        segments: Arc<dyn SegmentRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self {
            resolver,
            compiler,
            customers,
            segments,
            tags,
        }
    }

    /// Count the base population along every facet dimension.
    ///
    /// The base is the request's own filters minus the facet fields
    /// themselves; a facet is never part of its own base. Per-segment
    /// condition chains are fetched concurrently; if any sub-resolution
    /// fails the whole call fails, so a missing key always means "zero
    /// matches", never "silently skipped".
    pub async fn counts(&self, request: &FilterRequest) -> Result<CountReport, EngineError> {
        let selector = self.compiler.compile(&request.without_facets()).await?;

        // One snapshot for every facet
        let population: Vec<Customer> = self
            .customers
            .all()
            .await?
            .into_iter()
            .filter(|c| selector.matches(c))
            .collect();
        let docs: Vec<(EntityId, serde_json::Value)> = population
            .iter()
            .map(|c| {
                serde_json::to_value(c)
                    .map(|doc| (c.id.clone(), doc))
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()).into())
            })
            .collect::<Result<_, EngineError>>()?;

        let segments = self.segments.of_type(ContentType::Customer).await?;
        let tags = self.tags.of_type(ContentType::Customer).await?;

        // Condition chains involve parent lookups; fan them out
        let chain_futures = segments.iter().map(|segment| {
            let resolver = &self.resolver;
            async move {
                let chain = resolver.condition_chain(segment).await?;
                Ok::<_, EngineError>((segment.id.clone(), chain))
            }
        });
        let chains = try_join_all(chain_futures).await?;

        let mut by_segment = HashMap::new();
        for (segment_id, chain) in chains {
            let count = docs
                .iter()
                .filter(|(_, doc)| chain.iter().all(|c| matches(doc, c)))
                .count();
            if count > 0 {
                by_segment.insert(segment_id, count);
            }
        }

        let mut by_tag = HashMap::new();
        for tag in &tags {
            let count = population.iter().filter(|c| c.has_tag(&tag.id)).count();
            if count > 0 {
                by_tag.insert(tag.id.clone(), count);
            }
        }

        let by_fake_segment = match &request.fake_segment {
            None => None,
            Some(fake) => Some(match fake.content_type {
                // Customer definitions count within the base snapshot
                ContentType::Customer => docs
                    .iter()
                    .filter(|(_, doc)| fake.conditions.iter().all(|c| matches(doc, c)))
                    .count(),
                // Company definitions resolve over the company population
                ContentType::Company => {
                    self.resolver
                        .resolve_ad_hoc(ContentType::Company, &fake.conditions)
                        .await?
                        .len()
                }
            }),
        };

        debug!(
            population = population.len(),
            segments = by_segment.len(),
            tags = by_tag.len(),
            "computed facet counts"
        );

        Ok(CountReport {
            by_segment,
            by_tag,
            by_fake_segment,
        })
    }

    /// Same as [`counts`](Self::counts) under a deadline. On expiry the
    /// whole aggregation is cancelled together, including every
    /// in-flight sub-resolution.
    pub async fn counts_with_deadline(
        &self,
        request: &FilterRequest,
        deadline: Duration,
    ) -> Result<CountReport, EngineError> {
        tokio::time::timeout(deadline, self.counts(request))
            .await
            .map_err(|_| EngineError::DeadlineExceeded)?
    }
}
