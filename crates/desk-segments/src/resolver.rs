//! Segment Resolver
//!
//! Resolves a segment definition, its own conditions plus those of
//! every ancestor it extends, into the set of matching record ids for
//! the segment's content type. Nesting is walked with a per-call
//! visited set; a revisit means the definitions form a cycle and the
//! resolution fails instead of recursing.

use std::collections::HashSet;
use std::sync::Arc;

use desk_crm::{
    CompanyRepository, Condition, ContentType, CustomerRepository, EntityId, RepositoryError,
    Segment, SegmentRepository,
};
use tracing::debug;

use crate::condition::matches;
use crate::error::EngineError;

/// Resolves segment definitions against the stored populations
pub struct SegmentResolver {
    segments: Arc<dyn SegmentRepository>,
    customers: Arc<dyn CustomerRepository>,
    companies: Arc<dyn CompanyRepository>,
}

impl SegmentResolver {
    pub fn new(
        segments: Arc<dyn SegmentRepository>,
        customers: Arc<dyn CustomerRepository>,
        companies: Arc<dyn CompanyRepository>,
    ) -> Self {
        Self {
            segments,
            customers,
            companies,
        }
    }

    /// Resolve a persisted segment to the ids of all matching records.
    ///
    /// An empty condition chain matches the whole population of the
    /// segment's content type.
    pub async fn resolve(&self, segment: &Segment) -> Result<HashSet<EntityId>, EngineError> {
        let chain = self.condition_chain(segment).await?;
        self.resolve_conditions(segment.content_type, &chain).await
    }

    /// Resolve an ad-hoc condition list without persisting anything
    pub async fn resolve_ad_hoc(
        &self,
        content_type: ContentType,
        conditions: &[Condition],
    ) -> Result<HashSet<EntityId>, EngineError> {
        self.resolve_conditions(content_type, conditions).await
    }

    /// Collect the full condition chain of a segment: its own
    /// conditions first, then each ancestor's, walking `sub_of`
    /// depth-first with a visited set. A revisited segment id in the
    /// chain is a cycle.
    pub async fn condition_chain(&self, segment: &Segment) -> Result<Vec<Condition>, EngineError> {
        let mut chain = segment.conditions.clone();
        let mut visited: HashSet<EntityId> = HashSet::new();
        visited.insert(segment.id.clone());

        let mut cursor = segment.sub_of.clone();
        while let Some(parent_id) = cursor {
            if !visited.insert(parent_id.clone()) {
                return Err(EngineError::CyclicSegment(parent_id));
            }
            let parent = self
                .segments
                .find_by_id(&parent_id)
                .await?
                .ok_or_else(|| EngineError::not_found("segment", &parent_id))?;
            chain.extend(parent.conditions.iter().cloned());
            cursor = parent.sub_of.clone();
        }

        Ok(chain)
    }

    /// Evaluate a condition list against the full population of one
    /// content type. AND semantics: a record must satisfy every
    /// condition to qualify.
    pub async fn resolve_conditions(
        &self,
        content_type: ContentType,
        conditions: &[Condition],
    ) -> Result<HashSet<EntityId>, EngineError> {
        let docs = self.population(content_type).await?;
        let ids: HashSet<EntityId> = docs
            .into_iter()
            .filter(|(_, doc)| conditions.iter().all(|c| matches(doc, c)))
            .map(|(id, _)| id)
            .collect();

        debug!(
            content_type = %content_type,
            conditions = conditions.len(),
            matched = ids.len(),
            "resolved condition set"
        );
        Ok(ids)
    }

    /// Load and project the population of a content type once per call
    async fn population(
        &self,
        content_type: ContentType,
    ) -> Result<Vec<(EntityId, serde_json::Value)>, EngineError> {
        fn project(
            id: EntityId,
            value: Result<serde_json::Value, serde_json::Error>,
        ) -> Result<(EntityId, serde_json::Value), EngineError> {
            value
                .map(|doc| (id, doc))
                .map_err(|e| RepositoryError::SerializationError(e.to_string()).into())
        }

        match content_type {
            ContentType::Customer => self
                .customers
                .all()
                .await?
                .into_iter()
                .map(|c| project(c.id.clone(), serde_json::to_value(&c)))
                .collect(),
            ContentType::Company => self
                .companies
                .all()
                .await?
                .into_iter()
                .map(|c| project(c.id.clone(), serde_json::to_value(&c)))
                .collect(),
        }
    }
}
