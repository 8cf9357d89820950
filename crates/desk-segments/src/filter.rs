//! Filter Compiler
//!
//! Merges the independent filter sources of one request (explicit id
//! list, tag membership, persisted segment, ad-hoc segment definition,
//! free-text search, form-submission time window) into a single
//! [`Selector`] the query service and facet counter evaluate. Sources
//! combine with AND; the search term alone is OR across its fixed field
//! set, still ANDed against everything else.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use desk_crm::{
    Condition, ContentType, Customer, EntityId, FormRepository, RepositoryError, SegmentRepository,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::condition::parse_date;
use crate::error::EngineError;
use crate::resolver::SegmentResolver;

/// One query/count request's filter parameters.
///
/// Every field is independently optional; absence means "no constraint
/// from this source", never "match nothing".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub ids: Option<Vec<EntityId>>,
    pub tag_id: Option<EntityId>,
    pub segment_id: Option<EntityId>,
    pub search_value: Option<String>,
    pub form_id: Option<EntityId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub fake_segment: Option<AdHocSegment>,
}

impl FilterRequest {
    /// Does any field beyond pagination constrain the population?
    pub fn is_unfiltered(&self) -> bool {
        self.ids.is_none()
            && self.tag_id.is_none()
            && self.segment_id.is_none()
            && self.search_value.is_none()
            && self.form_id.is_none()
            && self.fake_segment.is_none()
    }

    /// Copy of this request with the facet dimensions stripped, used as
    /// the base population for facet counting.
    pub fn without_facets(&self) -> Self {
        Self {
            segment_id: None,
            tag_id: None,
            fake_segment: None,
            ..self.clone()
        }
    }
}

/// An unsaved segment definition supplied inline to preview "how many
/// records would match this". Same evaluation semantics as a persisted
/// segment; nothing is stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdHocSegment {
    pub content_type: ContentType,
    pub conditions: Vec<Condition>,
}

/// Compiled, storage-agnostic representation of one request's combined
/// constraints. Pagination is deliberately not part of the selector so
/// total counts see the unpaginated population.
#[derive(Clone, Debug, Default)]
pub struct Selector {
    /// Id allow-lists from ids/segment/ad-hoc/form sources; a customer
    /// must appear in every one
    id_sets: Vec<HashSet<EntityId>>,
    tag_id: Option<EntityId>,
    search: Option<String>,
    /// No filter supplied: restrict to the default scope (records not
    /// owned by an integration)
    default_scope: bool,
}

/// Fields the free-text search sweeps, OR-combined
const SEARCHABLE_FIELDS: usize = 4;

impl Selector {
    /// Does this customer satisfy every compiled constraint?
    pub fn matches(&self, customer: &Customer) -> bool {
        if self.default_scope && customer.is_integration_owned() {
            return false;
        }

        if !self.id_sets.iter().all(|set| set.contains(&customer.id)) {
            return false;
        }

        if let Some(tag_id) = &self.tag_id {
            if !customer.has_tag(tag_id) {
                return false;
            }
        }

        if let Some(term) = &self.search {
            if !Self::search_matches(customer, term) {
                return false;
            }
        }

        true
    }

    /// Case-insensitive substring over first name, last name, email and
    /// phone; a hit in any one field qualifies.
    fn search_matches(customer: &Customer, term: &str) -> bool {
        let needle = term.to_lowercase();
        let haystacks: [Option<String>; SEARCHABLE_FIELDS] = [
            customer.first_name.clone(),
            customer.last_name.clone(),
            customer.email.as_ref().map(|e| e.as_str().to_string()),
            customer.phone.as_ref().map(|p| p.as_str().to_string()),
        ];
        haystacks
            .iter()
            .flatten()
            .any(|h| h.to_lowercase().contains(&needle))
    }
}

/// Compiles a [`FilterRequest`] into a [`Selector`]
pub struct FilterCompiler {
    resolver: Arc<SegmentResolver>,
    segments: Arc<dyn SegmentRepository>,
    forms: Arc<dyn FormRepository>,
}

impl FilterCompiler {
    pub fn new(
        resolver: Arc<SegmentResolver>,
        segments: Arc<dyn SegmentRepository>,
        forms: Arc<dyn FormRepository>,
    ) -> Self {
        Self {
            resolver,
            segments,
            forms,
        }
    }

    /// Resolve each present filter source into a constraint.
    ///
    /// Referenced segments and forms must exist; a dangling id fails
    /// with [`EngineError::NotFound`] instead of silently widening the
    /// result.
    pub async fn compile(&self, request: &FilterRequest) -> Result<Selector, EngineError> {
        let mut id_sets: Vec<HashSet<EntityId>> = Vec::new();

        if let Some(ids) = &request.ids {
            id_sets.push(ids.iter().cloned().collect());
        }

        if let Some(segment_id) = &request.segment_id {
            let segment = self
                .segments
                .find_by_id(segment_id)
                .await?
                .ok_or_else(|| EngineError::not_found("segment", segment_id))?;
            id_sets.push(self.resolver.resolve(&segment).await?);
        }

        if let Some(fake) = &request.fake_segment {
            id_sets.push(
                self.resolver
                    .resolve_ad_hoc(fake.content_type, &fake.conditions)
                    .await?,
            );
        }

        if let Some(form_id) = &request.form_id {
            id_sets.push(self.form_window(request, form_id).await?);
        } else if request.start_date.is_some() || request.end_date.is_some() {
            // A date window is only meaningful relative to a form
            debug!("ignoring start/end date filter without a form id");
        }

        Ok(Selector {
            id_sets,
            tag_id: request.tag_id.clone(),
            search: request.search_value.clone(),
            default_scope: request.is_unfiltered(),
        })
    }

    /// Customers that submitted the form within the request's window.
    /// Missing bounds are open-ended.
    async fn form_window(
        &self,
        request: &FilterRequest,
        form_id: &EntityId,
    ) -> Result<HashSet<EntityId>, EngineError> {
        let submissions = self.forms.submissions_for(form_id).await.map_err(|e| match e {
            RepositoryError::NotFound => EngineError::not_found("form", form_id),
            other => other.into(),
        })?;

        let start = request.start_date.as_deref().and_then(parse_date);
        let end = request.end_date.as_deref().and_then(parse_date);

        Ok(submissions
            .into_iter()
            .filter(|s| within(s.submitted_at, start, end))
            .map(|s| s.customer_id)
            .collect())
    }
}

fn within(at: DateTime<Utc>, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
    if let Some(start) = start {
        if at < start {
            return false;
        }
    }
    if let Some(end) = end {
        if at > end {
            return false;
        }
    }
    true
}
