//! Customer Query Service
//!
//! Public entry point for customer listing: compiles the request's
//! filters once, orders the matching population by creation time, then
//! applies offset/limit pagination. The paged list and the total count
//! always come from the same compiled selector.

use std::sync::Arc;

use desk_crm::{Customer, CustomerRepository, EntityId};
use serde::Serialize;

use crate::error::EngineError;
use crate::filter::{FilterCompiler, FilterRequest};

/// First page when the request omits `page`
pub const DEFAULT_PAGE: u32 = 1;
/// Page size when the request omits `per_page`
pub const DEFAULT_PER_PAGE: u32 = 20;

/// One page of customers plus the unpaginated match count
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
    pub list: Vec<Customer>,
    pub total_count: usize,
}

/// Paginated customer listing over compiled selectors
pub struct CustomerQueryService {
    compiler: Arc<FilterCompiler>,
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerQueryService {
    pub fn new(compiler: Arc<FilterCompiler>, customers: Arc<dyn CustomerRepository>) -> Self {
        Self { compiler, customers }
    }

    /// Flat ordered page of matching customers
    pub async fn list(&self, request: &FilterRequest) -> Result<Vec<Customer>, EngineError> {
        let matching = self.resolve(request).await?;
        Ok(paginate(matching, request))
    }

    /// Page plus the selector's full match count before pagination
    pub async fn list_with_count(
        &self,
        request: &FilterRequest,
    ) -> Result<CustomerPage, EngineError> {
        let matching = self.resolve(request).await?;
        let total_count = matching.len();
        Ok(CustomerPage {
            list: paginate(matching, request),
            total_count,
        })
    }

    /// Detail lookup by id
    pub async fn find(&self, id: &EntityId) -> Result<Customer, EngineError> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::not_found("customer", id))
    }

    /// Compile the request and collect the ordered, unpaginated match
    /// set. Ordering is stable: creation time, then id.
    async fn resolve(&self, request: &FilterRequest) -> Result<Vec<Customer>, EngineError> {
        let selector = self.compiler.compile(request).await?;
        let mut matching: Vec<Customer> = self
            .customers
            .all()
            .await?
            .into_iter()
            .filter(|c| selector.matches(c))
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matching)
    }
}

fn paginate(customers: Vec<Customer>, request: &FilterRequest) -> Vec<Customer> {
    let page = request.page.unwrap_or(DEFAULT_PAGE).max(1);
    let per_page = request.per_page.unwrap_or(DEFAULT_PER_PAGE) as usize;
    let offset = (page as usize - 1) * per_page;
    customers.into_iter().skip(offset).take(per_page).collect()
}
