//! OpenDesk segmentation engine (ODSEG)
//!
//! Resolves arbitrary combinations of filter criteria (explicit id
//! lists, tag membership, persisted segments, ad-hoc segment
//! definitions, free-text search, form-submission time windows) into
//! customer record sets, paginated pages and facet counts.
//!
//! ## Components
//!
//! - [`condition`]: evaluates one atomic condition against a record
//! - [`resolver`]: resolves a segment definition (nesting included) to
//!   the set of matching record ids
//! - [`filter`]: compiles a [`FilterRequest`] into a storage-agnostic
//!   [`Selector`]
//! - [`query`]: paginated listing over a compiled selector
//! - [`counts`]: facet counts (by segment, by tag, by ad-hoc segment)
//!   over one population snapshot
//!
//! The engine is read-only and stateless between calls; every entry
//! point takes the repositories it scans as `Arc<dyn Trait>`
//! collaborators.

pub mod condition;
pub mod counts;
pub mod error;
pub mod filter;
pub mod query;
pub mod resolver;

pub use condition::matches;
pub use counts::{CountReport, FacetCounter};
pub use error::EngineError;
pub use filter::{AdHocSegment, FilterCompiler, FilterRequest, Selector};
pub use query::{CustomerPage, CustomerQueryService, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use resolver::SegmentResolver;
