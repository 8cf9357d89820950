//! OpenDesk CRM bounded context (ODCRM)
//!
//! Helpdesk/CRM record model following Domain-Driven Design (DDD)
//! with hexagonal ports for persistence.
//!
//! ## Architecture
//!
//! - **Domain Layer**: entities, value objects, domain events
//! - **Ports Layer**: repository traits the infrastructure implements
//! - **Infrastructure Layer**: in-memory repositories for tests and
//!   single-node deployments
//!
//! ## Key Entities
//!
//! - **Customer** / **Company**: the records the segmentation engine reads
//! - **Segment**: persisted filter definition (AND of conditions, nestable)
//! - **Tag**: typed label attached to customers or companies
//! - **Form**: lead form whose submissions scope customers by time window

pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use domain::entities::{
    Company, Customer, Form, FormSubmission, Integration, IntegrationKind, Segment,
    SegmentDefinitionError, Tag, VisitorContactInfo,
};
pub use domain::events::{CustomerEvent, DomainEvent, SegmentEvent};
pub use domain::value_objects::{
    Condition, ContentType, Email, EmailError, EntityId, Operator, Phone, ValueKind,
};
pub use ports::outbound::{
    CompanyRepository, CustomerRepository, FormRepository, IntegrationRepository,
    RepositoryError, SegmentRepository, TagRepository,
};
