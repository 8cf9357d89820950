//! Domain entities
//!
//! Records serialize with the camelCase field names segment conditions
//! address (`firstName`, `tagIds`, `visitorContactInfo.email`, ...), so
//! the JSON projection of an entity is also its filterable field space.

pub mod company;
pub mod customer;
pub mod form;
pub mod integration;
pub mod segment;
pub mod tag;

pub use company::Company;
pub use customer::{Customer, VisitorContactInfo};
pub use form::{Form, FormSubmission};
pub use integration::{Integration, IntegrationKind};
pub use segment::{Segment, SegmentDefinitionError};
pub use tag::Tag;
