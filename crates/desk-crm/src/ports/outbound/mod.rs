//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure
//! must implement. The segmentation engine consumes them as opaque
//! collaborators; it never assumes a concrete store.

use async_trait::async_trait;

use crate::domain::entities::{Company, Customer, Form, FormSubmission, Integration, Segment, Tag};
use crate::domain::value_objects::{ContentType, EntityId};

/// Customer repository port
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find customer by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Customer>, RepositoryError>;

    /// Load the full customer population
    async fn all(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Save customer (insert or update)
    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError>;

    /// Delete customer
    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;
}

/// Company repository port
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Company>, RepositoryError>;

    /// Load the full company population
    async fn all(&self) -> Result<Vec<Company>, RepositoryError>;

    async fn save(&self, company: &Company) -> Result<(), RepositoryError>;
}

/// Segment repository port
#[async_trait]
pub trait SegmentRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Segment>, RepositoryError>;

    /// Segments scoped to one content type
    async fn of_type(&self, content_type: ContentType) -> Result<Vec<Segment>, RepositoryError>;

    async fn save(&self, segment: &Segment) -> Result<(), RepositoryError>;
}

/// Tag repository port
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Tag>, RepositoryError>;

    /// Tags scoped to one content type
    async fn of_type(&self, content_type: ContentType) -> Result<Vec<Tag>, RepositoryError>;

    async fn save(&self, tag: &Tag) -> Result<(), RepositoryError>;
}

/// Form repository port
#[async_trait]
pub trait FormRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Form>, RepositoryError>;

    /// All submissions recorded for a form
    async fn submissions_for(&self, form_id: &EntityId)
        -> Result<Vec<FormSubmission>, RepositoryError>;

    async fn save(&self, form: &Form) -> Result<(), RepositoryError>;
}

/// Integration repository port
#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Integration>, RepositoryError>;

    async fn save(&self, integration: &Integration) -> Result<(), RepositoryError>;
}

/// Repository error type
#[derive(Debug, Clone)]
pub enum RepositoryError {
    NotFound,
    DuplicateKey(String),
    ConnectionError(String),
    QueryError(String),
    SerializationError(String),
}

impl std::error::Error for RepositoryError {}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Entity not found"),
            Self::DuplicateKey(k) => write!(f, "Duplicate key: {}", k),
            Self::ConnectionError(e) => write!(f, "Connection error: {}", e),
            Self::QueryError(e) => write!(f, "Query error: {}", e),
            Self::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}
