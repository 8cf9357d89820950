//! In-memory repository implementations
//!
//! Used by tests and single-node deployments. Readers clone records out
//! of the store, so a returned population is a stable snapshot even if
//! writes land concurrently.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::entities::{Company, Customer, Form, FormSubmission, Integration, Segment, Tag};
use crate::domain::value_objects::{ContentType, EntityId};
use crate::ports::outbound::{
    CompanyRepository, CustomerRepository, FormRepository, IntegrationRepository, RepositoryError,
    SegmentRepository, TagRepository,
};

/// In-memory customer repository
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<HashMap<String, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Customer>, RepositoryError> {
        let customers = self.customers.read().unwrap();
        Ok(customers.get(id.as_str()).cloned())
    }

    async fn all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = self.customers.read().unwrap();
        Ok(customers.values().cloned().collect())
    }

    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let mut customers = self.customers.write().unwrap();
        customers.insert(customer.id.to_string(), customer.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let mut customers = self.customers.write().unwrap();
        customers.remove(id.as_str());
        Ok(())
    }
}

/// In-memory company repository
#[derive(Default)]
pub struct InMemoryCompanyRepository {
    companies: RwLock<HashMap<String, Company>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Company>, RepositoryError> {
        let companies = self.companies.read().unwrap();
        Ok(companies.get(id.as_str()).cloned())
    }

    async fn all(&self) -> Result<Vec<Company>, RepositoryError> {
        let companies = self.companies.read().unwrap();
        Ok(companies.values().cloned().collect())
    }

    async fn save(&self, company: &Company) -> Result<(), RepositoryError> {
        let mut companies = self.companies.write().unwrap();
        companies.insert(company.id.to_string(), company.clone());
        Ok(())
    }
}

/// In-memory segment repository
#[derive(Default)]
pub struct InMemorySegmentRepository {
    segments: RwLock<HashMap<String, Segment>>,
}

impl InMemorySegmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SegmentRepository for InMemorySegmentRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Segment>, RepositoryError> {
        let segments = self.segments.read().unwrap();
        Ok(segments.get(id.as_str()).cloned())
    }

    async fn of_type(&self, content_type: ContentType) -> Result<Vec<Segment>, RepositoryError> {
        let segments = self.segments.read().unwrap();
        let mut matching: Vec<Segment> = segments
            .values()
            .filter(|s| s.content_type == content_type)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matching)
    }

    async fn save(&self, segment: &Segment) -> Result<(), RepositoryError> {
        let mut segments = self.segments.write().unwrap();
        segments.insert(segment.id.to_string(), segment.clone());
        Ok(())
    }
}

/// In-memory tag repository
#[derive(Default)]
pub struct InMemoryTagRepository {
    tags: RwLock<HashMap<String, Tag>>,
}

impl InMemoryTagRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Tag>, RepositoryError> {
        let tags = self.tags.read().unwrap();
        Ok(tags.get(id.as_str()).cloned())
    }

    async fn of_type(&self, content_type: ContentType) -> Result<Vec<Tag>, RepositoryError> {
        let tags = self.tags.read().unwrap();
        let mut matching: Vec<Tag> = tags
            .values()
            .filter(|t| t.tag_type == content_type)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matching)
    }

    async fn save(&self, tag: &Tag) -> Result<(), RepositoryError> {
        let mut tags = self.tags.write().unwrap();
        tags.insert(tag.id.to_string(), tag.clone());
        Ok(())
    }
}

/// In-memory form repository
#[derive(Default)]
pub struct InMemoryFormRepository {
    forms: RwLock<HashMap<String, Form>>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Form>, RepositoryError> {
        let forms = self.forms.read().unwrap();
        Ok(forms.get(id.as_str()).cloned())
    }

    async fn submissions_for(
        &self,
        form_id: &EntityId,
    ) -> Result<Vec<FormSubmission>, RepositoryError> {
        let forms = self.forms.read().unwrap();
        forms
            .get(form_id.as_str())
            .map(|f| f.submissions.clone())
            .ok_or(RepositoryError::NotFound)
    }

    async fn save(&self, form: &Form) -> Result<(), RepositoryError> {
        let mut forms = self.forms.write().unwrap();
        forms.insert(form.id.to_string(), form.clone());
        Ok(())
    }
}

/// In-memory integration repository
#[derive(Default)]
pub struct InMemoryIntegrationRepository {
    integrations: RwLock<HashMap<String, Integration>>,
}

impl InMemoryIntegrationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IntegrationRepository for InMemoryIntegrationRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Integration>, RepositoryError> {
        let integrations = self.integrations.read().unwrap();
        Ok(integrations.get(id.as_str()).cloned())
    }

    async fn save(&self, integration: &Integration) -> Result<(), RepositoryError> {
        let mut integrations = self.integrations.write().unwrap();
        integrations.insert(integration.id.to_string(), integration.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_customer_repository_save_and_find() {
        let repo = InMemoryCustomerRepository::new();

        let mut customer = Customer::new();
        customer.first_name = Some("Jane".into());
        repo.save(&customer).await.unwrap();

        let found = repo.find_by_id(&customer.id).await.unwrap();
        assert_eq!(found.unwrap().first_name.as_deref(), Some("Jane"));

        repo.delete(&customer.id).await.unwrap();
        assert!(repo.find_by_id(&customer.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_segments_of_type_filters_by_content_type() {
        let repo = InMemorySegmentRepository::new();

        repo.save(&Segment::new("Customers", ContentType::Customer))
            .await
            .unwrap();
        repo.save(&Segment::new("Companies", ContentType::Company))
            .await
            .unwrap();

        let customer_segments = repo.of_type(ContentType::Customer).await.unwrap();
        assert_eq!(customer_segments.len(), 1);
        assert_eq!(customer_segments[0].name, "Customers");
    }

    #[tokio::test]
    async fn test_tags_of_type_filters_by_content_type() {
        let repo = InMemoryTagRepository::new();

        repo.save(&Tag::new("vip", ContentType::Customer)).await.unwrap();
        repo.save(&Tag::new("enterprise", ContentType::Company))
            .await
            .unwrap();

        let customer_tags = repo.of_type(ContentType::Customer).await.unwrap();
        assert_eq!(customer_tags.len(), 1);
        assert_eq!(customer_tags[0].name, "vip");
    }

    #[tokio::test]
    async fn test_form_submissions_for_unknown_form_is_not_found() {
        let repo = InMemoryFormRepository::new();
        let missing = repo.submissions_for(&EntityId::new()).await;
        assert!(matches!(missing, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_form_submissions_round_trip() {
        let repo = InMemoryFormRepository::new();

        let mut form = Form::new("Contact us");
        form.record_submission(EntityId::new(), Utc::now());
        repo.save(&form).await.unwrap();

        let submissions = repo.submissions_for(&form.id).await.unwrap();
        assert_eq!(submissions.len(), 1);
    }
}
