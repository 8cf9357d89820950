//! End-to-end customer query scenarios: listing, pagination, filters
//! and facet counts, wired against the in-memory repositories the same
//! way the API binary wires production services.

use std::sync::Arc;

use chrono::Duration;
use desk_crm::infrastructure::persistence::{
    InMemoryCompanyRepository, InMemoryCustomerRepository, InMemoryFormRepository,
    InMemoryIntegrationRepository, InMemorySegmentRepository, InMemoryTagRepository,
};
use desk_crm::{
    Condition, ContentType, Customer, CustomerRepository, Email, EntityId, Form, FormRepository,
    Integration, IntegrationKind, IntegrationRepository, Operator, Phone, Segment,
    SegmentRepository, Tag, TagRepository, ValueKind,
};
use desk_segments::{
    AdHocSegment, CustomerQueryService, FacetCounter, FilterCompiler, FilterRequest,
    SegmentResolver,
};

struct World {
    customers: Arc<InMemoryCustomerRepository>,
    segments: Arc<InMemorySegmentRepository>,
    tags: Arc<InMemoryTagRepository>,
    forms: Arc<InMemoryFormRepository>,
    integrations: Arc<InMemoryIntegrationRepository>,
    query: CustomerQueryService,
    counter: FacetCounter,
    seq: std::sync::atomic::AtomicI64,
}

fn world() -> World {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let companies = Arc::new(InMemoryCompanyRepository::new());
    let segments = Arc::new(InMemorySegmentRepository::new());
    let tags = Arc::new(InMemoryTagRepository::new());
    let forms = Arc::new(InMemoryFormRepository::new());
    let integrations = Arc::new(InMemoryIntegrationRepository::new());

    let resolver = Arc::new(SegmentResolver::new(
        segments.clone(),
        customers.clone(),
        companies,
    ));
    let compiler = Arc::new(FilterCompiler::new(
        resolver.clone(),
        segments.clone(),
        forms.clone(),
    ));
    let query = CustomerQueryService::new(compiler.clone(), customers.clone());
    let counter = FacetCounter::new(
        resolver,
        compiler,
        customers.clone(),
        segments.clone(),
        tags.clone(),
    );

    World {
        customers,
        segments,
        tags,
        forms,
        integrations,
        query,
        counter,
        seq: std::sync::atomic::AtomicI64::new(0),
    }
}

impl World {
    /// Customer factory: distinct creation times keep the default
    /// ordering deterministic.
    async fn customer(&self, build: impl FnOnce(&mut Customer)) -> Customer {
        let mut customer = Customer::new();
        let n = self.seq.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        customer.created_at += Duration::milliseconds(n);
        build(&mut customer);
        self.customers.save(&customer).await.unwrap();
        customer
    }

    async fn plain_customers(&self, n: usize) -> Vec<Customer> {
        let mut seeded = Vec::with_capacity(n);
        for _ in 0..n {
            seeded.push(self.customer(|_| {}).await);
        }
        seeded
    }
}

fn contains(field: &str, value: &str) -> Condition {
    Condition::new(field, Operator::Contains, value, ValueKind::String)
}

#[tokio::test]
async fn customers_paginate_with_defaults() {
    let w = world();
    w.plain_customers(5).await;

    let listed = w
        .query
        .list(&FilterRequest {
            page: Some(1),
            per_page: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(listed.len(), 3);
}

#[tokio::test]
async fn customers_filtered_by_ids() {
    let w = world();
    let keep = w.plain_customers(3).await;
    w.plain_customers(3).await;

    let ids: Vec<EntityId> = keep.iter().map(|c| c.id.clone()).collect();
    let listed = w
        .query
        .list(&FilterRequest {
            ids: Some(ids.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(listed.len(), 3);
    let listed_ids: Vec<&EntityId> = listed.iter().map(|c| &c.id).collect();
    for id in &ids {
        assert!(listed_ids.contains(&id));
    }
}

#[tokio::test]
async fn customers_filtered_by_tag() {
    let w = world();

    let tag = Tag::new("vip", ContentType::Customer);
    w.tags.save(&tag).await.unwrap();

    w.plain_customers(2).await;
    w.customer(|c| c.tag_ids = vec![tag.id.clone()]).await;
    w.customer(|c| c.tag_ids = vec![tag.id.clone()]).await;

    let listed = w
        .query
        .list(&FilterRequest {
            tag_id: Some(tag.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn customers_filtered_by_segment() {
    let w = world();

    w.customer(|c| c.first_name = Some("Jane".into())).await;
    w.customer(|_| {}).await;

    let segment = Segment::new("Janes", ContentType::Customer)
        .with_conditions(vec![contains("firstName", "Jane")]);
    w.segments.save(&segment).await.unwrap();

    let listed = w
        .query
        .list(&FilterRequest {
            segment_id: Some(segment.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].first_name.as_deref(), Some("Jane"));
}

#[tokio::test]
async fn customers_filtered_by_search_value() {
    let w = world();

    let first_name = "Odetta";
    let last_name = "Quigley";
    let email = "ozella_ratke@example.net";
    let phone = "12345678";

    w.customer(|c| c.first_name = Some(first_name.into())).await;
    w.customer(|c| c.last_name = Some(last_name.into())).await;
    w.customer(|c| c.phone = Some(Phone::new(phone))).await;
    w.customer(|c| c.email = Some(Email::new_unchecked(email))).await;

    for (term, check) in [
        (first_name, "first"),
        (last_name, "last"),
        (email, "email"),
        (phone, "phone"),
    ] {
        let listed = w
            .query
            .list(&FilterRequest {
                search_value: Some(term.into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1, "search by {check}");
    }
}

#[tokio::test]
async fn customers_main_returns_page_and_total() {
    let w = world();
    w.plain_customers(4).await;

    let page = w
        .query
        .list_with_count(&FilterRequest {
            page: Some(1),
            per_page: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.list.len(), 3);
    assert_eq!(page.total_count, 4);
}

#[tokio::test]
async fn count_customers_by_segment_and_tag() {
    let w = world();
    w.plain_customers(2).await;

    // Empty-condition facets match the whole population
    w.segments
        .save(&Segment::new("Everyone", ContentType::Customer))
        .await
        .unwrap();
    let tag = Tag::new("all", ContentType::Customer);
    w.tags.save(&tag).await.unwrap();
    w.customer(|c| c.tag_ids = vec![tag.id.clone()]).await;

    let report = w.counter.counts(&FilterRequest::default()).await.unwrap();

    assert_eq!(report.by_segment.len(), 1);
    assert_eq!(report.by_tag.len(), 1);
}

#[tokio::test]
async fn count_by_tag_ignores_company_tags() {
    let w = world();

    let customer_tag = Tag::new("c", ContentType::Customer);
    w.tags.save(&customer_tag).await.unwrap();
    w.tags.save(&Tag::new("co", ContentType::Company)).await.unwrap();

    w.customer(|c| c.tag_ids = vec![customer_tag.id.clone()]).await;
    w.customer(|_| {}).await;

    let report = w.counter.counts(&FilterRequest::default()).await.unwrap();
    assert_eq!(report.by_tag.len(), 1);
}

#[tokio::test]
async fn count_by_segment_ignores_company_segments() {
    let w = world();
    w.plain_customers(2).await;

    w.segments
        .save(&Segment::new("Customers", ContentType::Customer))
        .await
        .unwrap();
    w.segments
        .save(&Segment::new("Companies", ContentType::Company))
        .await
        .unwrap();

    let report = w.counter.counts(&FilterRequest::default()).await.unwrap();
    assert_eq!(report.by_segment.len(), 1);
}

#[tokio::test]
async fn count_by_fake_segment() {
    let w = world();
    w.customer(|c| c.last_name = Some("Smith".into())).await;

    let request = FilterRequest {
        fake_segment: Some(AdHocSegment {
            content_type: ContentType::Customer,
            conditions: vec![contains("lastName", "Smith")],
        }),
        ..Default::default()
    };

    let report = w.counter.counts(&request).await.unwrap();
    assert_eq!(report.by_fake_segment, Some(1));
}

#[tokio::test]
async fn customer_detail() {
    let w = world();
    let customer = w.customer(|_| {}).await;

    let found = w.query.find(&customer.id).await.unwrap();
    assert_eq!(found.id, customer.id);
}

#[tokio::test]
async fn customers_filtered_by_submitted_form() {
    let w = world();

    let customer = w.customer(|_| {}).await;
    let mut form = Form::new("Pricing");
    form.record_submission(customer.id.clone(), chrono::Utc::now());
    w.forms.save(&form).await.unwrap();

    let other = w.customer(|_| {}).await;
    let mut wider_form = Form::new("Signup");
    wider_form.record_submission(other.id.clone(), chrono::Utc::now());
    wider_form.record_submission(customer.id.clone(), chrono::Utc::now());
    w.forms.save(&wider_form).await.unwrap();

    let page = w
        .query
        .list_with_count(&FilterRequest {
            form_id: Some(form.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.list.len(), 1);

    let page = w
        .query
        .list_with_count(&FilterRequest {
            form_id: Some(wider_form.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.list.len(), 2);
}

#[tokio::test]
async fn customers_filtered_by_form_with_date_window() {
    let w = world();

    let c0 = w.customer(|_| {}).await;
    let c1 = w.customer(|_| {}).await;
    let c2 = w.customer(|_| {}).await;

    let start = desk_segments::condition::parse_date("2018-04-03 10:00").unwrap();

    let mut form = Form::new("Survey");
    form.record_submission(c0.id.clone(), start + Duration::days(5));
    form.record_submission(c1.id.clone(), start + Duration::days(20));
    form.record_submission(c2.id.clone(), start + Duration::hours(1));
    w.forms.save(&form).await.unwrap();

    let narrow = w
        .query
        .list_with_count(&FilterRequest {
            form_id: Some(form.id.clone()),
            start_date: Some("2018-04-03 10:00".into()),
            end_date: Some("2018-04-03 18:00".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(narrow.list.len(), 1);

    let wide = w
        .query
        .list_with_count(&FilterRequest {
            form_id: Some(form.id.clone()),
            start_date: Some("2018-04-03 10:00".into()),
            end_date: Some("2018-04-28 18:00".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(wide.list.len(), 3);
}

#[tokio::test]
async fn default_selector_excludes_integration_owned_customers() {
    let w = world();

    let integration = Integration::new("Messenger", IntegrationKind::Messenger);
    w.integrations.save(&integration).await.unwrap();
    w.customer(|c| c.integration_id = Some(integration.id.clone())).await;
    w.plain_customers(2).await;

    let page = w
        .query
        .list_with_count(&FilterRequest::default())
        .await
        .unwrap();

    assert_eq!(page.list.len(), 2);
}
