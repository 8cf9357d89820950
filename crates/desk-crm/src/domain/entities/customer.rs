//! Customer entity
//!
//! The primary record the segmentation engine resolves. Customers are
//! mutated by sync and manual edits elsewhere; the engine only reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::events::{CustomerEvent, DomainEvent};
use crate::domain::value_objects::{Email, EntityId, Phone};

/// Customer record
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: EntityId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<Phone>,
    /// Whether this record corresponds to a registered user rather
    /// than an anonymous visitor
    pub is_user: bool,
    pub tag_ids: Vec<EntityId>,
    pub company_ids: Vec<EntityId>,
    /// Integration this record was synced in from, if any
    pub integration_id: Option<EntityId>,
    pub owner_id: Option<EntityId>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub internal_notes: Option<String>,
    /// Contact details captured from an anonymous visitor session
    pub visitor_contact_info: Option<VisitorContactInfo>,
    pub custom_fields_data: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact info captured before a visitor identifies themselves
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Customer {
    /// Create a new customer record
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(),
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            is_user: false,
            tag_ids: vec![],
            company_ids: vec![],
            integration_id: None,
            owner_id: None,
            position: None,
            department: None,
            internal_notes: None,
            visitor_contact_info: None,
            custom_fields_data: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            (None, None) => String::new(),
        }
    }

    pub fn has_tag(&self, tag_id: &EntityId) -> bool {
        self.tag_ids.contains(tag_id)
    }

    /// Attach a tag; duplicates are ignored
    pub fn add_tag(&mut self, tag_id: EntityId) -> Option<DomainEvent> {
        if self.has_tag(&tag_id) {
            return None;
        }
        self.tag_ids.push(tag_id.clone());
        self.touch();
        Some(DomainEvent::Customer(CustomerEvent::Tagged {
            customer_id: self.id.clone(),
            tag_id,
        }))
    }

    pub fn remove_tag(&mut self, tag_id: &EntityId) {
        self.tag_ids.retain(|t| t != tag_id);
        self.touch();
    }

    /// Is this record owned by an integration sync rather than created
    /// directly in the workspace?
    pub fn is_integration_owned(&self) -> bool {
        self.integration_id.is_some()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Customer {
    fn default() -> Self {
        Self::new()
    }
}
