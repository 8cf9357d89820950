//! Company entity
//!
//! Target population for company-scoped segments; customers link to
//! companies through `company_ids`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::value_objects::EntityId;

/// Company record
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: EntityId,
    pub name: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<u32>,
    pub plan: Option<String>,
    pub tag_ids: Vec<EntityId>,
    pub custom_fields_data: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(),
            name: None,
            website: None,
            industry: None,
            size: None,
            plan: None,
            tag_ids: vec![],
            custom_fields_data: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_tag(&self, tag_id: &EntityId) -> bool {
        self.tag_ids.contains(tag_id)
    }
}

impl Default for Company {
    fn default() -> Self {
        Self::new()
    }
}
