//! Tag entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ContentType, EntityId};

/// Typed label attached to customers or companies
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub tag_type: ContentType,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: impl Into<String>, tag_type: ContentType) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            tag_type,
            color: None,
            created_at: Utc::now(),
        }
    }
}
