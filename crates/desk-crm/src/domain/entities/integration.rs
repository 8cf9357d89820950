//! Integration entity
//!
//! Minimal: the engine only needs to know whether a customer record is
//! owned by an installed integration, because integration-owned records
//! sit outside the default listing scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::EntityId;

/// Integration kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    Messenger,
    Form,
    Twitter,
    Facebook,
}

/// Installed integration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: EntityId,
    pub name: String,
    pub kind: IntegrationKind,
    pub created_at: DateTime<Utc>,
}

impl Integration {
    pub fn new(name: impl Into<String>, kind: IntegrationKind) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            kind,
            created_at: Utc::now(),
        }
    }
}
