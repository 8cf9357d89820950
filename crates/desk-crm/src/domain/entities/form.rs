//! Form entity and submissions
//!
//! The segmentation engine consumes forms only as a time-bounded
//! membership predicate: "customer X submitted form F within [a, b]".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::EntityId;

/// Lead form
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: EntityId,
    pub title: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub submissions: Vec<FormSubmission>,
    pub created_at: DateTime<Utc>,
}

/// One submission of a form by a customer
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub customer_id: EntityId,
    pub submitted_at: DateTime<Utc>,
}

impl Form {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            title: title.into(),
            code: None,
            description: None,
            submissions: vec![],
            created_at: Utc::now(),
        }
    }

    pub fn record_submission(&mut self, customer_id: EntityId, submitted_at: DateTime<Utc>) {
        self.submissions.push(FormSubmission {
            customer_id,
            submitted_at,
        });
    }
}
