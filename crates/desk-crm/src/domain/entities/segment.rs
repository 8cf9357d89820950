//! Segment entity
//!
//! A persisted, named filter definition: an ordered list of conditions
//! (AND semantics) scoped to one content type. A segment may extend
//! another through `sub_of`; the parent's conditions apply in addition
//! to its own. Cycle detection happens at resolve time in the engine;
//! nothing here follows the reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{Condition, ContentType, EntityId};

/// Persisted segment definition
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: EntityId,
    pub name: String,
    pub content_type: ContentType,
    pub description: Option<String>,
    /// Parent segment this one extends, if any
    pub sub_of: Option<EntityId>,
    pub conditions: Vec<Condition>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Segment {
    pub fn new(name: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            content_type,
            description: None,
            sub_of: None,
            conditions: vec![],
            color: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn extending(mut self, parent: EntityId) -> Self {
        self.sub_of = Some(parent);
        self
    }

    /// Validate this definition against its parent at save time.
    ///
    /// Only same-content-type nesting is legal; field-level validation is
    /// intentionally loose because unknown fields fail closed at
    /// evaluation time instead of being rejected here.
    pub fn validate_nesting(&self, parent: &Segment) -> Result<(), SegmentDefinitionError> {
        if parent.content_type != self.content_type {
            return Err(SegmentDefinitionError::ContentTypeMismatch {
                child: self.content_type,
                parent: parent.content_type,
            });
        }
        if parent.id == self.id {
            return Err(SegmentDefinitionError::SelfReference);
        }
        Ok(())
    }
}

/// Save-time validation errors for segment definitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentDefinitionError {
    #[error("segment of type {child} cannot extend a segment of type {parent}")]
    ContentTypeMismatch {
        child: ContentType,
        parent: ContentType,
    },
    #[error("segment cannot extend itself")]
    SelfReference,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Operator, ValueKind};

    #[test]
    fn test_nesting_rejects_cross_type_parent() {
        let parent = Segment::new("Companies", ContentType::Company);
        let child = Segment::new("Customers", ContentType::Customer).extending(parent.id.clone());

        assert!(matches!(
            child.validate_nesting(&parent),
            Err(SegmentDefinitionError::ContentTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_nesting_rejects_self_reference() {
        let mut segment = Segment::new("Loop", ContentType::Customer);
        segment.sub_of = Some(segment.id.clone());

        let clone = segment.clone();
        assert_eq!(
            segment.validate_nesting(&clone),
            Err(SegmentDefinitionError::SelfReference)
        );
    }

    #[test]
    fn test_builder_carries_conditions() {
        let segment = Segment::new("Janes", ContentType::Customer).with_conditions(vec![
            Condition::new("firstName", Operator::Contains, "jane", ValueKind::String),
        ]);
        assert_eq!(segment.conditions.len(), 1);
    }
}
