//! Domain Events
//!
//! Events raised by entities to communicate state changes to
//! surrounding collaborators (sync, notifications). The segmentation
//! engine never raises events; it is read-only.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{ContentType, EntityId};

/// All domain events in the CRM bounded context
#[derive(Clone, Debug)]
pub enum DomainEvent {
    Customer(CustomerEvent),
    Segment(SegmentEvent),
}

/// Customer-related domain events
#[derive(Clone, Debug)]
pub enum CustomerEvent {
    Created {
        customer_id: EntityId,
        created_at: DateTime<Utc>,
    },

    Tagged {
        customer_id: EntityId,
        tag_id: EntityId,
    },

    Merged {
        primary_customer_id: EntityId,
        merged_customer_id: EntityId,
    },
}

/// Segment-related domain events
#[derive(Clone, Debug)]
pub enum SegmentEvent {
    Created {
        segment_id: EntityId,
        content_type: ContentType,
        created_at: DateTime<Utc>,
    },
}
