//! Engine error type

use desk_crm::{EntityId, RepositoryError};
use thiserror::Error;

/// Errors surfaced by the segmentation engine.
///
/// Malformed conditions are never an error: they fail closed during
/// evaluation so one bad condition degrades its own contribution, not
/// the whole scan.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced segment/tag/form does not exist. Never silently
    /// treated as "no constraint".
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: EntityId },

    /// Segment nesting forms a cycle; there is no valid fixed point.
    #[error("cyclic segment reference at {0}")]
    CyclicSegment(EntityId),

    /// Storage collaborator failure; retries belong to the caller.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The caller-supplied deadline elapsed before all sub-resolutions
    /// completed; in-flight work was cancelled together.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl EngineError {
    pub fn not_found(kind: &'static str, id: &EntityId) -> Self {
        Self::NotFound {
            kind,
            id: id.clone(),
        }
    }
}
