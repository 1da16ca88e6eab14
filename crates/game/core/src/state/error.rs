//! Actor store errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, RegionId};

/// Errors raised when adding or removing actors from a region's store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// An actor with this id is already present.
    #[error("actor {0} is already present")]
    DuplicateActor(EntityId),

    /// No actor with this id is present.
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    /// The actor belongs to another region.
    #[error("actor {actor} belongs to {actual}, not {expected}")]
    WrongRegion {
        actor: EntityId,
        expected: RegionId,
        actual: RegionId,
    },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::DuplicateActor(_) | StateError::WrongRegion { .. } => {
                ErrorSeverity::Validation
            }
            StateError::ActorNotFound(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::DuplicateActor(_) => "STATE_DUPLICATE_ACTOR",
            StateError::ActorNotFound(_) => "STATE_ACTOR_NOT_FOUND",
            StateError::WrongRegion { .. } => "STATE_WRONG_REGION",
        }
    }
}
