use crate::error::{ErrorSeverity, GameError};
use crate::schedule::ScheduleError;
use crate::spell::SpellId;
use crate::state::EntityId;

/// Errors raised when a cast cannot be turned into a scheduled action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastError {
    #[error("spell {0} is not in the spell book")]
    UnknownSpell(SpellId),

    #[error("caster {0} is not in this region")]
    CasterNotFound(EntityId),

    #[error("caster {0} is not active")]
    CasterInactive(EntityId),

    #[error("target {0} is not in this region")]
    TargetNotFound(EntityId),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CastError::UnknownSpell(_) => ErrorSeverity::Validation,
            CastError::CasterNotFound(_)
            | CastError::CasterInactive(_)
            | CastError::TargetNotFound(_) => ErrorSeverity::Recoverable,
            CastError::Schedule(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CastError::UnknownSpell(_) => "CAST_UNKNOWN_SPELL",
            CastError::CasterNotFound(_) => "CAST_CASTER_NOT_FOUND",
            CastError::CasterInactive(_) => "CAST_CASTER_INACTIVE",
            CastError::TargetNotFound(_) => "CAST_TARGET_NOT_FOUND",
            CastError::Schedule(inner) => inner.error_code(),
        }
    }
}
