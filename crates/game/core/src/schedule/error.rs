use crate::error::{ErrorSeverity, GameError};

/// Construction-time contract violations for deferred actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleError {
    #[error("deferred action requires a target")]
    MissingTarget,

    #[error("deferred action requires a resolution context")]
    MissingContext,
}

impl GameError for ScheduleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Contract
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScheduleError::MissingTarget => "SCHEDULE_MISSING_TARGET",
            ScheduleError::MissingContext => "SCHEDULE_MISSING_CONTEXT",
        }
    }
}
