//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`ScheduleError`, `CastError`, `StateError`) live
//! next to the code that raises them and implement [`GameError`] so callers
//! can classify them uniformly.
//!
//! Stale state discovered when a deferred action fires is not an error at
//! all: the action is dropped and counted in the tick report.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed later.
    ///
    /// Examples: caster not in the region right now.
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: unknown spell kind, duplicate actor id.
    Validation,

    /// Caller broke a construction contract. Indicates a bug in the caller.
    ///
    /// Examples: scheduling a deferred action without a target.
    Contract,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Contract => "contract",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a caller bug.
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract)
    }
}

/// Common trait for all combat-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and metrics.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
