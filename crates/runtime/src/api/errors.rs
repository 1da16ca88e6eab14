//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the combat core so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{CastError, ErrorSeverity, GameError, RegionId, StateError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0} is not hosted by this runtime")]
    UnknownRegion(RegionId),

    #[error("{0} is declared more than once")]
    DuplicateRegion(RegionId),

    #[error("worker command channel for {0} closed")]
    CommandChannelClosed(RegionId),

    #[error("region worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("region worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a spell book before building")]
    MissingSpells,

    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::UnknownRegion(_)
            | RuntimeError::DuplicateRegion(_)
            | RuntimeError::MissingSpells => ErrorSeverity::Validation,
            RuntimeError::CommandChannelClosed(_)
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Recoverable,
            RuntimeError::Cast(inner) => inner.severity(),
            RuntimeError::State(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::UnknownRegion(_) => "RUNTIME_UNKNOWN_REGION",
            RuntimeError::DuplicateRegion(_) => "RUNTIME_DUPLICATE_REGION",
            RuntimeError::CommandChannelClosed(_) => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            RuntimeError::MissingSpells => "RUNTIME_MISSING_SPELLS",
            RuntimeError::Cast(inner) => inner.error_code(),
            RuntimeError::State(inner) => inner.error_code(),
        }
    }
}
