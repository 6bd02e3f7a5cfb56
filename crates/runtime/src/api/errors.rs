//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, configuration, and move providers
//! so clients can bubble them up with consistent context. Moves that are
//! dropped or rejected are outcomes, not errors.
use thiserror::Error;
use tokio::sync::oneshot;

use stone_core::ConfigError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("move controller command channel closed")]
    CommandChannelClosed,

    #[error("move controller reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("move controller join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("invalid game configuration")]
    Config(#[from] ConfigError),

    #[error("move provider failed: {0}")]
    Provider(String),
}
