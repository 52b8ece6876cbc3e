use thiserror::Error;
use vg_core::{AgentId, CorpseId};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    #[error("no active world")]
    Unavailable,

    #[error("agent {0} is gone")]
    AgentGone(AgentId),

    #[error("corpse {0} is gone")]
    CorpseGone(CorpseId),

    #[error("host rejected command: {0}")]
    Rejected(String),
}

pub type HostResult<T> = Result<T, HostError>;
