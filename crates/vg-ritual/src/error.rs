use thiserror::Error;
use vg_core::{AgentId, CorpseId};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RitualError {
    #[error("no resurrection window is open for {0}")]
    NoWindow(AgentId),

    #[error("the resurrection window for {0} has expired")]
    Expired(AgentId),

    #[error("corpse {0} was already consumed")]
    AlreadyConsumed(CorpseId),

    #[error("corpse {0} is gone")]
    CorpseGone(CorpseId),

    #[error("{fallen} has {score} essence, ritual needs {threshold}")]
    NotReady { fallen: AgentId, score: u32, threshold: u32 },

    #[error("{0} cannot perform the ritual")]
    PerformerUnfit(AgentId),

    #[error("{performer} is tier {tier}, the ritual needs tier {required}")]
    TierTooLow { performer: AgentId, tier: u8, required: u8 },

    #[error("a ritual for {0} is already in progress")]
    InProgress(AgentId),
}

pub type RitualResult<T> = Result<T, RitualError>;
