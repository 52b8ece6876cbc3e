use thiserror::Error;
use vg_core::AgentId;
use vg_host::HostError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GuardError {
    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("damage amount {0} is not finite")]
    NonFiniteDamage(f32),

    #[error("{guardian} is tier {tier}, guard duty needs tier {required}")]
    TierTooLow { guardian: AgentId, tier: u8, required: u8 },

    #[error("{0} cannot guard itself")]
    SelfGuard(AgentId),

    #[error("{0} is not alive")]
    NotAlive(AgentId),
}

pub type GuardResult<T> = Result<T, GuardError>;
