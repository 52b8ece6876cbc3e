use thiserror::Error;
use vg_core::AgentId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AbilityError {
    #[error("unknown ability {0:?}")]
    UnknownAbility(String),

    #[error("progress amount must be positive, got {amount} for {agent}")]
    NonPositiveProgress { agent: AgentId, amount: f32 },
}

pub type AbilityResult<T> = Result<T, AbilityError>;
