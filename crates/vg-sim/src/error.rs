use thiserror::Error;
use vg_ability::AbilityError;
use vg_guard::GuardError;
use vg_host::HostError;
use vg_ritual::RitualError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("engine configuration error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("saved state error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("saved state version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error(transparent)]
    Ability(#[from] AbilityError),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Ritual(#[from] RitualError),

    #[error(transparent)]
    Host(#[from] HostError),
}

pub type SimResult<T> = Result<T, SimError>;
