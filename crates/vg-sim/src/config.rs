//! `EngineConfig` — every tunable of the core in one place.
//!
//! Each section belongs to the crate that uses it; this struct only
//! aggregates them so a host can load everything from one TOML file.  Every
//! field has a default, so a file only needs to name what it changes:
//!
//! ```toml
//! seed = 42
//! power_multiplier = 1.5
//!
//! [cooldown]
//! multiplier = 0.5
//!
//! [guard]
//! redirect_fraction = 0.25
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use vg_ability::{CooldownConfig, ProgressionConfig};
use vg_guard::GuardConfig;
use vg_ritual::RitualConfig;

use crate::{SimError, SimResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed of the engine RNG (deflection rolls, cover sampling).
    pub seed:             u64,
    /// Global scale on ability power.
    pub power_multiplier: f32,
    pub progression:      ProgressionConfig,
    pub cooldown:         CooldownConfig,
    pub guard:            GuardConfig,
    pub ritual:           RitualConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed:             0,
            power_multiplier: 1.0,
            progression:      ProgressionConfig::default(),
            cooldown:         CooldownConfig::default(),
            guard:            GuardConfig::default(),
            ritual:           RitualConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject values the core cannot work with.
    pub fn validate(&self) -> SimResult<()> {
        let p = &self.progression;
        if !p.thresholds.windows(2).all(|w| w[0] < w[1])
            || p.thresholds[0] <= 0.0
            || p.thresholds[3] > 1.0
        {
            return Err(SimError::Config(format!(
                "progression thresholds must ascend within (0, 1], got {:?}",
                p.thresholds
            )));
        }
        if p.interval == 0 {
            return Err(SimError::Config("progression interval must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.guard.redirect_fraction) {
            return Err(SimError::Config(format!(
                "guard redirect fraction must be in [0, 1], got {}",
                self.guard.redirect_fraction
            )));
        }
        if self.guard.cover_min > self.guard.cover_max {
            return Err(SimError::Config("guard cover_min exceeds cover_max".into()));
        }
        if self.cooldown.multiplier < 0.0 || self.power_multiplier < 0.0 {
            return Err(SimError::Config("multipliers must not be negative".into()));
        }
        if self.ritual.duration_ticks == 0 || self.ritual.window_ticks == 0 {
            return Err(SimError::Config("ritual window and duration must be positive".into()));
        }
        Ok(())
    }
}
