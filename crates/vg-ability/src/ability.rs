//! The closed set of cooldown channels.

use std::fmt;
use std::str::FromStr;

use vg_core::TICKS_PER_HOUR;

use crate::AbilityError;

/// One cooldown channel.
///
/// Storage is keyed by this enum, so an unknown channel can only arrive
/// through the string entry points ([`FromStr`],
/// [`CooldownRegistry::set_named`](crate::CooldownRegistry::set_named)), where
/// it is reported instead of panicking.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Ability {
    Smite,
    Calm,
    Bless,
    Wrath,
    Punish,
    /// The guardian's block.  Keyed by the guardian, not the ward.
    Guard,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Smite,
        Ability::Calm,
        Ability::Bless,
        Ability::Wrath,
        Ability::Punish,
        Ability::Guard,
    ];

    /// Cooldown length before the global multiplier is applied.
    pub const fn base_ticks(self) -> u64 {
        match self {
            Ability::Smite  => TICKS_PER_HOUR,
            Ability::Calm   => 10_000,
            Ability::Bless  => 20_000,
            Ability::Wrath  => 60_000,
            Ability::Punish => 120_000,
            Ability::Guard  => 5_000,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Ability::Smite  => "smite",
            Ability::Calm   => "calm",
            Ability::Bless  => "bless",
            Ability::Wrath  => "wrath",
            Ability::Punish => "punish",
            Ability::Guard  => "guard",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ability {
    type Err = AbilityError;

    /// Case-insensitive lookup by [`name`](Ability::name).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ability::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AbilityError::UnknownAbility(s.to_owned()))
    }
}
