//! Reference essence values for corpses delivered to a resurrection ritual.
//!
//! The essence function belongs to the host (it knows species and size);
//! this table is the default content the reference world uses.

/// Host facts about a corpse that determine its essence.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CorpseInfo {
    pub humanlike: bool,
    /// Relative body size, 1.0 for a human.
    pub body_size: f32,
}

/// Humanlike corpses are worth 30, large animals 20, everything else 10.
pub fn standard_essence(info: CorpseInfo) -> u32 {
    if info.humanlike {
        30
    } else if info.body_size > 0.7 {
        20
    } else {
        10
    }
}
