//! Progression tiers.
//!
//! Severity in `[0, 1]` maps onto five tiers through four ascending
//! thresholds.  Tier 0 means "below the first threshold".

/// Lower bounds of tiers 1 through 4.
pub const TIER_THRESHOLDS: [f32; 4] = [0.15, 0.35, 0.60, 0.90];

/// Highest tier whose threshold is `<= severity`.
pub fn tier_for(severity: f32, thresholds: &[f32; 4]) -> u8 {
    thresholds.iter().take_while(|&&t| severity >= t).count() as u8
}

/// Display name of a tier.
pub fn tier_name(tier: u8) -> &'static str {
    match tier {
        4 => "Zealot",
        3 => "Devoted",
        2 => "Faithful",
        1 => "Initiate",
        _ => "None",
    }
}
