//! Tunables for guardian interception, deflection and cover search.

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GuardConfig {
    /// Maximum guardian-to-victim distance for a block.
    pub radius:            f32,
    /// Lowest progression tier allowed on guard duty.
    pub min_tier:          u8,
    /// Share of a blocked hit the guardian takes itself.
    pub redirect_fraction: f32,
    /// Redirected damage below this is dropped.
    pub redirect_floor:    f32,
    /// Ticks between guard-duty revalidations of one guardian.
    pub recheck_interval:  u64,

    // ── Deflection (ranged hits on the authority) ─────────────────────────
    pub deflect_base:      f32,
    /// Added per live subordinate of the victim.
    pub deflect_per_subordinate: f32,
    pub deflect_cap:       f32,

    // ── Cover search ──────────────────────────────────────────────────────
    pub cover_min:         f32,
    pub cover_ideal:       f32,
    pub cover_max:         f32,
    pub cover_samples:     usize,
    /// Guardians farther than this from the victim get an escort order when
    /// no covering point is found.
    pub escort_distance:   f32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            radius:            15.0,
            min_tier:          3,
            redirect_fraction: 0.2,
            redirect_floor:    1.0,
            recheck_interval:  60,
            deflect_base:      0.2,
            deflect_per_subordinate: 0.05,
            deflect_cap:       0.8,
            cover_min:         5.0,
            cover_ideal:       8.0,
            cover_max:         12.0,
            cover_samples:     50,
            escort_distance:   10.0,
        }
    }
}

impl GuardConfig {
    /// Deflection chance for an authority with `subordinates` live followers.
    pub fn deflect_chance(&self, subordinates: usize) -> f32 {
        (self.deflect_base + subordinates as f32 * self.deflect_per_subordinate)
            .min(self.deflect_cap)
            .max(0.0)
    }
}
