//! Covering-point search.
//!
//! A guardian whose block is still ready should not charge the attacker; it
//! should stand where it can keep shielding the victim while staying out of
//! the line of attack.  Candidates are sampled in a ring around the victim:
//! the first 60 % anywhere on the ring, the rest in a ±60° cone pointing away
//! from the attacker.

use std::f32::consts::{PI, TAU};

use vg_core::{Position, SimRng};

use crate::GuardConfig;

/// Score bonus for a point on the far side of the victim.
const FAR_SIDE_BONUS: f32 = 20.0;

/// Share of samples drawn uniformly around the whole ring.
const RING_SHARE: f32 = 0.6;

/// Best covering point near `victim` away from `attacker`, or `None` if no
/// sampled point is standable.
///
/// Score = distance from attacker × 3 − |distance from victim − ideal| × 2,
/// plus a bonus for the far side.  The first best candidate wins ties.
pub fn find_cover_point<F>(
    victim:      Position,
    attacker:    Position,
    config:      &GuardConfig,
    rng:         &mut SimRng,
    is_standable: F,
) -> Option<Position>
where
    F: Fn(Position) -> bool,
{
    let (lo, hi) = (config.cover_min, config.cover_max);
    if !(lo > 0.0 && hi >= lo) {
        return None;
    }
    let threat = victim.direction_to(attacker);
    let away = threat.map_or(0.0, |(x, y)| (-y).atan2(-x));
    let ring_samples = (config.cover_samples as f32 * RING_SHARE) as usize;

    let mut best: Option<(f32, Position)> = None;
    for i in 0..config.cover_samples {
        let angle = if i < ring_samples || threat.is_none() {
            rng.gen_range(0.0..TAU)
        } else {
            away + rng.gen_range(-PI / 3.0..=PI / 3.0)
        };
        let dist = rng.gen_range(lo..=hi);
        let candidate = victim.step((angle.cos(), angle.sin()), dist);

        let from_victim = victim.distance(candidate);
        if from_victim < lo - 1e-3 || from_victim > hi + 1e-3 || !is_standable(candidate) {
            continue;
        }

        let mut score = candidate.distance(attacker) * 3.0
            - (from_victim - config.cover_ideal).abs() * 2.0;
        if let Some((tx, ty)) = threat {
            let dot = (candidate.x - victim.x) * tx + (candidate.y - victim.y) * ty;
            if dot < 0.0 {
                score += FAR_SIDE_BONUS;
            }
        }

        if best.is_none_or(|(s, _)| score > s) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, p)| p)
}
