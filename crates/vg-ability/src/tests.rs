//! Unit tests for vg-ability.

use vg_core::{AgentId, Position, Tick};
use vg_host::{Host, MemoryHost, MemoryHostBuilder, Notification, StatusKind};
use vg_tick::{DeferredQueue, RelationshipMap, SnapshotCache};

use crate::{
    tier_for, tier_name, Ability, AbilityError, CooldownConfig, CooldownRegistry,
    ProgressionConfig, ProgressionTracker, TIER_THRESHOLDS,
};

// ── Abilities and tiers ───────────────────────────────────────────────────────

#[cfg(test)]
mod ability_tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Smite".parse::<Ability>(), Ok(Ability::Smite));
        assert_eq!(" guard ".parse::<Ability>(), Ok(Ability::Guard));
        assert_eq!(
            "fireball".parse::<Ability>(),
            Err(AbilityError::UnknownAbility("fireball".into()))
        );
    }

    #[test]
    fn base_durations() {
        assert_eq!(Ability::Smite.base_ticks(), 2_500);
        assert_eq!(Ability::Punish.base_ticks(), 120_000);
        assert_eq!(Ability::Guard.base_ticks(), 5_000);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        let t = &TIER_THRESHOLDS;
        assert_eq!(tier_for(0.0, t), 0);
        assert_eq!(tier_for(0.149, t), 0);
        assert_eq!(tier_for(0.15, t), 1);
        assert_eq!(tier_for(0.35, t), 2);
        assert_eq!(tier_for(0.6, t), 3);
        assert_eq!(tier_for(0.9, t), 4);
        assert_eq!(tier_for(1.0, t), 4);
        assert_eq!(tier_name(3), "Devoted");
    }
}

// ── CooldownRegistry ──────────────────────────────────────────────────────────

#[cfg(test)]
mod cooldown_tests {
    use super::*;

    const A: AgentId = AgentId(1);

    #[test]
    fn absent_entry_is_ready() {
        let reg = CooldownRegistry::new(CooldownConfig::default());
        assert!(reg.is_ready(A, Ability::Calm, Tick(0)));
        assert_eq!(reg.remaining(A, Ability::Calm, Tick(0)), 0);
    }

    #[test]
    fn set_then_expire() {
        let mut reg = CooldownRegistry::new(CooldownConfig::default());
        assert_eq!(reg.set(A, Ability::Calm, 10_000, Tick(100)), Tick(10_100));
        assert!(!reg.is_ready(A, Ability::Calm, Tick(10_099)));
        assert_eq!(reg.remaining(A, Ability::Calm, Tick(10_000)), 100);
        assert!(reg.is_ready(A, Ability::Calm, Tick(10_100)));
        assert_eq!(reg.remaining(A, Ability::Calm, Tick(20_000)), 0);
        // Channels are independent.
        assert!(reg.is_ready(A, Ability::Bless, Tick(200)));
    }

    #[test]
    fn multiplier_scales_and_truncates() {
        let mut reg = CooldownRegistry::new(CooldownConfig { multiplier: 0.5 });
        assert_eq!(reg.trigger(A, Ability::Guard, Tick(0)), Tick(2_500));
        assert_eq!(reg.set(A, Ability::Smite, 3, Tick(0)), Tick(1));
    }

    #[test]
    fn unknown_name_is_a_no_op() {
        let mut reg = CooldownRegistry::new(CooldownConfig::default());
        assert!(!reg.set_named(A, "teleport", 500, Tick(0)));
        assert!(reg.tables().is_empty());
        assert!(reg.set_named(A, "wrath", 500, Tick(0)));
        assert!(!reg.is_ready(A, Ability::Wrath, Tick(499)));
    }

    #[test]
    fn prune_drops_expired_only() {
        let mut reg = CooldownRegistry::new(CooldownConfig::default());
        reg.set(A, Ability::Calm, 10, Tick(0));
        reg.set(AgentId(2), Ability::Calm, 1_000, Tick(0));
        assert_eq!(reg.prune(Tick(10)), 1);
        assert!(!reg.is_ready(AgentId(2), Ability::Calm, Tick(10)));
        reg.reset(AgentId(2), Ability::Calm);
        assert!(reg.is_ready(AgentId(2), Ability::Calm, Tick(10)));
    }
}

// ── ProgressionTracker ────────────────────────────────────────────────────────

#[cfg(test)]
mod progression_tests {
    use super::*;

    const BOSS: AgentId = AgentId(0);
    const SUB: AgentId = AgentId(1);

    fn scene(distance: f32) -> (MemoryHost, SnapshotCache) {
        let host = MemoryHostBuilder::new(2)
            .authority(BOSS)
            .at(SUB, Position::new(distance, 0.0))
            .build();
        let mut rel = RelationshipMap::new();
        rel.assign_overseer(SUB, Some(BOSS));
        let mut cache = SnapshotCache::new();
        cache.rebuild(&host, &rel, |_| 0, Tick(0));
        (host, cache)
    }

    fn fast() -> ProgressionConfig {
        ProgressionConfig { base_rate: 0.1, ..ProgressionConfig::default() }
    }

    #[test]
    fn add_progress_clamps_and_rejects_non_positive() {
        let mut p = ProgressionTracker::new(ProgressionConfig::default());
        assert_eq!(p.add_progress(SUB, 0.4), Ok(0.4));
        assert_eq!(p.add_progress(SUB, 0.9), Ok(1.0));
        assert!(p.add_progress(SUB, 0.0).is_err());
        assert!(p.add_progress(SUB, -1.0).is_err());
        assert!(p.add_progress(SUB, f32::NAN).is_err());
        assert_eq!(p.severity(SUB), 1.0);
        assert_eq!(p.tier(SUB), 4);
    }

    #[test]
    fn grows_only_near_living_overseer() {
        let (mut host, cache) = scene(10.0);
        let mut q = DeferredQueue::new();
        let mut p = ProgressionTracker::new(fast());
        p.evaluate(SUB, &host, &cache, &mut q);
        assert!((p.severity(SUB) - 0.1).abs() < 1e-6);

        host.positions[1] = Position::new(20.0, 0.0);
        p.evaluate(SUB, &host, &cache, &mut q);
        assert!((p.severity(SUB) - 0.1).abs() < 1e-6);

        host.positions[1] = Position::new(1.0, 0.0);
        host.kill(BOSS);
        p.evaluate(SUB, &host, &cache, &mut q);
        assert!((p.severity(SUB) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn dead_agent_does_not_grow_beside_living_overseer() {
        let (mut host, cache) = scene(1.0);
        host.kill(SUB);
        let mut q = DeferredQueue::new();
        let mut p = ProgressionTracker::new(fast());
        for _ in 0..5 {
            p.evaluate(SUB, &host, &cache, &mut q);
        }
        assert_eq!(p.severity(SUB), 0.0);
        assert_eq!(p.tier(SUB), 0);
        assert!(q.is_empty());
    }

    #[test]
    fn bonded_and_high_morale_modifiers_stack() {
        let (mut host, cache) = scene(1.0);
        host.statuses[1].insert(StatusKind::Bonded);
        host.morale[1] = Some(0.8);
        let mut q = DeferredQueue::new();
        let mut p = ProgressionTracker::new(fast());
        p.evaluate(SUB, &host, &cache, &mut q);
        assert!((p.severity(SUB) - 0.1 * 2.0 * 1.2).abs() < 1e-6);
    }

    #[test]
    fn tier_up_notifies_once_after_first_evaluation() {
        let (mut host, cache) = scene(1.0);
        let mut q = DeferredQueue::new();
        let mut p = ProgressionTracker::new(fast());
        p.add_progress(SUB, 0.1).unwrap();

        // First evaluation crosses into tier 1 but only seeds the marker.
        assert_eq!(p.evaluate(SUB, &host, &cache, &mut q), 1);
        assert!(q.is_empty());

        p.add_progress(SUB, 0.2).unwrap();
        assert_eq!(p.evaluate(SUB, &host, &cache, &mut q), 2);
        assert_eq!(q.pending_actions().count(), 1);

        // Staying in tier 2 queues nothing more.
        host.positions[1] = Position::new(50.0, 0.0);
        p.evaluate(SUB, &host, &cache, &mut q);
        assert_eq!(q.pending_actions().count(), 1);

        q.drain_and_apply(&mut host);
        assert_eq!(host.notifications, vec![Notification::TierUp { agent: SUB, tier: 2 }]);
    }

    #[test]
    fn restored_tracker_does_not_replay_tier_ups() {
        let (mut host, cache) = scene(1.0);
        let mut q = DeferredQueue::new();
        let mut p = ProgressionTracker::new(fast());
        p.add_progress(SUB, 0.7).unwrap();

        let mut restored = ProgressionTracker::from_severities(fast(), p.severities().clone());
        assert_eq!(restored.tier(SUB), 3);
        restored.evaluate(SUB, &host, &cache, &mut q);
        q.drain_and_apply(&mut host);
        assert!(host.notifications.is_empty());
        assert!(host.view(SUB).is_some());
    }
}
