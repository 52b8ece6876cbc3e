//! Integration-level tests for vg-sim, driving the engine over `MemoryHost`.

use vg_ability::Ability;
use vg_core::{AgentId, CorpseId, Position, Tick};
use vg_host::{
    CorpseInfo, DamageEvent, DamageVerdict, Host, MemoryHost, MemoryHostBuilder, Notification,
    Order, StatusKind,
};

use crate::{
    Engine, EngineBuilder, EngineConfig, EngineObserver, NoopObserver, SavedState, SimError,
    TickReport, SAVE_VERSION,
};

// ── Fixture ───────────────────────────────────────────────────────────────────

const G: AgentId = AgentId(0);
const S1: AgentId = AgentId(1);
const S2: AgentId = AgentId(2);
const FOE: AgentId = AgentId(3);

fn world() -> MemoryHost {
    MemoryHostBuilder::new(4)
        .authority(G)
        .at(S1, Position::new(3.0, 0.0))
        .at(S2, Position::new(0.0, 6.0))
        .at(FOE, Position::new(-2.0, 0.0))
        .faction(FOE, 1)
        .status(S1, StatusKind::Bonded)
        .status(S2, StatusKind::Bonded)
        .build()
}

fn engine() -> Engine<MemoryHost> {
    EngineBuilder::new(EngineConfig::default()).build().unwrap()
}

/// S1 (tier 3) guards G; S2 is tier 1.  Tables applied by one tick start.
fn household() -> (MemoryHost, Engine<MemoryHost>) {
    let mut host = world();
    let mut e = engine();
    e.assign_overseer(&host, S1, Some(G));
    e.assign_overseer(&host, S2, Some(G));
    e.add_progress(S1, 0.6).unwrap();
    e.add_progress(S2, 0.2).unwrap();
    e.assign_guardian(&host, S1, G).unwrap();
    e.begin_tick(&mut host, Tick(1));
    (host, e)
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            seed = 42

            [cooldown]
            multiplier = 0.5

            [guard]
            redirect_fraction = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.cooldown.multiplier, 0.5);
        assert_eq!(cfg.guard.redirect_fraction, 0.25);
        assert_eq!(cfg.guard.radius, 15.0);
        assert_eq!(cfg.ritual.threshold, 30);
        assert_eq!(cfg.progression.interval, 251);
    }

    #[test]
    fn bad_values_are_rejected() {
        let unordered = "[progression]\nthresholds = [0.5, 0.35, 0.6, 0.9]\n";
        assert!(matches!(EngineConfig::from_toml_str(unordered), Err(SimError::Config(_))));
        let redirect = "[guard]\nredirect_fraction = 1.5\n";
        assert!(matches!(EngineConfig::from_toml_str(redirect), Err(SimError::Config(_))));
        assert!(matches!(EngineConfig::from_toml_str("seed = \"x\""), Err(SimError::Toml(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.toml");
        std::fs::write(&path, "[ritual]\nthreshold = 90\n").unwrap();
        let cfg = EngineConfig::load(&path).unwrap();
        assert_eq!(cfg.ritual.threshold, 90);
        assert!(matches!(EngineConfig::load(dir.path().join("missing.toml")), Err(SimError::Io(_))));
    }
}

// ── Tick protocol ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine_tests {
    use super::*;

    #[test]
    fn queued_mutations_apply_at_next_tick_start() {
        let host = world();
        let mut e = engine();
        e.assign_overseer(&host, S1, Some(G));
        assert!(!host.has_status(S1, StatusKind::Progression));
        assert_eq!(e.cache.overseer_of(S1), None);

        let mut host = host;
        let report = e.begin_tick(&mut host, Tick(1));
        assert_eq!(report.drained.attached, 1);
        assert!(report.fresh);
        assert!(host.has_status(S1, StatusKind::Progression));
        assert_eq!(e.cache.overseer_of(S1), Some(G));
        assert_eq!(e.now(), Tick(1));
    }

    #[test]
    fn guardian_scenario_through_the_engine() {
        let (mut host, mut e) = household();
        assert!(host.has_status(S1, StatusKind::Guardian));
        assert_eq!(e.tier(S1), 3);
        assert_eq!(e.tier(S2), 1);

        let verdict = e.intercept(&mut host, &DamageEvent::melee(G, FOE, 40.0));
        assert_eq!(verdict, DamageVerdict::Suppressed);
        assert_eq!(host.damage_taken[0], 0.0);
        assert!((host.damage_taken[1] - 8.0).abs() < 1e-5);
        assert!(!e.is_ready(S1, Ability::Guard));
        assert_eq!(e.remaining(S1, Ability::Guard), 5_000);

        // The host's post-damage hook is a no-op for an already answered hit.
        assert_eq!(e.after_damage(&mut host, &DamageEvent::melee(G, FOE, 40.0)), 0);

        e.begin_tick(&mut host, Tick(2));
        assert!(host.has_status(S2, StatusKind::CombatReadiness));
        assert!(host.drafted[2]);
        assert_eq!(host.order_of(S2), Some(&Order::Engage { target: FOE }));
    }

    #[test]
    fn unavailable_world_serves_last_snapshot() {
        let (mut host, mut e) = household();
        let population = e.cache.population();
        host.active = false;
        let report = e.begin_tick(&mut host, Tick(2));
        assert!(!report.fresh);
        assert!(e.cache.is_stale());
        assert_eq!(e.cache.population(), population);
        assert_eq!(e.cache.overseer_of(S2), Some(G));
    }

    #[test]
    fn cooldown_commands() {
        let (_, mut e) = household();
        assert_eq!(e.set_cooldown(G, Ability::Smite, Ability::Smite.base_ticks()), Tick(2_501));
        assert!(!e.is_ready(G, Ability::Smite));
        assert!(!e.set_cooldown_named(G, "meteor", 100));
        assert!(e.set_cooldown_named(G, "Calm", 100));
        assert_eq!(e.remaining(G, Ability::Calm), 100);
    }

    #[test]
    fn power_counts_high_tier_followers() {
        let (_, e) = household();
        // S1 is tier 3, S2 tier 1.
        assert!((e.power(20.0, 5.0) - 25.0).abs() < 1e-5);
    }

    #[test]
    fn low_tier_guardian_is_refused() {
        let (host, mut e) = household();
        assert!(matches!(e.assign_guardian(&host, S2, G), Err(SimError::Guard(_))));
    }

    #[derive(Default)]
    struct Counter {
        ticks:     u64,
        callbacks: usize,
        ended_at:  Option<Tick>,
    }

    impl EngineObserver for Counter {
        fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
            self.ticks += 1;
            self.callbacks += report.callbacks;
        }
        fn on_run_end(&mut self, final_tick: Tick) {
            self.ended_at = Some(final_tick);
        }
    }

    #[test]
    fn run_ticks_grows_progression_and_announces_tiers() {
        let mut cfg = EngineConfig::default();
        cfg.progression.interval = 1;
        cfg.progression.base_rate = 0.05;
        let mut e: Engine<MemoryHost> = EngineBuilder::new(cfg).build().unwrap();
        let mut host = world();
        e.assign_overseer(&host, S2, Some(G));
        host.statuses[2].remove(&StatusKind::Bonded);

        let mut counter = Counter::default();
        e.run_ticks(&mut host, 10, &mut counter).unwrap();

        assert_eq!(counter.ticks, 10);
        assert_eq!(counter.callbacks, 10);
        assert_eq!(counter.ended_at, Some(Tick(10)));
        assert!((e.severity(S2) - 0.5).abs() < 1e-4);
        assert_eq!(e.tier(S2), 2);
        assert!(host.notifications.contains(&Notification::TierUp { agent: S2, tier: 1 }));
        assert!(host.notifications.contains(&Notification::TierUp { agent: S2, tier: 2 }));
    }

    #[test]
    fn reattached_progression_seeds_without_announcing() {
        let mut cfg = EngineConfig::default();
        cfg.progression.interval = 1;
        cfg.progression.base_rate = 0.05;
        let mut e: Engine<MemoryHost> = EngineBuilder::new(cfg).build().unwrap();
        let mut host = world();
        host.statuses[2].remove(&StatusKind::Bonded);
        e.assign_overseer(&host, S2, Some(G));
        e.run_ticks(&mut host, 2, &mut NoopObserver).unwrap();
        assert_eq!(e.tier(S2), 0);

        assert_eq!(e.assign_overseer(&host, S2, None), Some(G));
        e.run_ticks(&mut host, 1, &mut NoopObserver).unwrap();
        assert!(!host.has_status(S2, StatusKind::Progression));
        assert!((e.severity(S2) - 0.1).abs() < 1e-4);

        e.add_progress(S2, 0.5).unwrap();
        e.assign_overseer(&host, S2, Some(G));
        e.run_ticks(&mut host, 2, &mut NoopObserver).unwrap();
        assert!(host.has_status(S2, StatusKind::Progression));
        assert!(e.tier(S2) > 0);
        assert!(!host.notifications.iter().any(|n| matches!(n, Notification::TierUp { .. })));
    }

    #[test]
    fn guard_duty_lapses_when_tier_is_lost() {
        let mut cfg = EngineConfig::default();
        cfg.guard.recheck_interval = 1;
        cfg.guard.min_tier = 4;
        let mut e: Engine<MemoryHost> = EngineBuilder::new(cfg).build().unwrap();
        let mut host = world();
        host.statuses[1].insert(StatusKind::Guardian);
        e.relations.assign_guard(S1, G);

        e.run_ticks(&mut host, 2, &mut NoopObserver).unwrap();
        assert_eq!(e.relations.ward_of(S1), None);
        assert!(!host.has_status(S1, StatusKind::Guardian));
    }
}

// ── Resurrection ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod ritual_tests {
    use super::*;

    #[test]
    fn authority_death_to_revival() {
        let (mut host, mut e) = household();
        host.add_corpse(CorpseId(1), CorpseInfo { humanlike: true, body_size: 1.0 });

        host.kill(G);
        e.on_agent_died(&host, G);
        assert_eq!(e.ritual_score(G), 0);
        assert!(!e.can_ritual(G));

        assert_eq!(e.deliver_corpse(&host, G, CorpseId(1)).unwrap(), 30);
        assert!(e.can_ritual(G));
        let until = e.begin_ritual(&host, G, S1).unwrap();

        e.begin_tick(&mut host, Tick(2));
        assert!(host.corpses.is_empty());
        assert_eq!(host.order_of(S1), Some(&Order::PerformRitual { fallen: G, until }));

        let report = e.begin_tick(&mut host, until);
        assert_eq!(report.rituals.completed, vec![(G, S1)]);
        e.begin_tick(&mut host, until.offset(1));
        assert!(host.view(G).unwrap().alive);
        e.begin_tick(&mut host, until.offset(2));
        assert!(host.has_status(G, StatusKind::PostRevivalWeakness));
        assert!(host.has_status(S1, StatusKind::RitualExhaustion));
        assert!(host.has_status(S2, StatusKind::Rallied));
        assert!(!e.can_ritual(G));
    }

    #[test]
    fn ordinary_death_opens_nothing() {
        let (mut host, mut e) = household();
        host.kill(S2);
        e.on_agent_died(&host, S2);
        assert!(e.rituals.windows().is_empty());
    }

    #[test]
    fn ritual_errors_surface_as_sim_errors() {
        let (host, mut e) = household();
        assert!(matches!(e.begin_ritual(&host, G, S1), Err(SimError::Ritual(_))));
        assert!(matches!(e.deliver_corpse(&host, G, CorpseId(7)), Err(SimError::Ritual(_))));
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod persist_tests {
    use super::*;

    #[test]
    fn save_restore_round_trip() {
        let (mut host, mut e) = household();
        e.set_cooldown(S1, Ability::Bless, 20_000);
        host.kill(G);
        e.on_agent_died(&host, G);

        let saved = e.save();
        assert_eq!(saved.version, SAVE_VERSION);
        let text = saved.to_json().unwrap();
        let loaded = SavedState::from_json(&text).unwrap();
        assert_eq!(loaded, saved);

        let restored: Engine<MemoryHost> =
            EngineBuilder::new(EngineConfig::default()).restore(loaded).build().unwrap();
        assert_eq!(restored.now(), Tick(1));
        assert_eq!(restored.tier(S1), 3);
        assert_eq!(restored.relations.overseer_of(S2), Some(G));
        assert_eq!(restored.relations.ward_of(S1), Some(G));
        assert!(!restored.is_ready(S1, Ability::Bless));
        assert!(restored.rituals.window(G).is_some());
        assert!(restored.cache.built_at().is_none());
        assert_eq!(restored.save(), saved);
    }

    #[test]
    fn restored_engine_does_not_replay_tier_ups() {
        let (mut host, e) = household();
        let mut restored: Engine<MemoryHost> = EngineBuilder::new(EngineConfig::default())
            .restore(e.save())
            .build()
            .unwrap();
        let now = restored.now();
        restored.begin_tick(&mut host, now);
        for _ in 0..600 {
            restored.tick_status(&host, S1, StatusKind::Progression);
            restored.clock.advance();
        }
        let next = restored.now();
        restored.begin_tick(&mut host, next);
        assert!(host.notifications.is_empty());
    }

    #[test]
    fn file_round_trip_and_version_check() {
        let (_, e) = household();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        e.save().write(&path).unwrap();
        assert_eq!(SavedState::read(&path).unwrap(), e.save());

        assert!(matches!(
            SavedState::from_json(r#"{"version": 99}"#),
            Err(SimError::UnsupportedVersion { found: 99, expected: SAVE_VERSION })
        ));
        assert!(matches!(SavedState::from_json("not json"), Err(SimError::Json(_))));
    }
}
