//! skirmish — a small end-to-end run of the vigil core over `MemoryHost`.
//!
//! One authority and four followers live together long enough for devotion
//! to build up.  Raiders then strike the authority every few hours: guardians
//! absorb what they can, followers answer, and once the authority falls the
//! followers gather corpses and raise it again.
//!
//! Run with `RUST_LOG=debug` to see every decision the core makes.  Pass a
//! path to a TOML file as the first argument to override the defaults.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vg_ability::Ability;
use vg_core::{AgentId, CorpseId, Position, TICKS_PER_HOUR};
use vg_host::{CorpseInfo, DamageEvent, Host, MemoryHost, MemoryHostBuilder, StatusKind};
use vg_sim::{Engine, EngineBuilder, EngineConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const AUTHORITY:     AgentId = AgentId(0);
const FOLLOWERS:     [AgentId; 4] = [AgentId(1), AgentId(2), AgentId(3), AgentId(4)];
const RAIDERS:       [AgentId; 2] = [AgentId(5), AgentId(6)];
const LETHAL_DAMAGE: f32 = 100.0;
const RAID_HIT:      f32 = 35.0;
const RAID_TICKS:    u64 = 12 * TICKS_PER_HOUR;

// ── Scene ─────────────────────────────────────────────────────────────────────

fn build_world() -> MemoryHost {
    let mut builder = MemoryHostBuilder::new(7)
        .authority(AUTHORITY)
        .bounds(Position::new(-40.0, -40.0), Position::new(40.0, 40.0));
    for (i, &f) in FOLLOWERS.iter().enumerate() {
        let angle = i as f32 * std::f32::consts::FRAC_PI_2;
        builder = builder
            .at(f, Position::new(4.0 * angle.cos(), 4.0 * angle.sin()))
            .morale(f, 0.7)
            .status(f, StatusKind::Bonded);
    }
    for (i, &r) in RAIDERS.iter().enumerate() {
        builder = builder.at(r, Position::new(-3.0, i as f32)).faction(r, 1);
    }
    let mut host = builder.build();
    // A hare, a deer and a raider's body: 10 + 20 + 30 essence.
    host.add_corpse(CorpseId(0), CorpseInfo { humanlike: false, body_size: 0.3 });
    host.add_corpse(CorpseId(1), CorpseInfo { humanlike: false, body_size: 1.4 });
    host.add_corpse(CorpseId(2), CorpseInfo { humanlike: true, body_size: 1.0 });
    host
}

/// Run the engine's own tick loop for `n` ticks (progression and duty checks).
fn settle(engine: &mut Engine<MemoryHost>, host: &mut MemoryHost, n: u64) -> Result<()> {
    engine.run_ticks(host, n, &mut vg_sim::NoopObserver)?;
    Ok(())
}

/// One host tick as a real host would drive it: tick start, then status
/// callbacks, then any damage dealt this tick.
fn host_tick(engine: &mut Engine<MemoryHost>, host: &mut MemoryHost, hits: &[DamageEvent]) {
    let now = engine.now();
    engine.begin_tick(host, now);
    for agent in host.agent_ids().collect::<Vec<_>>() {
        for kind in StatusKind::ALL {
            if host.has_status(agent, kind) {
                engine.tick_status(&*host, agent, kind);
            }
        }
    }
    for hit in hits {
        let amount = engine.intercept(host, hit).amount();
        host.damage_taken[hit.victim.0 as usize] += amount;
        engine.after_damage(host, hit);

        let alive = host.view(hit.victim).is_some_and(|v| v.alive);
        if alive && host.damage_taken[hit.victim.0 as usize] >= LETHAL_DAMAGE {
            host.kill(hit.victim);
            engine.on_agent_died(host, hit.victim);
            info!(agent = %hit.victim, tick = %now, "agent fell");
        }
    }
    engine.clock.advance();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig { seed: 42, ..EngineConfig::default() },
    };
    let mut engine: Engine<MemoryHost> = EngineBuilder::new(config).build()?;
    let mut host = build_world();

    // ── Household ─────────────────────────────────────────────────────────
    for &f in &FOLLOWERS {
        engine.assign_overseer(&host, f, Some(AUTHORITY));
    }
    engine.add_progress(FOLLOWERS[0], 0.55)?;
    engine.add_progress(FOLLOWERS[1], 0.58)?;
    settle(&mut engine, &mut host, 4 * TICKS_PER_HOUR * 24)?;

    for &f in &FOLLOWERS {
        info!(agent = %f, tier = engine.tier(f), severity = engine.severity(f), "after settling");
    }
    for &f in &FOLLOWERS[..2] {
        match engine.assign_guardian(&host, f, AUTHORITY) {
            Ok(_) => info!(guardian = %f, "on guard duty"),
            Err(err) => info!(guardian = %f, %err, "not fit for guard duty"),
        }
    }
    info!(power = engine.power(20.0, 5.0), "smite power");

    // ── Raid ──────────────────────────────────────────────────────────────
    let raid_start = engine.now();
    while engine.now().since(raid_start) < RAID_TICKS {
        let hits: Vec<DamageEvent> = if engine.now().0 % TICKS_PER_HOUR == 0 {
            RAIDERS.iter().map(|&r| DamageEvent::melee(AUTHORITY, r, RAID_HIT)).collect()
        } else {
            Vec::new()
        };
        host_tick(&mut engine, &mut host, &hits);
        if !host.alive[AUTHORITY.0 as usize] {
            break;
        }
    }
    info!(
        authority_damage = host.damage_taken[0],
        guardian_ready = engine.is_ready(FOLLOWERS[0], Ability::Guard),
        "raid over"
    );

    // ── Resurrection ──────────────────────────────────────────────────────
    if !host.alive[AUTHORITY.0 as usize] {
        for c in 0..3 {
            if engine.can_ritual(AUTHORITY) {
                break;
            }
            let score = engine.deliver_corpse(&host, AUTHORITY, CorpseId(c))?;
            info!(corpse = c, score, "corpse delivered");
        }
        let performer = FOLLOWERS
            .into_iter()
            .find(|&f| host.view(f).is_some_and(|v| v.can_act()) && engine.tier(f) >= 3);
        if let Some(performer) = performer {
            let until = engine.begin_ritual(&host, AUTHORITY, performer)?;
            while engine.now() <= until.offset(2) {
                host_tick(&mut engine, &mut host, &[]);
            }
        }
        host.damage_taken[0] = 0.0;
    }

    let saved = engine.save().to_json()?;
    info!(
        alive = host.alive[0],
        notifications = host.notifications.len(),
        saved_bytes = saved.len(),
        at = %engine.now(),
        "done"
    );
    Ok(())
}
