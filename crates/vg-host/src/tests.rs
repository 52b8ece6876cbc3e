//! Unit tests for vg-host.

use vg_core::{AgentId, CorpseId, Position};

use crate::{
    standard_essence, CorpseInfo, DamageClass, DamageEvent, DamageVerdict, Host, HostError,
    MemoryHost, MemoryHostBuilder, Order, StatusKind,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn three_agents() -> MemoryHost {
    MemoryHostBuilder::new(3)
        .authority(AgentId(0))
        .at(AgentId(1), Position::new(3.0, 4.0))
        .faction(AgentId(2), 1)
        .build()
}

// ── Events ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_tests {
    use super::*;

    #[test]
    fn melee_and_ranged_constructors() {
        let hit = DamageEvent::melee(AgentId(0), AgentId(2), 12.0);
        assert_eq!(hit.class, DamageClass::ExternalViolence);
        assert!(!hit.ranged);
        let shot = DamageEvent::ranged(AgentId(0), AgentId(2), 12.0);
        assert!(shot.ranged);
        assert_eq!(shot.instigator, Some(AgentId(2)));
    }

    #[test]
    fn verdict_amount() {
        assert_eq!(DamageVerdict::Proceed(7.5).amount(), 7.5);
        assert_eq!(DamageVerdict::Suppressed.amount(), 0.0);
    }

    #[test]
    fn essence_table() {
        let human = CorpseInfo { humanlike: true, body_size: 1.0 };
        let boar = CorpseInfo { humanlike: false, body_size: 0.9 };
        let rat = CorpseInfo { humanlike: false, body_size: 0.2 };
        assert_eq!(standard_essence(human), 30);
        assert_eq!(standard_essence(boar), 20);
        assert_eq!(standard_essence(rat), 10);
    }
}

// ── MemoryHost ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory_tests {
    use super::*;

    #[test]
    fn builder_stages_scene() {
        let host = three_agents();
        let view = host.view(AgentId(1)).unwrap();
        assert_eq!(view.position, Position::new(3.0, 4.0));
        assert!(view.can_act());
        assert!(host.view(AgentId(0)).unwrap().authority);
        assert!(host.view(AgentId(9)).is_none());
    }

    #[test]
    fn unavailable_world_fails_live_agents() {
        let mut host = three_agents();
        assert_eq!(host.live_agents().unwrap().len(), 3);
        host.active = false;
        assert_eq!(host.live_agents(), Err(HostError::Unavailable));
    }

    #[test]
    fn despawned_agents_read_as_absent() {
        let mut host = three_agents();
        host.despawn(AgentId(1));
        assert!(host.view(AgentId(1)).is_none());
        assert!(!host.has_status(AgentId(1), StatusKind::Bonded));
        assert_eq!(
            host.attach_status(AgentId(1), StatusKind::Bonded),
            Err(HostError::AgentGone(AgentId(1)))
        );
        assert_eq!(host.live_agents().unwrap(), vec![AgentId(0), AgentId(2)]);
    }

    #[test]
    fn hostility_by_faction_or_override() {
        let mut host = three_agents();
        assert!(host.is_hostile(AgentId(2), AgentId(0)));
        assert!(!host.is_hostile(AgentId(1), AgentId(0)));
        host.mental_override[1] = true;
        assert!(host.is_hostile(AgentId(1), AgentId(0)));
    }

    #[test]
    fn status_attach_detach() {
        let mut host = three_agents();
        host.attach_status(AgentId(1), StatusKind::Bonded).unwrap();
        assert!(host.has_status(AgentId(1), StatusKind::Bonded));
        host.detach_status(AgentId(1), StatusKind::Bonded).unwrap();
        assert!(host.statuses_of(AgentId(1)).is_empty());
    }

    #[test]
    fn dead_agents_reject_orders_until_revived() {
        let mut host = three_agents();
        host.kill(AgentId(0));
        assert!(!host.view(AgentId(0)).unwrap().alive);
        let order = Order::Escort { ward: AgentId(1) };
        assert!(host.issue_order(AgentId(0), order.clone()).is_err());
        host.revive(AgentId(0)).unwrap();
        host.issue_order(AgentId(0), order.clone()).unwrap();
        assert_eq!(host.current_order(AgentId(0)), Some(order));
    }

    #[test]
    fn corpses_are_consumed_once() {
        let mut host = three_agents();
        host.add_corpse(CorpseId(5), CorpseInfo { humanlike: true, body_size: 1.0 });
        assert_eq!(host.corpse_essence(CorpseId(5)), Some(30));
        host.destroy_corpse(CorpseId(5)).unwrap();
        assert_eq!(host.corpse_essence(CorpseId(5)), None);
        assert_eq!(host.destroy_corpse(CorpseId(5)), Err(HostError::CorpseGone(CorpseId(5))));
    }

    #[test]
    fn bounds_limit_standability() {
        let host = MemoryHostBuilder::new(1)
            .bounds(Position::new(0.0, 0.0), Position::new(10.0, 10.0))
            .build();
        assert!(host.is_standable(Position::new(5.0, 5.0)));
        assert!(!host.is_standable(Position::new(-1.0, 5.0)));
    }
}
