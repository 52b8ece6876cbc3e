//! Unit tests for vg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, CorpseId};

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(CorpseId(100) > CorpseId(99));
    }

    #[test]
    fn none_sentinel_is_max() {
        assert_eq!(AgentId::NONE.0, u32::MAX);
        assert!(!AgentId::NONE.is_some());
        assert!(AgentId(3).is_some());
        assert_eq!(AgentId::default(), AgentId::NONE);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(CorpseId::from(2).to_string(), "CorpseId(2)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn distance_and_radius() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert!(a.within(b, 5.0));
        assert!(!a.within(b, 4.9));
    }

    #[test]
    fn direction_of_coincident_points_is_none() {
        let p = Position::new(2.0, 2.0);
        assert!(p.direction_to(p).is_none());
        let dir = p.direction_to(Position::new(2.0, 12.0)).unwrap();
        assert!((dir.0).abs() < 1e-6 && (dir.1 - 1.0).abs() < 1e-6);
        assert_eq!(p.step(dir, 3.0), Position::new(2.0, 5.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{AgentId, SimClock, Tick, TICKS_PER_DAY};

    #[test]
    fn tick_arithmetic_saturates() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(10) - Tick(15), 0u64);
        assert_eq!(Tick(u64::MAX).offset(1), Tick(u64::MAX));
    }

    #[test]
    fn interval_fires_once_per_period() {
        let agent = AgentId(17);
        let hits = (0..251u64)
            .filter(|&t| Tick(t).is_interval_for(agent, 251))
            .count();
        assert_eq!(hits, 1);
        assert!(Tick(5).is_interval_for(agent, 1));
    }

    #[test]
    fn clock_sync_never_goes_backwards() {
        let mut clock = SimClock::new(Tick(100));
        clock.sync(Tick(50));
        assert_eq!(clock.current_tick, Tick(100));
        clock.sync(Tick(TICKS_PER_DAY + 2_500));
        assert_eq!(clock.day_hour(), (1, 1));
        clock.advance();
        assert_eq!(clock.current_tick, Tick(TICKS_PER_DAY + 2_501));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn gen_bool_clamps() {
        let mut r = SimRng::new(1);
        assert!(r.gen_bool(2.0));
        assert!(!r.gen_bool(-1.0));
    }
}
