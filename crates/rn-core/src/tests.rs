//! Unit tests for rn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EventId, NodeId};

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EventId(100) > EventId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u64::MAX);
        assert_eq!(EventId::INVALID.0, u64::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }

    #[test]
    fn from_raw() {
        let id: NodeId = 42u64.into();
        assert_eq!(id, NodeId(42));
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(30.694, -88.043);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(40.7, -74.0);
        let b = GeoPoint::new(40.8, -73.9);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-6);
    }
}

#[cfg(test)]
mod time {
    use crate::{MINUTES_PER_DAY, SimTime};

    #[test]
    fn arithmetic() {
        let t = SimTime(10);
        assert_eq!(t + 5, SimTime(15));
        assert_eq!(t.offset(3), SimTime(13));
        assert_eq!(SimTime(15) - SimTime(10), 5u64);
        assert_eq!(SimTime(15).since(SimTime(10)), 5);
    }

    #[test]
    fn minute_of_day_wraps() {
        assert_eq!(SimTime(0).minute_of_day(), 0);
        assert_eq!(SimTime(90).minute_of_day(), 90);
        assert_eq!(SimTime(MINUTES_PER_DAY + 90).minute_of_day(), 90);
    }

    #[test]
    fn dhm_breakdown() {
        // 1 day, 1 hour, 5 minutes
        let t = SimTime(MINUTES_PER_DAY + 65);
        assert_eq!(t.dhm(), (1, 1, 5));
    }

    #[test]
    fn display() {
        assert_eq!(SimTime(65).to_string(), "T65 (day 0 01:05)");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn child_streams_diverge() {
        let mut root = SimRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b, "child streams should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f64..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        // out-of-range p is clamped, not a panic
        assert!(rng.gen_bool(2.0));
    }
}

#[cfg(test)]
mod transport {
    use crate::TransportMode;

    #[test]
    fn default_is_road() {
        assert_eq!(TransportMode::default(), TransportMode::Road);
    }

    #[test]
    fn display() {
        assert_eq!(TransportMode::Rail.to_string(), "rail");
        assert_eq!(TransportMode::Road.to_string(), "road");
    }
}
