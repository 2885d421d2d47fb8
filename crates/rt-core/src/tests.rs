//! Unit tests for rt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{PlatformId, SegmentId, TrainId};

    #[test]
    fn index_and_from() {
        let id = TrainId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(SegmentId::from(7u64), SegmentId(7));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(TrainId::INVALID.0, u32::MAX);
        assert_eq!(SegmentId::INVALID.0, u64::MAX);
        assert!(!PlatformId::default().is_valid());
        assert!(PlatformId(3).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(TrainId(7).to_string(), "TrainId(7)");
        assert_eq!(SegmentId(12).to_string(), "SegmentId(12)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert!(Tick::ZERO < Tick(1));
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(1_000, 50);
        assert_eq!(clock.now_millis(), 1_000);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_millis(), 100);
        assert_eq!(clock.now_millis(), 1_100);
    }

    #[test]
    fn millis_after_truncates_fraction() {
        let clock = SimClock::new(0, 50);
        assert_eq!(clock.millis_after(10_000, 2.0), 10_100);
        assert_eq!(clock.millis_after(10_000, 0.51), 10_025);
    }

    #[test]
    fn clock_display() {
        let mut clock = SimClock::new(0, 50);
        clock.current_tick = Tick(1_200); // 60 s
        assert_eq!(clock.to_string(), "T1200 (00:01:00)");
    }

    #[test]
    fn default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.millis_per_tick, 50);
        assert_eq!(config.dwell_ticks_per_unit, 10);
    }

    #[test]
    fn invalid_acceleration_rejected() {
        let config = SimConfig { acceleration: 0.0, ..SimConfig::default() };
        assert!(config.validate().is_err());
        let config = SimConfig { acceleration: f64::NAN, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_tick_length_rejected() {
        let config = SimConfig { millis_per_tick: 0, ..SimConfig::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, crate::RtError::Config(_)));
        assert_eq!(err.to_string(), "configuration error: millis_per_tick must be > 0");
    }

    #[test]
    fn end_tick_matches_total() {
        let config = SimConfig { total_ticks: 500, ..SimConfig::default() };
        assert_eq!(config.end_tick(), Tick(500));
        assert_eq!(config.make_clock().current_tick, Tick::ZERO);
    }
}

#[cfg(all(test, feature = "serde"))]
mod config_json {
    use crate::SimConfig;

    #[test]
    fn partial_json_fills_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "total_ticks": 1200, "acceleration": 0.02 }"#).unwrap();
        assert_eq!(config.total_ticks, 1200);
        assert_eq!(config.acceleration, 0.02);
        assert_eq!(config.millis_per_tick, 50);
    }
}
