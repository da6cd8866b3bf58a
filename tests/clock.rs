mod tests {
    use embassy_time::{Duration, Instant};
    use ornament_sky::clock::{
        ClockReading, ClockSource, SyncedClock, TimeUnavailable, wrap_minutes,
    };

    #[test]
    fn test_unsynced_clock_is_unavailable() {
        let clock = SyncedClock::new();
        assert!(!clock.is_synced());
        assert_eq!(clock.read(Instant::from_millis(5_000)), Err(TimeUnavailable));
    }

    #[test]
    fn test_synced_clock_advances_and_wraps() {
        let mut clock = SyncedClock::new();
        let synced_at = Instant::from_millis(10_000);
        clock.sync(23 * 3600 + 59 * 60 + 30, synced_at);

        assert_eq!(clock.read(synced_at), Ok(ClockReading::new(23, 59)));
        assert_eq!(
            clock.read(synced_at + Duration::from_secs(30)),
            Ok(ClockReading::new(0, 0))
        );
        assert_eq!(
            clock.read(synced_at + Duration::from_secs(90 * 60)),
            Ok(ClockReading::new(1, 29))
        );
    }

    #[test]
    fn test_clear_forgets_sync() {
        let mut clock = SyncedClock::new();
        clock.sync(3600, Instant::from_millis(0));
        clock.clear();
        assert_eq!(clock.read(Instant::from_millis(0)), Err(TimeUnavailable));
    }

    #[test]
    fn test_clock_source_by_reference() {
        let mut clock = SyncedClock::new();
        clock.sync(8 * 3600, Instant::from_millis(0));
        let shared = &clock;
        assert_eq!(
            shared.read(Instant::from_millis(0)),
            Ok(ClockReading::new(8, 0))
        );
    }

    #[test]
    fn test_wrap_minutes() {
        assert_eq!(ClockReading::from_minutes(wrap_minutes(1440 + 5)), ClockReading::new(0, 5));
        assert_eq!(ClockReading::from_minutes(wrap_minutes(-10)), ClockReading::new(23, 50));
        assert_eq!(wrap_minutes(0), 0);
        assert_eq!(wrap_minutes(-1440), 0);
    }

    #[test]
    fn test_reading_helpers() {
        let reading = ClockReading::new(7, 5);
        assert_eq!(reading.minutes(), 425);
        assert_eq!(format!("{reading}"), "07:05");
        assert!((reading.fractional_hour() - (7.0 + 5.0 / 60.0)).abs() < 1e-5);
        assert_eq!(ClockReading::new(25, 0), ClockReading::new(1, 0));
    }
}
