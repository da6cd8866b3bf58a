mod tests {
    use embassy_time::Instant;
    use ornament_sky::sky_time::{
        DEFAULT_SIM_SPEED_SECS, MAX_SIM_SPEED_SECS, MIN_SIM_SPEED_SECS, clamp_sim_speed,
    };
    use ornament_sky::{ClockReading, SkyTimeProvider, SyncedClock, TimeUnavailable};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn unsynced() -> SkyTimeProvider<SyncedClock> {
        SkyTimeProvider::new(SyncedClock::new(), DEFAULT_SIM_SPEED_SECS)
    }

    fn synced_at(hour: u32, minute: u32) -> SkyTimeProvider<SyncedClock> {
        let mut clock = SyncedClock::new();
        clock.sync(hour * 3600 + minute * 60, at(0));
        SkyTimeProvider::new(clock, DEFAULT_SIM_SPEED_SECS)
    }

    #[test]
    fn test_real_clock_passthrough() {
        assert_eq!(unsynced().current_sky_time(at(1_000)), Err(TimeUnavailable));
        assert_eq!(
            synced_at(9, 15).current_sky_time(at(60_000)),
            Ok(ClockReading::new(9, 16))
        );
    }

    #[test]
    fn test_simulation_from_noon_two_seconds_per_hour() {
        let mut time = unsynced();
        time.set_simulation_speed(2.0, at(0));
        time.set_simulation_enabled(true, at(1_000));

        assert_eq!(time.current_sky_time(at(1_000)), Ok(ClockReading::new(12, 0)));
        assert_eq!(time.current_sky_time(at(5_000)), Ok(ClockReading::new(14, 0)));
    }

    #[test]
    fn test_simulation_seeds_from_real_clock() {
        let mut time = synced_at(8, 30);
        time.set_simulation_enabled(true, at(0));
        assert_eq!(time.current_sky_time(at(0)), Ok(ClockReading::new(8, 30)));
        // 10 s per simulated hour: 1 s is 6 simulated minutes
        assert_eq!(time.current_sky_time(at(1_000)), Ok(ClockReading::new(8, 36)));
    }

    #[test]
    fn test_simulation_wraps_past_midnight() {
        let mut time = synced_at(23, 0);
        time.set_simulation_speed(1.0, at(0));
        time.set_simulation_enabled(true, at(0));
        assert_eq!(time.current_sky_time(at(2_000)), Ok(ClockReading::new(1, 0)));
        // A full simulated day later the time repeats
        assert_eq!(time.current_sky_time(at(26_000)), Ok(ClockReading::new(1, 0)));
    }

    #[test]
    fn test_speed_change_keeps_time_continuous() {
        let mut time = unsynced();
        time.set_simulation_enabled(true, at(0));

        let now = at(37_000);
        let before = time.current_sky_time(now);
        assert_eq!(before, Ok(ClockReading::new(15, 42)));

        time.set_simulation_speed(3.0, now);
        assert_eq!(time.current_sky_time(now), before);
        assert_eq!(time.current_sky_time(at(40_000)), Ok(ClockReading::new(16, 42)));
    }

    #[test]
    fn test_repeated_speed_keeps_clock_running() {
        let mut time = unsynced();
        time.set_simulation_speed(60.0, at(0));
        time.set_simulation_enabled(true, at(0));

        for step in 1..=66u64 {
            time.set_simulation_speed(60.0, at(step * 900));
        }
        assert_eq!(time.current_sky_time(at(60_000)), Ok(ClockReading::new(13, 0)));
    }

    #[test]
    fn test_frequent_speed_changes_keep_partial_minutes() {
        let mut time = unsynced();
        time.set_simulation_speed(60.0, at(0));
        time.set_simulation_enabled(true, at(0));

        // Each 500 ms slice is about half a simulated minute
        for step in 1..=120u64 {
            let speed = if step % 2 == 1 { 59.0 } else { 60.0 };
            time.set_simulation_speed(speed, at(step * 500));
        }
        assert_eq!(time.simulation().origin_offset_ms, 30_480);
        assert_eq!(time.current_sky_time(at(60_000)), Ok(ClockReading::new(13, 0)));
    }

    #[test]
    fn test_speed_is_clamped() {
        assert_eq!(clamp_sim_speed(0.1), MIN_SIM_SPEED_SECS);
        assert_eq!(clamp_sim_speed(500.0), MAX_SIM_SPEED_SECS);
        assert_eq!(clamp_sim_speed(f32::NAN), MAX_SIM_SPEED_SECS);
        assert_eq!(clamp_sim_speed(7.5), 7.5);

        let mut time = unsynced();
        time.set_simulation_speed(0.0, at(0));
        assert_eq!(time.simulation().speed_secs_per_hour, 1.0);
        time.set_simulation_speed(-4.0, at(0));
        assert_eq!(time.simulation().speed_secs_per_hour, 1.0);
        time.set_simulation_speed(f32::INFINITY, at(0));
        assert_eq!(time.simulation().speed_secs_per_hour, 60.0);
    }

    #[test]
    fn test_enable_twice_keeps_origin() {
        let mut time = unsynced();
        time.set_simulation_enabled(true, at(0));
        time.set_simulation_enabled(true, at(10_000));
        assert_eq!(time.current_sky_time(at(10_000)), Ok(ClockReading::new(13, 0)));
    }

    #[test]
    fn test_reenable_reseeds() {
        let mut time = unsynced();
        time.set_simulation_enabled(true, at(0));
        time.set_simulation_enabled(false, at(10_000));
        assert_eq!(time.current_sky_time(at(10_000)), Err(TimeUnavailable));

        time.set_simulation_enabled(true, at(20_000));
        assert_eq!(time.current_sky_time(at(20_000)), Ok(ClockReading::new(12, 0)));
    }

    #[test]
    fn test_status_snapshot() {
        let mut time = unsynced();
        let status = time.status(at(0));
        assert_eq!(status.sky_time, Err(TimeUnavailable));
        assert!(!status.sim_active);
        assert_eq!(status.sim_speed, DEFAULT_SIM_SPEED_SECS);

        time.set_simulation_enabled(true, at(0));
        time.set_simulation_speed(5.0, at(0));
        let status = time.status(at(0));
        assert_eq!(status.sky_time, Ok(ClockReading::new(12, 0)));
        assert!(status.sim_active);
        assert_eq!(status.sim_speed, 5.0);
    }
}
