//! Wall-clock sources
//!
//! A [`ClockSource`] answers "what time of day is it" as an hour and minute.
//! Monotonic time is always passed in by the caller, so sources stay
//! deterministic under test.

use core::fmt;

use embassy_time::Instant;

/// Minutes in one day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Time of day with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Hour of the day (0-23)
    pub hour: u8,
    /// Minute of the hour (0-59)
    pub minute: u8,
}

impl ClockReading {
    /// Create a reading, wrapping out-of-range values into the day
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self::from_minutes(hour as u16 * 60 + minute as u16)
    }

    /// Create a reading from minutes since midnight (wraps at 24 h)
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_minutes(minutes: u16) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    /// Minutes since midnight
    pub const fn minutes(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Hour of the day with the minute as a fraction (e.g. 6:30 = 6.5)
    pub fn fractional_hour(self) -> f32 {
        f32::from(self.hour) + f32::from(self.minute) / 60.0
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// No synchronized wall clock exists yet
///
/// Callers must keep whatever they displayed before instead of falling
/// back to midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnavailable;

impl fmt::Display for TimeUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("wall-clock time is not synchronized")
    }
}

impl core::error::Error for TimeUnavailable {}

/// Source of the current time of day
pub trait ClockSource {
    /// Read the time of day at monotonic instant `now`
    fn read(&self, now: Instant) -> Result<ClockReading, TimeUnavailable>;
}

impl<T: ClockSource + ?Sized> ClockSource for &T {
    fn read(&self, now: Instant) -> Result<ClockReading, TimeUnavailable> {
        (**self).read(now)
    }
}

/// Wrap a signed minute count into `0..MINUTES_PER_DAY`
///
/// Negative values wrap forward, so `-10` is `23:50`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn wrap_minutes(minutes: i64) -> u16 {
    minutes.rem_euclid(MINUTES_PER_DAY as i64) as u16
}

/// Wall clock anchored to the monotonic timer
///
/// Starts unsynchronized. Each [`SyncedClock::sync`] pins a time of day to a
/// monotonic instant (what an SNTP update delivers); reads then advance with
/// the monotonic timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncedClock {
    anchor: Option<(Instant, u32)>,
}

impl SyncedClock {
    /// Create a clock that has not been synchronized yet
    pub const fn new() -> Self {
        Self { anchor: None }
    }

    /// Pin the time of day (seconds since midnight) to `now`
    pub fn sync(&mut self, seconds_of_day: u32, now: Instant) {
        #[allow(clippy::cast_possible_truncation)]
        let seconds = (u64::from(seconds_of_day) % SECONDS_PER_DAY) as u32;
        self.anchor = Some((now, seconds));
    }

    /// Forget the last synchronization
    pub fn clear(&mut self) {
        self.anchor = None;
    }

    /// Check if the clock has been synchronized
    pub const fn is_synced(&self) -> bool {
        self.anchor.is_some()
    }
}

impl ClockSource for SyncedClock {
    fn read(&self, now: Instant) -> Result<ClockReading, TimeUnavailable> {
        let (synced_at, seconds) = self.anchor.ok_or(TimeUnavailable)?;
        let elapsed = now.saturating_duration_since(synced_at).as_secs();
        let seconds_of_day = (u64::from(seconds) + elapsed) % SECONDS_PER_DAY;
        #[allow(clippy::cast_possible_truncation)]
        Ok(ClockReading::from_minutes((seconds_of_day / 60) as u16))
    }
}
