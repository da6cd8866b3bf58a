//! Sky time provider
//!
//! Chooses between the real clock and an accelerated simulated clock used
//! to preview the day/night cycle. The simulated clock counts from an origin
//! (a time of day pinned to a monotonic instant) at a configurable number of
//! real seconds per simulated hour.

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock::{ClockReading, ClockSource, MINUTES_PER_DAY, TimeUnavailable, wrap_minutes};

/// Fastest allowed simulation speed (real seconds per simulated hour)
pub const MIN_SIM_SPEED_SECS: f32 = 1.0;

/// Slowest allowed simulation speed (real seconds per simulated hour)
pub const MAX_SIM_SPEED_SECS: f32 = 60.0;

/// Simulation speed used until one is requested
pub const DEFAULT_SIM_SPEED_SECS: f32 = 10.0;

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 3_600_000;

/// Origin used when the simulation starts without a real clock
pub const DEFAULT_SIM_ORIGIN: ClockReading = ClockReading::new(12, 0);

/// Clamp a requested simulation speed to the supported range
///
/// NaN falls back to the slowest speed.
pub fn clamp_sim_speed(secs_per_hour: f32) -> f32 {
    if secs_per_hour.is_nan() {
        return MAX_SIM_SPEED_SECS;
    }
    secs_per_hour.clamp(MIN_SIM_SPEED_SECS, MAX_SIM_SPEED_SECS)
}

/// State of the accelerated clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    /// Whether the simulated clock replaces the real one
    pub active: bool,
    /// Real seconds per simulated hour, within `1.0..=60.0`
    pub speed_secs_per_hour: f32,
    /// Monotonic instant the origin time is pinned to
    pub origin: Instant,
    /// Simulated time of day at `origin`
    pub origin_time: ClockReading,
    /// Simulated milliseconds past `origin_time` at `origin`
    pub origin_offset_ms: u32,
}

impl SimulationState {
    /// Create an inactive simulation with the given speed
    pub fn new(speed_secs_per_hour: f32) -> Self {
        Self {
            active: false,
            speed_secs_per_hour: clamp_sim_speed(speed_secs_per_hour),
            origin: Instant::from_millis(0),
            origin_time: DEFAULT_SIM_ORIGIN,
            origin_offset_ms: 0,
        }
    }

    /// Simulated milliseconds elapsed since `origin_time`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn simulated_ms(&self, now: Instant) -> u64 {
        let elapsed_ms = now.saturating_duration_since(self.origin).as_millis();
        let speed_ms = libm::roundf(self.speed_secs_per_hour * 1000.0).max(1.0) as u64;
        u64::from(self.origin_offset_ms) + elapsed_ms.saturating_mul(MS_PER_HOUR) / speed_ms
    }

    /// Simulated time of day at `now`
    ///
    /// Whole simulated minutes elapsed since the origin are added to the
    /// origin time and wrapped into the day.
    pub fn time_at(&self, now: Instant) -> ClockReading {
        self.advance(self.simulated_ms(now) / MS_PER_MINUTE)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn advance(&self, minutes: u64) -> ClockReading {
        let total = i64::from(self.origin_time.minutes())
            + (minutes % u64::from(MINUTES_PER_DAY)) as i64;
        ClockReading::from_minutes(wrap_minutes(total))
    }

    /// Move the origin to `now` while keeping the simulated time, including
    /// the part of the current minute already elapsed
    #[allow(clippy::cast_possible_truncation)]
    fn rebase(&mut self, now: Instant) {
        let sim_ms = self.simulated_ms(now);
        self.origin_time = self.advance(sim_ms / MS_PER_MINUTE);
        self.origin_offset_ms = (sim_ms % MS_PER_MINUTE) as u32;
        self.origin = now;
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(DEFAULT_SIM_SPEED_SECS)
    }
}

/// Snapshot of the sky clock for status pages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyStatus {
    /// Time the sky is currently showing
    pub sky_time: Result<ClockReading, TimeUnavailable>,
    /// Whether the simulated clock is running
    pub sim_active: bool,
    /// Simulation speed in real seconds per simulated hour
    pub sim_speed: f32,
}

/// Picks the real or the simulated clock
#[derive(Debug, Clone)]
pub struct SkyTimeProvider<C: ClockSource> {
    clock: C,
    simulation: SimulationState,
}

impl<C: ClockSource> SkyTimeProvider<C> {
    /// Create a provider with simulation disabled
    pub fn new(clock: C, sim_speed_secs_per_hour: f32) -> Self {
        Self {
            clock,
            simulation: SimulationState::new(sim_speed_secs_per_hour),
        }
    }

    /// Time of day the sky should show at `now`
    pub fn current_sky_time(&self, now: Instant) -> Result<ClockReading, TimeUnavailable> {
        if self.simulation.active {
            Ok(self.simulation.time_at(now))
        } else {
            self.clock.read(now)
        }
    }

    /// Turn the simulated clock on or off
    ///
    /// Turning it on seeds the origin from the real clock, or from noon if
    /// the real clock is not available. Enabling an already running
    /// simulation changes nothing.
    pub fn set_simulation_enabled(&mut self, enabled: bool, now: Instant) {
        if enabled == self.simulation.active {
            return;
        }
        if enabled {
            let origin_time = self.clock.read(now).unwrap_or(DEFAULT_SIM_ORIGIN);
            self.simulation.origin = now;
            self.simulation.origin_time = origin_time;
            self.simulation.origin_offset_ms = 0;
            #[cfg(feature = "esp32-log")]
            println!(
                "[SkyTimeProvider.set_simulation_enabled] starting at {:02}:{:02}",
                origin_time.hour, origin_time.minute
            );
        } else {
            #[cfg(feature = "esp32-log")]
            println!("[SkyTimeProvider.set_simulation_enabled] stopped");
        }
        self.simulation.active = enabled;
    }

    /// Change the simulation speed (real seconds per simulated hour)
    ///
    /// The value is clamped to `1.0..=60.0`. A running simulation is rebased
    /// first, so the shown time does not jump. Repeating the current speed
    /// changes nothing.
    #[allow(clippy::float_cmp)]
    pub fn set_simulation_speed(&mut self, secs_per_hour: f32, now: Instant) {
        let speed = clamp_sim_speed(secs_per_hour);
        if speed == self.simulation.speed_secs_per_hour {
            return;
        }
        if self.simulation.active {
            self.simulation.rebase(now);
        }
        self.simulation.speed_secs_per_hour = speed;
        #[cfg(feature = "esp32-log")]
        println!(
            "[SkyTimeProvider.set_simulation_speed] {:?} s/h (requested {:?})",
            speed, secs_per_hour
        );
    }

    /// Current status for the control layer
    pub fn status(&self, now: Instant) -> SkyStatus {
        SkyStatus {
            sky_time: self.current_sky_time(now),
            sim_active: self.simulation.active,
            sim_speed: self.simulation.speed_secs_per_hour,
        }
    }

    /// Simulation state
    pub const fn simulation(&self) -> &SimulationState {
        &self.simulation
    }

    /// Underlying real clock
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the real clock (e.g. to synchronize it)
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
