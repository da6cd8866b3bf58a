//! Control loop step for the sky strip.
//!
//! Applies queued commands, asks the [`RenderScheduler`] for a frame and
//! hands it to the output driver. The caller sleeps between ticks for the
//! returned duration.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock::ClockSource;
use crate::color::BLACK;
use crate::command::{CommandReceiver, SkyCommand};
use crate::scheduler::{RenderScheduler, SkyConfig};
use crate::sky_time::{SkyStatus, SkyTimeProvider};
use crate::OutputDriver;

/// Default poll rate (20 Hz).
pub const DEFAULT_POLL_HZ: u32 = 20;

/// Default time between two polls.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_POLL_HZ as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
    /// Whether a frame was written to the driver during this tick.
    pub wrote_frame: bool,
}

/// Drives the sky from the control loop.
///
/// # Usage
///
/// ```ignore
/// static COMMANDS: CommandChannel<4> = CommandChannel::new();
///
/// let time = SkyTimeProvider::new(SyncedClock::new(), DEFAULT_SIM_SPEED_SECS);
/// let mut scheduler = FrameScheduler::<_, _, 16, 4>::new(
///     time, COMMANDS.receiver(), driver, &SkyConfig::DEFAULT,
/// );
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, C, O, const N: usize, const SIZE: usize>
where
    C: ClockSource,
    O: OutputDriver,
{
    time: SkyTimeProvider<C>,
    commands: CommandReceiver<'a, SIZE>,
    output: O,
    scheduler: RenderScheduler<N>,
    sky_enabled: bool,
    blank_pending: bool,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, C, O, const N: usize, const SIZE: usize> FrameScheduler<'a, C, O, N, SIZE>
where
    C: ClockSource,
    O: OutputDriver,
{
    /// Create a scheduler polling at `DEFAULT_FRAME_DURATION` (20 Hz).
    pub fn new(
        time: SkyTimeProvider<C>,
        commands: CommandReceiver<'a, SIZE>,
        output: O,
        config: &SkyConfig,
    ) -> Self {
        Self::with_frame_duration(time, commands, output, config, DEFAULT_FRAME_DURATION)
    }

    /// Create a scheduler with a custom poll interval.
    pub fn with_frame_duration(
        time: SkyTimeProvider<C>,
        commands: CommandReceiver<'a, SIZE>,
        output: O,
        config: &SkyConfig,
        frame_duration: Duration,
    ) -> Self {
        Self {
            time,
            commands,
            output,
            scheduler: RenderScheduler::new(config),
            sky_enabled: config.sky_enabled,
            blank_pending: !config.sky_enabled,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Run one poll of the control loop.
    ///
    /// 1. Applies pending commands
    /// 2. Redraws the sky if the render scheduler asks for it
    /// 3. Returns the deadline for the next tick
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // More than two frames behind: drop the backlog instead of bursting
        let max_drift = Duration::from_millis(self.frame_duration.as_millis() * 2);
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.process_commands(now);
        let wrote_frame = self.draw(now);

        self.next_frame += self.frame_duration;
        let sleep_duration = self.next_frame.saturating_duration_since(now);

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            wrote_frame,
        }
    }

    /// Apply a single command immediately.
    pub fn apply(&mut self, command: SkyCommand, now: Instant) {
        match command {
            SkyCommand::SetSimulation(enabled) => {
                self.time.set_simulation_enabled(enabled, now);
            }
            SkyCommand::SetSimulationSpeed(secs) => {
                self.time.set_simulation_speed(f32::from(secs), now);
            }
            SkyCommand::SetSkyEnabled(enabled) => self.set_sky_enabled(enabled),
        }
    }

    /// Drain the command queue (non-blocking)
    fn process_commands(&mut self, now: Instant) {
        while let Some(command) = self.commands.try_receive() {
            self.apply(command, now);
        }
    }

    fn set_sky_enabled(&mut self, enabled: bool) {
        if enabled == self.sky_enabled {
            return;
        }
        #[cfg(feature = "esp32-log")]
        println!("[FrameScheduler.set_sky_enabled] sky enabled: {:?}", enabled);
        self.sky_enabled = enabled;
        self.blank_pending = !enabled;
        if enabled {
            self.scheduler.invalidate();
        }
    }

    /// Write a frame if one is due; returns whether the driver was called
    fn draw(&mut self, now: Instant) -> bool {
        if !self.sky_enabled {
            if self.blank_pending {
                self.blank_pending = false;
                self.output.write(&[BLACK; N]);
                return true;
            }
            return false;
        }

        match self.scheduler.maybe_render(&self.time, now) {
            Some(frame) => {
                self.output.write(frame);
                true
            }
            None => false,
        }
    }

    /// Status snapshot for the control layer.
    pub fn status(&self, now: Instant) -> SkyStatus {
        self.time.status(now)
    }

    /// Whether the sky is currently shown.
    pub const fn sky_enabled(&self) -> bool {
        self.sky_enabled
    }

    /// Get a reference to the time provider.
    pub const fn time(&self) -> &SkyTimeProvider<C> {
        &self.time
    }

    /// Get a mutable reference to the time provider.
    pub fn time_mut(&mut self) -> &mut SkyTimeProvider<C> {
        &mut self.time
    }

    /// Get a reference to the render scheduler.
    pub const fn scheduler(&self) -> &RenderScheduler<N> {
        &self.scheduler
    }

    /// Get a reference to the output driver.
    pub const fn output(&self) -> &O {
        &self.output
    }
}
