#![no_std]

pub mod clock;
pub mod color;
pub mod command;
pub mod frame_scheduler;
pub mod math8;
pub mod phase;
pub mod renderer;
pub mod scheduler;
pub mod sky_time;

pub use clock::{ClockReading, ClockSource, SyncedClock, TimeUnavailable, wrap_minutes};
pub use command::{CommandChannel, CommandReceiver, CommandSender, SkyCommand};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use phase::{DayPhase, DayWindow};
pub use renderer::{PixelRenderer, RenderState, SubPixel};
pub use scheduler::{RenderScheduler, SkyConfig};
pub use sky_time::{SimulationState, SkyStatus, SkyTimeProvider};

pub use color::{Rgb, SkyPalette};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to push sky frames to the strip. The driver only
/// transmits; the scheduler decides when a frame is written.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
