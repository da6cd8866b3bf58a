//! Render scheduling
//!
//! Decides on every poll whether the sky has to be redrawn.

use embassy_time::{Duration, Instant};

use crate::clock::ClockSource;
use crate::color::{Rgb, SkyPalette};
use crate::phase::{DayPhase, DayWindow};
use crate::renderer::PixelRenderer;
use crate::sky_time::{DEFAULT_SIM_SPEED_SECS, SkyTimeProvider};

/// Redraw at least this often, even if nothing changed
pub const DEFAULT_FORCE_INTERVAL: Duration = Duration::from_secs(2);

/// Configuration for the sky
#[derive(Debug, Clone, Copy)]
pub struct SkyConfig {
    pub palette: SkyPalette,
    pub window: DayWindow,
    /// Maximum time between two redraws
    pub force_interval: Duration,
    /// Initial simulation speed (real seconds per simulated hour)
    pub sim_speed_secs_per_hour: f32,
    /// Whether the sky is shown at startup
    pub sky_enabled: bool,
}

impl SkyConfig {
    pub const DEFAULT: Self = Self {
        palette: SkyPalette::DEFAULT,
        window: DayWindow::DEFAULT,
        force_interval: DEFAULT_FORCE_INTERVAL,
        sim_speed_secs_per_hour: DEFAULT_SIM_SPEED_SECS,
        sky_enabled: true,
    };
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Render scheduler - decides when the strip is redrawn
pub struct RenderScheduler<const N: usize> {
    renderer: PixelRenderer<N>,
    window: DayWindow,
    force_interval: Duration,
}

impl<const N: usize> RenderScheduler<N> {
    pub const fn new(config: &SkyConfig) -> Self {
        Self {
            renderer: PixelRenderer::new(config.palette),
            window: config.window,
            force_interval: config.force_interval,
        }
    }

    /// Redraw the sky if needed
    ///
    /// Returns the new frame, or `None` when the frame on the strip is still
    /// current. Without a known time nothing is drawn and the strip keeps
    /// showing the previous frame.
    pub fn maybe_render<C: ClockSource>(
        &mut self,
        time: &SkyTimeProvider<C>,
        now: Instant,
    ) -> Option<&[Rgb; N]> {
        let reading = time.current_sky_time(now).ok()?;
        let phase = self.window.phase(reading);
        self.maybe_render_phase(phase, now)
    }

    /// Redraw the sky for an already computed phase if needed
    pub fn maybe_render_phase(&mut self, phase: DayPhase, now: Instant) -> Option<&[Rgb; N]> {
        let position = PixelRenderer::<N>::locate(phase.t);
        if !self
            .renderer
            .needs_redraw(position, phase.is_day, now, self.force_interval)
        {
            return None;
        }
        Some(self.renderer.render_at(phase, position, now))
    }

    /// Make the next poll redraw unconditionally
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }

    pub const fn window(&self) -> DayWindow {
        self.window
    }

    pub fn set_window(&mut self, window: DayWindow) {
        self.window = window;
        self.renderer.invalidate();
    }

    pub const fn renderer(&self) -> &PixelRenderer<N> {
        &self.renderer
    }
}
