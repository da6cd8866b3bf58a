//! Sub-pixel placement of the sun or moon on the LED strip.

use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb, SkyPalette, add_colors, scale_color_video};
use crate::math8::unit_to_u8;
use crate::phase::DayPhase;

/// Position of the sky light between two neighbouring LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubPixel {
    /// Index of the lower LED
    pub low: usize,
    /// Index of the upper LED (equal to `low` at the end of the strip)
    pub high: usize,
    /// Brightness share of the lower LED
    pub weight_low: u8,
    /// Brightness share of the upper LED
    pub weight_high: u8,
}

impl SubPixel {
    /// Place phase `t` (0.0-1.0) on a strip of `len` LEDs
    ///
    /// The weights always sum to 255.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn locate(t: f32, len: usize) -> Self {
        let last = len.saturating_sub(1);
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let pos = t * last as f32;
        let low = (libm::floorf(pos) as usize).min(last);
        let high = (low + 1).min(last);
        let weight_high = unit_to_u8(pos - low as f32);

        Self {
            low,
            high,
            weight_low: 255 - weight_high,
            weight_high,
        }
    }
}

/// What the strip showed after the last redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub position: SubPixel,
    pub is_day: bool,
    /// Monotonic instant of the redraw
    pub drawn_at: Instant,
}

impl RenderState {
    /// Check if a redraw of `position` would change what is shown
    pub fn shows(&self, position: SubPixel, is_day: bool) -> bool {
        self.position == position && self.is_day == is_day
    }
}

/// Paints the sun or the moon onto the strip
///
/// N is the number of LEDs in the strip
#[derive(Debug, Clone)]
pub struct PixelRenderer<const N: usize> {
    palette: SkyPalette,
    frame_buffer: [Rgb; N],
    last: Option<RenderState>,
}

impl<const N: usize> PixelRenderer<N> {
    pub const fn new(palette: SkyPalette) -> Self {
        Self {
            palette,
            frame_buffer: [BLACK; N],
            last: None,
        }
    }

    /// Place phase `t` on this strip
    pub fn locate(t: f32) -> SubPixel {
        SubPixel::locate(t, N)
    }

    /// Check if the strip has to be redrawn with the light at `position`
    ///
    /// True when nothing has been drawn yet, when the lit cells or their
    /// weights differ from the last redraw, or when `force_interval` has
    /// passed since it.
    pub fn needs_redraw(
        &self,
        position: SubPixel,
        is_day: bool,
        now: Instant,
        force_interval: Duration,
    ) -> bool {
        let Some(last) = self.last else {
            return true;
        };
        if !last.shows(position, is_day) {
            return true;
        }
        now.saturating_duration_since(last.drawn_at) > force_interval
    }

    /// Redraw the strip for `phase`
    pub fn render(&mut self, phase: DayPhase, now: Instant) -> &[Rgb; N] {
        self.render_at(phase, Self::locate(phase.t), now)
    }

    /// Redraw the strip for `phase` with an already located light
    ///
    /// Every cell is cleared, then the two cells around the light position
    /// get their share of the sun or moon color. A zero weight stays black,
    /// so a whole-number position lights a single cell.
    pub fn render_at(&mut self, phase: DayPhase, position: SubPixel, now: Instant) -> &[Rgb; N] {
        let color = if phase.is_day {
            self.palette.sun_color(phase.t)
        } else {
            self.palette.moon_color()
        };

        self.frame_buffer.fill(BLACK);
        if let Some(low) = self.frame_buffer.get_mut(position.low) {
            *low = add_colors(*low, scale_color_video(color, position.weight_low));
        }
        if let Some(high) = self.frame_buffer.get_mut(position.high) {
            *high = add_colors(*high, scale_color_video(color, position.weight_high));
        }

        self.last = Some(RenderState {
            position,
            is_day: phase.is_day,
            drawn_at: now,
        });
        &self.frame_buffer
    }

    /// Forget the last redraw so the next poll draws again
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Replace the palette; the next poll redraws with it
    pub fn set_palette(&mut self, palette: SkyPalette) {
        self.palette = palette;
        self.invalidate();
    }

    pub const fn palette(&self) -> &SkyPalette {
        &self.palette
    }

    /// State of the last redraw, if any
    pub const fn last_render(&self) -> Option<&RenderState> {
        self.last.as_ref()
    }

    /// Frame produced by the last redraw
    pub const fn frame(&self) -> &[Rgb; N] {
        &self.frame_buffer
    }
}
