//! Sky light colors
//!
//! The sun fades from a neutral noon white towards a warm horizon tone as
//! the day phase approaches sunrise or sunset. The moon is a flat cool blue.

use super::{Rgb, blend_colors, rgb_from_u32};
use crate::math8::unit_to_u8;

const NOON: Rgb = rgb_from_u32(0xFF_F0_D2);
const HORIZON: Rgb = rgb_from_u32(0xFF_5A_0A);
const MOON: Rgb = rgb_from_u32(0x28_3C_A0);

/// Colors used to paint the sky
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyPalette {
    /// Sun color in the middle of the day
    pub noon: Rgb,
    /// Sun color at sunrise and sunset
    pub horizon: Rgb,
    /// Moon color for the whole night
    pub moon: Rgb,
}

impl SkyPalette {
    pub const DEFAULT: Self = Self {
        noon: NOON,
        horizon: HORIZON,
        moon: MOON,
    };

    /// Sun color for a day phase `t` (0.0 = sunrise, 1.0 = sunset)
    ///
    /// The distance from noon is eased quadratically, so the color stays
    /// close to noon for most of the day and warms up near the edges.
    pub fn sun_color(&self, t: f32) -> Rgb {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let edge = libm::fabsf(2.0 * t - 1.0);
        let k = edge * edge;
        blend_colors(self.noon, self.horizon, unit_to_u8(k))
    }

    /// Moon color, independent of the night phase
    pub const fn moon_color(&self) -> Rgb {
        self.moon
    }
}

impl Default for SkyPalette {
    fn default() -> Self {
        Self::DEFAULT
    }
}
