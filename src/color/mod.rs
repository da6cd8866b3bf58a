mod sky;
mod utils;

pub use sky::SkyPalette;
use smart_leds::RGB8;
pub use utils::{add_colors, blend_colors, rgb_from_u32, scale_color_video};

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
