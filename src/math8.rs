//! 8-bit fixed-point helpers for LED channel math.

/// Scale an 8-bit value, keeping any nonzero result visible
///
/// A zero value or zero scale yields zero. Otherwise the result is at
/// least 1, so a dim sub-pixel never rounds away to black.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8_video(value: u8, scale: u8) -> u8 {
    if value == 0 || scale == 0 {
        return 0;
    }
    (((value as u16 * scale as u16) >> 8) + 1) as u8
}

/// Add two 8-bit values, saturating at 255
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16;
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    );
    partial = partial.wrapping_add(0x8000);

    (partial >> 16) as u8
}

/// Convert a unit fraction (0.0-1.0) to an 8-bit amount, rounding to nearest
///
/// Values outside the range are clamped.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit_to_u8(fraction: f32) -> u8 {
    let scaled = libm::roundf(fraction * 255.0);
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

