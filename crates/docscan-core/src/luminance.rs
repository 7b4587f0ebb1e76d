//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! Document scanning uses the Rec.601 weights (the ones browsers use for
//! canvas grayscale filters) for both corner detection and the grayscale and
//! black & white page modes.

/// BT.601 coefficient for red channel.
pub const LUMA_R: f32 = 0.299;

/// BT.601 coefficient for green channel.
pub const LUMA_G: f32 = 0.587;

/// BT.601 coefficient for blue channel.
pub const LUMA_B: f32 = 0.114;

/// Luma of a u8 RGB triple, as an unrounded float in 0.0-255.0.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

/// Luma of a u8 RGB triple, rounded to u8.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    luma(r, g, b).clamp(0.0, 255.0).round() as u8
}
