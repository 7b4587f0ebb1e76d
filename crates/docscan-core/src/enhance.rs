//! Page enhancement applied after rectification.
//!
//! ## Order
//! 1. Brightness (additive, -50 to +50)
//! 2. Contrast (multiplier around mid-grey, 0.5 to 2.0)
//! 3. Colour mode (colour, grayscale or thresholded black & white)
//!
//! Each stage rounds back to u8, so the result matches applying the stages
//! one after another to an 8-bit canvas.

use serde::{Deserialize, Serialize};

use crate::luminance::{luma, luma_u8};

/// Brightness slider bounds.
pub const BRIGHTNESS_RANGE: (i32, i32) = (-50, 50);

/// Contrast slider bounds.
pub const CONTRAST_RANGE: (f32, f32) = (0.5, 2.0);

/// Default black & white cut-off.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Output colour treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Color,
    Grayscale,
    /// Pixels with luma strictly above `threshold` become white, the rest black.
    #[serde(rename = "blackwhite")]
    BlackWhite {
        #[serde(default = "default_threshold")]
        threshold: u8,
    },
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

/// Enhancement sliders as chosen in the page editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhanceSettings {
    pub brightness: i32,
    pub contrast: f32,
    pub color_mode: ColorMode,
}

impl Default for EnhanceSettings {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 1.0,
            color_mode: ColorMode::Color,
        }
    }
}

impl EnhanceSettings {
    /// True when applying these settings leaves every pixel unchanged.
    pub fn is_default(&self) -> bool {
        self.brightness == 0 && self.contrast == 1.0 && self.color_mode == ColorMode::Color
    }

    /// Copy with brightness and contrast pulled into their slider ranges.
    ///
    /// A non-finite contrast becomes 1.0.
    pub fn clamped(self) -> Self {
        let contrast = if self.contrast.is_finite() {
            self.contrast.clamp(CONTRAST_RANGE.0, CONTRAST_RANGE.1)
        } else {
            1.0
        };
        Self {
            brightness: self.brightness.clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1),
            contrast,
            color_mode: self.color_mode,
        }
    }
}

/// Apply enhancement settings to RGB pixel data in place.
///
/// Settings are clamped to their slider ranges first. A trailing partial
/// pixel is left untouched.
pub fn apply_enhancements(pixels: &mut [u8], settings: &EnhanceSettings) {
    let settings = settings.clamped();
    if settings.is_default() {
        return;
    }

    let intercept = 128.0 * (1.0 - settings.contrast);

    for chunk in pixels.chunks_exact_mut(3) {
        let mut rgb = [chunk[0], chunk[1], chunk[2]];

        if settings.brightness != 0 {
            rgb = rgb.map(|v| (v as i32 + settings.brightness).clamp(0, 255) as u8);
        }

        if settings.contrast != 1.0 {
            rgb = rgb.map(|v| to_u8(v as f32 * settings.contrast + intercept));
        }

        match settings.color_mode {
            ColorMode::Color => {}
            ColorMode::Grayscale => {
                let [r, g, b] = rgb;
                rgb = [luma_u8(r, g, b); 3];
            }
            ColorMode::BlackWhite { threshold } => {
                let [r, g, b] = rgb;
                let value = if luma(r, g, b) > threshold as f32 { 255 } else { 0 };
                rgb = [value; 3];
            }
        }

        chunk.copy_from_slice(&rgb);
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn color_mode() -> impl Strategy<Value = ColorMode> {
        prop_oneof![
            Just(ColorMode::Color),
            Just(ColorMode::Grayscale),
            any::<u8>().prop_map(|threshold| ColorMode::BlackWhite { threshold }),
        ]
    }

    proptest! {
        /// Property: Black & white output is neutral and binary.
        #[test]
        fn prop_black_white_is_binary(
            pixels in prop::collection::vec(any::<u8>(), 3..=96),
            brightness in -50i32..=50,
            contrast in 0.5f32..=2.0,
            threshold in any::<u8>(),
        ) {
            let mut out = pixels.clone();
            let settings = EnhanceSettings {
                brightness,
                contrast,
                color_mode: ColorMode::BlackWhite { threshold },
            };
            apply_enhancements(&mut out, &settings);

            for px in out.chunks_exact(3) {
                prop_assert!(px[0] == px[1] && px[1] == px[2]);
                prop_assert!(px[0] == 0 || px[0] == 255);
            }
        }

        /// Property: Positive brightness never darkens a channel.
        #[test]
        fn prop_brightness_monotonic(
            pixels in prop::collection::vec(any::<u8>(), 3..=96),
            brightness in 0i32..=50,
        ) {
            let mut out = pixels.clone();
            apply_enhancements(&mut out, &EnhanceSettings { brightness, ..Default::default() });
            for (before, after) in pixels.iter().zip(&out) {
                prop_assert!(after >= before);
            }
        }

        /// Property: Enhancement never changes the buffer length.
        #[test]
        fn prop_length_preserved(
            pixels in prop::collection::vec(any::<u8>(), 0..=64),
            brightness in any::<i32>(),
            contrast in any::<f32>(),
            mode in color_mode(),
        ) {
            let mut out = pixels.clone();
            apply_enhancements(&mut out, &EnhanceSettings { brightness, contrast, color_mode: mode });
            prop_assert_eq!(out.len(), pixels.len());
        }
    }
}
