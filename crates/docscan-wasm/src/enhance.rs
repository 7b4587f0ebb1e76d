//! Page enhancement WASM bindings.
//!
//! Mirrors the editor sliders: brightness, contrast and a colour mode of
//! `"color"`, `"grayscale"` or `"blackwhite"`.

use crate::types::JsDecodedImage;
use docscan_core::enhance::{self, ColorMode, DEFAULT_THRESHOLD};
use wasm_bindgen::prelude::*;

/// Enhancement settings wrapper for JavaScript
#[wasm_bindgen]
pub struct EnhanceSettings {
    inner: enhance::EnhanceSettings,
}

#[wasm_bindgen]
impl EnhanceSettings {
    /// Create settings that leave the page unchanged
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: enhance::EnhanceSettings::default(),
        }
    }

    /// Get brightness offset (-50 to 50)
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: i32) {
        self.inner.brightness = value;
    }

    /// Get contrast multiplier (0.5 to 2.0)
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    /// Colour mode name
    #[wasm_bindgen(getter)]
    pub fn color_mode(&self) -> String {
        match self.inner.color_mode {
            ColorMode::Color => "color",
            ColorMode::Grayscale => "grayscale",
            ColorMode::BlackWhite { .. } => "blackwhite",
        }
        .to_string()
    }

    /// Set colour mode by name. Unknown names are rejected.
    pub fn set_color_mode(&mut self, value: &str) -> Result<(), JsValue> {
        self.inner.color_mode = match value {
            "color" => ColorMode::Color,
            "grayscale" => ColorMode::Grayscale,
            "blackwhite" => ColorMode::BlackWhite {
                threshold: self.threshold(),
            },
            other => return Err(JsValue::from_str(&format!("Unknown color mode: {}", other))),
        };
        Ok(())
    }

    /// Black & white cut-off (only used in `"blackwhite"` mode)
    #[wasm_bindgen(getter)]
    pub fn threshold(&self) -> u8 {
        match self.inner.color_mode {
            ColorMode::BlackWhite { threshold } => threshold,
            _ => DEFAULT_THRESHOLD,
        }
    }

    /// Switches to `"blackwhite"` mode with the given cut-off.
    #[wasm_bindgen(setter)]
    pub fn set_threshold(&mut self, value: u8) {
        self.inner.color_mode = ColorMode::BlackWhite { threshold: value };
    }

    /// Check if all settings are at their neutral values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a stored object
    pub fn from_json(value: JsValue) -> Result<EnhanceSettings, JsValue> {
        let inner: enhance::EnhanceSettings =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for EnhanceSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply enhancement settings, returning a new image.
///
/// ```typescript
/// const settings = new EnhanceSettings();
/// settings.brightness = 20;
/// settings.set_color_mode('grayscale');
/// const page = apply_enhancements(rectified, settings);
/// ```
#[wasm_bindgen]
pub fn apply_enhancements(image: &JsDecodedImage, settings: &EnhanceSettings) -> JsDecodedImage {
    let mut pixels = image.pixels();
    enhance::apply_enhancements(&mut pixels, &settings.inner);
    JsDecodedImage::new(image.width(), image.height(), pixels)
}
