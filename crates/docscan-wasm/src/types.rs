//! WASM-compatible wrapper types and boundary conversions.
//!
//! This module provides JavaScript-friendly types that wrap the core docscan
//! types, and the helpers that turn JS arguments into core values.

use docscan_core::decode::{DecodedImage, FilterType};
use docscan_core::Quadrilateral;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// Pixels are RGB, 3 bytes per pixel, row-major. They live in WASM memory
/// until `pixels()` or `rgba()` copies them out.
#[wasm_bindgen]
pub struct JsDecodedImage {
    inner: DecodedImage,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGB pixel data.
    ///
    /// The buffer length is not checked here; operations that read the
    /// pixels reject a mismatched buffer.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            inner: DecodedImage {
                width,
                height,
                pixels,
            },
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Returns RGBA pixel data, ready for `new ImageData(...)`.
    pub fn rgba(&self) -> Vec<u8> {
        self.inner.to_rgba()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases it otherwise.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(inner: DecodedImage) -> Self {
        Self { inner }
    }

    /// Copy back into a core image. Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        self.inner.clone()
    }

    pub(crate) fn as_decoded(&self) -> &DecodedImage {
        &self.inner
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Parse corners passed as `[x0, y0, x1, y1, x2, y2, x3, y3]`.
pub(crate) fn quad_from_flat(values: &[f64]) -> Result<Quadrilateral, String> {
    let quad = Quadrilateral::from_flat(values)
        .ok_or_else(|| format!("Expected 8 corner coordinates, got {}", values.len()))?;
    if quad.corners.iter().any(|p| !p.is_finite()) {
        return Err("Corner coordinates must be finite".to_string());
    }
    Ok(quad)
}

/// Deserialize an options object; `undefined` and `null` give the defaults.
pub(crate) fn options_from_js<T>(value: JsValue, what: &str) -> Result<T, JsValue>
where
    T: DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}
