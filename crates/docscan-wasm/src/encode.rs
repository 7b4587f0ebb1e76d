//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes
//! - [`encode_image`] - Encode a JsDecodedImage in a requested format
//! - [`output_mime_type`] - MIME type for a format object
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@docscan/wasm';
//!
//! const jpeg = encode_image(page, { kind: 'jpeg', quality: 90 });
//! const png = encode_image(page, { kind: 'png' });
//! const blob = new Blob([jpeg], { type: 'image/jpeg' });
//! ```

use crate::types::{options_from_js, JsDecodedImage};
use docscan_core::encode::{self, OutputFormat};
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100; the scanner uses 90.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// `width * height * 3` or either dimension is zero.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a decoded image.
///
/// `format` is `{ kind: 'jpeg', quality }` or `{ kind: 'png' }`. Passing
/// `undefined` encodes JPEG at quality 90.
#[wasm_bindgen]
pub fn encode_image(image: &JsDecodedImage, format: JsValue) -> Result<Vec<u8>, JsValue> {
    let format: OutputFormat = options_from_js(format, "output format")?;
    encode::encode(image.as_decoded(), format).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type for an output format object (`undefined` means JPEG).
#[wasm_bindgen]
pub fn output_mime_type(format: JsValue) -> Result<String, JsValue> {
    let format: OutputFormat = options_from_js(format, "output format")?;
    Ok(format.mime_type().to_string())
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg = encode_jpeg(&pixels, 100, 100, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 50 * 50 * 3];
        assert!(encode_jpeg(&pixels, 100, 100, 90).is_err());
        assert!(encode_jpeg(&pixels, 0, 100, 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_image_formats() {
        let img = JsDecodedImage::new(16, 16, vec![200u8; 16 * 16 * 3]);

        let jpeg = encode_image(&img, JsValue::UNDEFINED).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let png_format = serde_wasm_bindgen::to_value(&OutputFormat::Png).unwrap();
        let png = encode_image(&img, png_format).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_jpeg_format_without_quality() {
        let value = js_sys::Object::new();
        js_sys::Reflect::set(&value, &"kind".into(), &"jpeg".into()).unwrap();
        let format: OutputFormat = options_from_js(value.into(), "output format").unwrap();
        assert_eq!(format, OutputFormat::default());
    }

    #[wasm_bindgen_test]
    fn test_encode_image_rejects_bad_format() {
        let img = JsDecodedImage::new(4, 4, vec![0u8; 48]);
        assert!(encode_image(&img, JsValue::from_str("gif")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_output_mime_type() {
        assert_eq!(output_mime_type(JsValue::NULL).unwrap(), "image/jpeg");
    }
}
