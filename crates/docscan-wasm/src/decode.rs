//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG capture, applying EXIF orientation
//! - [`resize`] - Resize an image to exact dimensions
//! - [`resize_to_fit`] - Resize an image to fit within a max edge
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@docscan/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const photo = decode_image(bytes);
//! const preview = resize_to_fit(photo, 2048, 1);
//! ```

use crate::types::{filter_from_u8, JsDecodedImage};
use docscan_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a captured photo from bytes.
///
/// The format is detected from the data (JPEG or PNG). EXIF orientation is
/// applied so phone photos come out upright.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// `filter`: 0=Nearest, 1=Bilinear (default), 2=Lanczos3.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(image.as_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize so the longest edge is at most `max_edge`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged (no upscaling).
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_to_fit(image.as_decoded(), max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
