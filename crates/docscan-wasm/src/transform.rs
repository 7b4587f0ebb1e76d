//! WASM bindings for corner proposals, rectification and cropping.
//!
//! Corners cross the boundary as a flat `Float64Array`:
//! `[x0, y0, x1, y1, x2, y2, x3, y3]` in top-left, top-right, bottom-left,
//! bottom-right order, normalized to 0..1.

use crate::types::{options_from_js, quad_from_flat, JsDecodedImage};
use docscan_core::detect::{detect_corners, propose_corners as core_propose};
use docscan_core::encode::OutputFormat;
use docscan_core::transform::{
    apply_crop as core_crop, auto_crop as core_auto_crop, rectify as core_rectify,
    rectify_image as core_rectify_image, rectify_or_original as core_rectify_or_original,
};
use docscan_core::SelectorConfig;
use wasm_bindgen::prelude::*;

/// Propose initial document corners for a photo.
///
/// Falls back to the default inset quadrilateral on featureless images.
#[wasm_bindgen]
pub fn propose_corners(image: &JsDecodedImage) -> Vec<f64> {
    core_propose(image.as_decoded()).to_flat().to_vec()
}

/// Whether the corner detector found real edges (false means the proposal
/// is the default quadrilateral).
#[wasm_bindgen]
pub fn corners_detected(image: &JsDecodedImage) -> bool {
    detect_corners(image.as_decoded(), &SelectorConfig::default()).detected
}

/// Decode `bytes`, rectify the quadrilateral and encode the page.
///
/// # Errors
///
/// Fails on undecodable input, a collapsed quadrilateral or an encoder
/// error.
#[wasm_bindgen]
pub fn rectify(bytes: &[u8], corners: &[f64], format: JsValue) -> Result<Vec<u8>, JsValue> {
    let quad = quad_from_flat(corners).map_err(|e| JsValue::from_str(&e))?;
    let format: OutputFormat = options_from_js(format, "output format")?;
    core_rectify(bytes, &quad, format).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Like [`rectify`], but a collapsed quadrilateral returns the original bytes.
#[wasm_bindgen]
pub fn rectify_or_original(
    bytes: &[u8],
    corners: &[f64],
    format: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let quad = quad_from_flat(corners).map_err(|e| JsValue::from_str(&e))?;
    let format: OutputFormat = options_from_js(format, "output format")?;
    core_rectify_or_original(bytes, &quad, format).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rectify an already decoded image without encoding.
#[wasm_bindgen]
pub fn rectify_image(image: &JsDecodedImage, corners: &[f64]) -> Result<JsDecodedImage, JsValue> {
    let quad = quad_from_flat(corners).map_err(|e| JsValue::from_str(&e))?;
    core_rectify_image(image.as_decoded(), &quad)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop to the bounding box of the detected document corners.
///
/// Returns the image unchanged when no document edges are found.
#[wasm_bindgen]
pub fn auto_crop(image: &JsDecodedImage) -> JsDecodedImage {
    JsDecodedImage::from_decoded(core_auto_crop(image.as_decoded()))
}

/// Crop using normalized coordinates, (0, 0) being the top-left corner.
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsDecodedImage,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> JsDecodedImage {
    JsDecodedImage::from_decoded(core_crop(image.as_decoded(), left, top, width, height))
}
