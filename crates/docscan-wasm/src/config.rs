//! Stock configuration objects for the host UI.

use docscan_core::{ExportOptions, SelectorConfig};
use wasm_bindgen::prelude::*;

/// Selector defaults, as a plain object the host can tweak and pass back
/// to `new JsQuadSelector(...)`.
#[wasm_bindgen]
pub fn default_selector_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&SelectorConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `{ title: 'Scanned Document', includeImages: true, includeText: true }`
#[wasm_bindgen]
pub fn default_export_options() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&ExportOptions::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
