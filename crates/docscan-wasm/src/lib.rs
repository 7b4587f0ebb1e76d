//! docscan WASM - WebAssembly bindings for the docscan document scanner
//!
//! Exposes docscan-core to the browser: decoding captured photos, the
//! interactive corner selector with its canvas renderer, rectification,
//! page enhancement and encoding.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible image wrapper and argument conversions
//! - `decode` - Photo decoding (JPEG, PNG, EXIF orientation) and resizing
//! - `selector` - Corner selector session and `<canvas>` rendering
//! - `transform` - Corner proposals, rectification and cropping
//! - `enhance` - Brightness, contrast and colour mode
//! - `encode` - JPEG/PNG output
//! - `config` - Default configuration objects
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsQuadSelector } from '@docscan/wasm';
//!
//! await init();
//!
//! const photo = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const selector = new JsQuadSelector(photo, box.width, box.height, undefined);
//! selector.render(ctx);
//! // ...pointer events...
//! const jpeg = selector.commit({ kind: 'jpeg', quality: 90 });
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod decode;
mod encode;
mod enhance;
mod selector;
mod transform;
mod types;

// Re-export public types
pub use config::{default_export_options, default_selector_config};
pub use decode::{decode_image, resize, resize_to_fit};
pub use encode::{encode_image, encode_jpeg, output_mime_type};
pub use enhance::{apply_enhancements, EnhanceSettings};
pub use selector::{detect_pointer_kind, device_pixel_ratio, JsQuadSelector};
pub use transform::{
    apply_crop, auto_crop, corners_detected, propose_corners, rectify, rectify_image,
    rectify_or_original,
};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
