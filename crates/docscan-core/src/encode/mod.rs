//! Image encoding for rectified pages.
//!
//! This module provides functionality for:
//! - Encoding RGB rasters to JPEG with configurable quality (default 90)
//! - Lossless PNG encoding when the host asks for it
//!
//! All operations are synchronous and single-threaded.

mod format;
mod jpeg;
mod png;

pub use format::{encode, EncodeError, OutputFormat, DEFAULT_JPEG_QUALITY};
pub use jpeg::encode_jpeg;
pub use png::encode_png;
