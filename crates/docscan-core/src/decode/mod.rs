//! Image decoding for docscan.
//!
//! This module provides functionality for:
//! - Decoding captured photos (JPEG, PNG) with EXIF orientation correction
//! - Resizing the decoded source to display-sized frames
//!
//! # Architecture
//!
//! Decoding happens once per capture. The resulting [`DecodedImage`] is the
//! read-only source shared by the overlay renderer, the corner detector and
//! the rectifier. All operations are synchronous and single-threaded.

mod resize;
mod source;
mod types;

pub use resize::{resize, resize_to_fit};
pub use source::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
