//! Page geometry operations: rectification and cropping.
//!
//! # Pipeline
//!
//! A captured photo goes through these steps before enhancement and export:
//! 1. Corner proposal ([`crate::detect`])
//! 2. Interactive adjustment ([`crate::selector`])
//! 3. Rectification of the selected quadrilateral ([`rectify_image`])
//!
//! [`auto_crop`] is the non-interactive shortcut: crop to the bounding box
//! of the proposed corners without any geometric correction.
//!
//! # Coordinate System
//!
//! - Quadrilateral corners are normalized (0.0 to 1.0) relative to the source
//! - Origin is the top-left corner
//! - Output pixels are addressed by their centres at `(u + 0.5, v + 0.5)`

mod crop;
mod rectify;
mod sample;

pub use crop::{apply_crop, auto_crop};
pub use rectify::{
    plan_rectification, rectify, rectify_image, rectify_or_original, AffineApprox, EdgeLengths,
    RectifyError, RectifyPlan,
};
