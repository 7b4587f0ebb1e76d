//! Rectification of the selected quadrilateral into an upright page.
//!
//! # Algorithm
//!
//! 1. Corners are converted from normalized to source pixel coordinates.
//! 2. The four edges are measured; the output is as wide as the longer of
//!    top/bottom and as tall as the longer of left/right.
//! 3. A scale + translate matrix maps the top-left corner to the output
//!    origin, with the scales taken from the horizontal extent of the top
//!    edge and the vertical extent of the left edge.
//! 4. Every output pixel centre is mapped back through that matrix and the
//!    source is sampled bilinearly.
//!
//! # Fidelity
//!
//! Step 3 is an affine approximation, not a homography: only the top-left
//! corner is guaranteed to land exactly, and for a rectangle-like selection
//! the opposite corner does too. A skewed or keystoned selection is cropped
//! and stretched rather than straightened. Swapping in a four-point
//! projective solve only needs a different [`AffineApprox`] producer; the
//! output sizing and the sampling loop stay the same.

use thiserror::Error;
use tracing::{debug, warn};

use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::{encode, EncodeError, OutputFormat};
use crate::Quadrilateral;

use super::sample::sample_bilinear;

/// Errors produced while rectifying a page.
#[derive(Debug, Error)]
pub enum RectifyError {
    /// Source bytes could not be decoded.
    #[error("Failed to decode source image: {0}")]
    ImageDecode(#[from] DecodeError),

    /// The quadrilateral has collapsed (zero-length edge, coincident corners).
    #[error("Degenerate quadrilateral: {0}")]
    DegenerateQuad(String),

    /// The rectified raster could not be encoded.
    #[error("Failed to encode rectified image: {0}")]
    Encode(#[from] EncodeError),
}

/// Measured edge lengths of a quadrilateral, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLengths {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl EdgeLengths {
    fn all(&self) -> [(&'static str, f64); 4] {
        [
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
        ]
    }
}

/// Source → output mapping `(x, y) ↦ (sx·x + tx, sy·y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineApprox {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl AffineApprox {
    /// Map a source pixel position to the output raster.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.scale_x * x + self.translate_x,
            self.scale_y * y + self.translate_y,
        )
    }

    /// Map an output position back to the source.
    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.translate_x) / self.scale_x,
            (y - self.translate_y) / self.scale_y,
        )
    }
}

/// Everything needed to composite a rectified page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectifyPlan {
    pub output_width: u32,
    pub output_height: u32,
    pub edges: EdgeLengths,
    pub transform: AffineApprox,
}

/// Measure the quadrilateral against a source of the given size and derive
/// the output dimensions and transform.
///
/// # Errors
///
/// `RectifyError::DegenerateQuad` if any edge is zero-length or non-finite,
/// an output dimension rounds to zero, or a scale factor is non-finite
/// (the top edge is vertical or the left edge horizontal).
pub fn plan_rectification(
    source_width: u32,
    source_height: u32,
    quad: &Quadrilateral,
) -> Result<RectifyPlan, RectifyError> {
    let [c0, c1, c2, c3] = quad.corners.map(|p| p.to_pixels(source_width, source_height));

    let edges = EdgeLengths {
        top: distance(c0, c1),
        bottom: distance(c2, c3),
        left: distance(c0, c2),
        right: distance(c1, c3),
    };

    for (name, length) in edges.all() {
        if !length.is_finite() || length <= 0.0 {
            return Err(RectifyError::DegenerateQuad(format!(
                "{} edge has length {}",
                name, length
            )));
        }
    }

    let width = edges.top.max(edges.bottom).round();
    let height = edges.left.max(edges.right).round();
    if !(width >= 1.0 && height >= 1.0) || width > u32::MAX as f64 || height > u32::MAX as f64 {
        return Err(RectifyError::DegenerateQuad(format!(
            "output size {}x{} is not drawable",
            width, height
        )));
    }

    let scale_x = width / (c1.0 - c0.0);
    let scale_y = height / (c2.1 - c0.1);
    if !scale_x.is_finite() || !scale_y.is_finite() || scale_x == 0.0 || scale_y == 0.0 {
        return Err(RectifyError::DegenerateQuad(format!(
            "scale factors ({}, {}) are not finite",
            scale_x, scale_y
        )));
    }

    Ok(RectifyPlan {
        output_width: width as u32,
        output_height: height as u32,
        edges,
        transform: AffineApprox {
            scale_x,
            scale_y,
            translate_x: -c0.0 * scale_x,
            translate_y: -c0.1 * scale_y,
        },
    })
}

/// Rectify the quadrilateral region of a decoded source image.
///
/// The source is only read. The result is a new raster sized from the
/// quadrilateral's edge lengths.
pub fn rectify_image(
    source: &DecodedImage,
    quad: &Quadrilateral,
) -> Result<DecodedImage, RectifyError> {
    source.check_buffer()?;
    let plan = plan_rectification(source.width, source.height, quad)?;
    debug!(
        source_width = source.width,
        source_height = source.height,
        output_width = plan.output_width,
        output_height = plan.output_height,
        "Rectifying quadrilateral"
    );

    let (out_w, out_h) = (plan.output_width, plan.output_height);
    let mut output = DecodedImage::blank(out_w, out_h);
    let row_len = out_w as usize * 3;

    for (v, row) in output.pixels.chunks_exact_mut(row_len).enumerate() {
        for (u, px) in row.chunks_exact_mut(3).enumerate() {
            // Continuous coordinates have pixel centres at +0.5
            let (sx, sy) = plan
                .transform
                .invert(u as f64 + 0.5, v as f64 + 0.5);
            px.copy_from_slice(&sample_bilinear(source, sx - 0.5, sy - 0.5));
        }
    }

    Ok(output)
}

/// Decode `bytes`, rectify the quadrilateral region and encode the result.
pub fn rectify(
    bytes: &[u8],
    quad: &Quadrilateral,
    format: OutputFormat,
) -> Result<Vec<u8>, RectifyError> {
    let source = decode_image(bytes)?;
    let page = rectify_image(&source, quad)?;
    Ok(encode(&page, format)?)
}

/// Like [`rectify`], but a collapsed quadrilateral yields the original bytes
/// instead of an error.
///
/// Decode and encode failures are still returned.
pub fn rectify_or_original(
    bytes: &[u8],
    quad: &Quadrilateral,
    format: OutputFormat,
) -> Result<Vec<u8>, RectifyError> {
    match rectify(bytes, quad, format) {
        Err(RectifyError::DegenerateQuad(reason)) => {
            warn!(%reason, "Rectification skipped, keeping original image");
            Ok(bytes.to_vec())
        }
        other => other,
    }
}

#[inline]
fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_png;
    use crate::NormalizedPoint;

    fn gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn quad(points: [(f64, f64); 4]) -> Quadrilateral {
        Quadrilateral::new(points.map(|(x, y)| NormalizedPoint::new(x, y)))
    }

    #[test]
    fn test_default_quad_on_1000x800() {
        let plan = plan_rectification(1000, 800, &Quadrilateral::default()).unwrap();
        assert_eq!(plan.output_width, 800);
        assert_eq!(plan.output_height, 640);
        assert!((plan.edges.top - 800.0).abs() < 1e-9);
        assert!((plan.edges.left - 640.0).abs() < 1e-9);

        let img = DecodedImage::blank(1000, 800);
        let out = rectify_image(&img, &Quadrilateral::default()).unwrap();
        assert_eq!((out.width, out.height), (800, 640));
    }

    #[test]
    fn test_output_uses_longer_edges() {
        // Bottom edge longer than top, right edge longer than left
        let q = quad([(0.2, 0.2), (0.6, 0.2), (0.1, 0.6), (0.9, 0.9)]);
        let plan = plan_rectification(100, 100, &q).unwrap();
        assert_eq!(plan.output_width, plan.edges.bottom.round() as u32);
        assert_eq!(plan.output_height, plan.edges.right.round() as u32);
    }

    #[test]
    fn test_transform_maps_top_left_to_origin() {
        let q = quad([(0.25, 0.1), (0.75, 0.12), (0.2, 0.8), (0.8, 0.85)]);
        let plan = plan_rectification(400, 300, &q).unwrap();
        let (x, y) = plan.transform.apply(100.0, 30.0);
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9);

        let (bx, by) = plan.transform.invert(x, y);
        assert!((bx - 100.0).abs() < 1e-9 && (by - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_aligned_selection_is_a_crop() {
        let img = gradient(40, 20);
        let q = quad([(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)]);
        let out = rectify_image(&img, &q).unwrap();

        assert_eq!((out.width, out.height), (20, 10));
        // Unit scale: output (0,0) samples source (10,5)
        assert_eq!(out.pixel(0, 0), img.pixel(10, 5));
        assert_eq!(out.pixel(19, 9), img.pixel(29, 14));
    }

    #[test]
    fn test_coincident_corners_are_degenerate() {
        let q = quad([(0.3, 0.3), (0.3, 0.3), (0.1, 0.9), (0.9, 0.9)]);
        let result = rectify_image(&gradient(50, 50), &q);
        assert!(matches!(result, Err(RectifyError::DegenerateQuad(_))));
    }

    #[test]
    fn test_vertical_top_edge_is_degenerate() {
        // Non-zero top edge, but no horizontal extent to scale by
        let q = quad([(0.5, 0.1), (0.5, 0.4), (0.1, 0.9), (0.9, 0.9)]);
        let result = plan_rectification(100, 100, &q);
        assert!(matches!(result, Err(RectifyError::DegenerateQuad(_))));
    }

    #[test]
    fn test_empty_source_is_degenerate() {
        let result = rectify_image(&DecodedImage::blank(0, 0), &Quadrilateral::default());
        assert!(matches!(result, Err(RectifyError::DegenerateQuad(_))));
    }

    #[test]
    fn test_non_finite_corner_is_degenerate() {
        let q = quad([(f64::NAN, 0.1), (0.9, 0.1), (0.1, 0.9), (0.9, 0.9)]);
        assert!(matches!(
            plan_rectification(100, 100, &q),
            Err(RectifyError::DegenerateQuad(_))
        ));
    }

    #[test]
    fn test_rectify_bytes_round_trip() {
        let img = gradient(60, 40);
        let png = encode_png(&img.pixels, img.width, img.height).unwrap();

        let out = rectify(&png, &Quadrilateral::default(), OutputFormat::Png).unwrap();
        let decoded = decode_image(&out).unwrap();
        assert_eq!((decoded.width, decoded.height), (48, 32));
    }

    #[test]
    fn test_rectify_bad_bytes_is_decode_error() {
        let result = rectify(&[1, 2, 3], &Quadrilateral::default(), OutputFormat::default());
        assert!(matches!(result, Err(RectifyError::ImageDecode(_))));
    }

    #[test]
    fn test_rectify_or_original_falls_back_on_degenerate() {
        let img = gradient(20, 20);
        let png = encode_png(&img.pixels, 20, 20).unwrap();
        let collapsed = quad([(0.5, 0.5); 4]);

        let out = rectify_or_original(&png, &collapsed, OutputFormat::default()).unwrap();
        assert_eq!(out, png);
    }

    #[test]
    fn test_rectify_image_rejects_short_buffer() {
        let short = DecodedImage {
            width: 100,
            height: 80,
            pixels: vec![7; 30],
        };
        let result = rectify_image(&short, &Quadrilateral::default());
        assert!(matches!(
            result,
            Err(RectifyError::ImageDecode(DecodeError::CorruptedFile(_)))
        ));
    }

    #[test]
    fn test_rectify_or_original_keeps_decode_errors() {
        let result = rectify_or_original(&[9, 9], &Quadrilateral::default(), OutputFormat::Png);
        assert!(matches!(result, Err(RectifyError::ImageDecode(_))));
    }

    #[test]
    fn test_error_display() {
        let err = RectifyError::DegenerateQuad("top edge has length 0".to_string());
        assert_eq!(
            err.to_string(),
            "Degenerate quadrilateral: top edge has length 0"
        );
    }
}
