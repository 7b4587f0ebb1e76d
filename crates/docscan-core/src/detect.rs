//! Automatic document corner proposals.
//!
//! A best-effort heuristic run once per capture, before the user adjusts the
//! corners by hand. It can and will propose poor quadrilaterals on textured
//! or low-contrast backgrounds; the only guarantee is four points inside the
//! image.
//!
//! ## Algorithm
//! 1. Rec.601 luma of each pixel
//! 2. 3×3 Sobel gradient magnitude, clamped to 255 (border pixels are 0)
//! 3. In a square window at each image corner (10% of the shorter side),
//!    the strongest response wins; ties go to the first pixel in row-major
//!    order
//!
//! Only the four windows (plus a one-pixel apron) are ever filtered, so the
//! cost is independent of how much of the photo lies between them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SelectorConfig;
use crate::decode::DecodedImage;
use crate::luminance::luma;
use crate::{Corner, NormalizedPoint, Quadrilateral};

/// Window side as a fraction of the shorter image dimension.
pub const WINDOW_FRACTION: f64 = 0.1;

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Result of a detection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionOutcome {
    /// Proposed corners, or the default inset quad when nothing was found
    pub quad: Quadrilateral,
    /// False when the detector fell back to the default quad
    pub detected: bool,
    /// Strongest gradient seen in any corner window
    pub peak_response: f32,
}

/// Propose initial corners with the stock configuration.
pub fn propose_corners(image: &DecodedImage) -> Quadrilateral {
    detect_corners(image, &SelectorConfig::default()).quad
}

/// Run the edge-density heuristic over the four corner windows.
///
/// Falls back to `Quadrilateral::inset(config.default_inset)` when the
/// image is smaller than the Sobel kernel or no window reaches
/// `config.min_edge_response`.
pub fn detect_corners(image: &DecodedImage, config: &SelectorConfig) -> DetectionOutcome {
    let fallback = |peak_response| DetectionOutcome {
        quad: Quadrilateral::inset(config.default_inset),
        detected: false,
        peak_response,
    };

    let (w, h) = (image.width, image.height);
    if w < 3 || h < 3 || image.check_buffer().is_err() {
        debug!(width = w, height = h, "Image too small for corner detection");
        return fallback(0.0);
    }

    let side = window_side(w, h);
    let mut corners = [NormalizedPoint::default(); 4];
    let mut peak = 0.0f32;

    for corner in Corner::ALL {
        let (x0, y0, anchor) = match corner {
            Corner::TopLeft => (0, 0, (0, 0)),
            Corner::TopRight => (w - side, 0, (w - 1, 0)),
            Corner::BottomLeft => (0, h - side, (0, h - 1)),
            Corner::BottomRight => (w - side, h - side, (w - 1, h - 1)),
        };

        let (best, response) = strongest_in_window(image, x0, y0, side, anchor);
        peak = peak.max(response);
        corners[corner.index()] =
            NormalizedPoint::new(best.0 as f64 / w as f64, best.1 as f64 / h as f64);
    }

    if peak < config.min_edge_response {
        debug!(peak, "No meaningful gradient, using default corners");
        return fallback(peak);
    }

    debug!(peak, window = side, "Proposed document corners");
    DetectionOutcome {
        quad: Quadrilateral::new(corners),
        detected: true,
        peak_response: peak,
    }
}

/// Window side length in pixels, at least 1.
fn window_side(width: u32, height: u32) -> u32 {
    let side = (width.min(height) as f64 * WINDOW_FRACTION).ceil() as u32;
    side.clamp(1, width.min(height))
}

/// Position and magnitude of the strongest response in a square window.
///
/// Returns `anchor` with a response of 0 when every pixel is flat.
fn strongest_in_window(
    image: &DecodedImage,
    x0: u32,
    y0: u32,
    side: u32,
    anchor: (u32, u32),
) -> ((u32, u32), f32) {
    let mut best = anchor;
    let mut max = 0.0f32;

    for y in y0..y0 + side {
        for x in x0..x0 + side {
            let m = sobel_magnitude(image, x, y);
            if m > max {
                max = m;
                best = (x, y);
            }
        }
    }

    (best, max)
}

/// Sobel gradient magnitude at `(x, y)`, clamped to 255.
fn sobel_magnitude(image: &DecodedImage, x: u32, y: u32) -> f32 {
    if x == 0 || y == 0 || x + 1 >= image.width || y + 1 >= image.height {
        return 0.0;
    }

    let mut gx = 0.0f32;
    let mut gy = 0.0f32;
    for (ky, (row_x, row_y)) in SOBEL_X.iter().zip(SOBEL_Y.iter()).enumerate() {
        for kx in 0..3 {
            let [r, g, b] = image.pixel(x + kx as u32 - 1, y + ky as u32 - 1);
            let v = luma(r, g, b);
            gx += v * row_x[kx];
            gy += v * row_y[kx];
        }
    }

    (gx * gx + gy * gy).sqrt().min(255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, value: u8) -> DecodedImage {
        DecodedImage::new(width, height, vec![value; (width * height * 3) as usize])
    }

    fn set_pixel(img: &mut DecodedImage, x: u32, y: u32, rgb: [u8; 3]) {
        let idx = ((y * img.width + x) * 3) as usize;
        img.pixels[idx..idx + 3].copy_from_slice(&rgb);
    }

    /// Bright page on a dark table, inset by `margin` pixels.
    fn page_on_table(width: u32, height: u32, margin: u32) -> DecodedImage {
        let mut img = uniform(width, height, 10);
        for y in margin..height - margin {
            for x in margin..width - margin {
                set_pixel(&mut img, x, y, [245, 245, 245]);
            }
        }
        img
    }

    #[test]
    fn test_uniform_image_falls_back_to_default() {
        let outcome = detect_corners(&uniform(64, 48, 128), &SelectorConfig::default());
        assert!(!outcome.detected);
        assert_eq!(outcome.quad, Quadrilateral::default());
        assert_eq!(outcome.peak_response, 0.0);
    }

    #[test]
    fn test_tiny_image_falls_back() {
        let outcome = detect_corners(&uniform(2, 2, 0), &SelectorConfig::default());
        assert!(!outcome.detected);
        assert_eq!(propose_corners(&uniform(1, 1, 0)), Quadrilateral::default());
    }

    #[test]
    fn test_fallback_respects_configured_inset() {
        let mut config = SelectorConfig::default();
        config.default_inset = 0.2;
        let outcome = detect_corners(&uniform(20, 20, 50), &config);
        assert_eq!(outcome.quad, Quadrilateral::inset(0.2));
    }

    #[test]
    fn test_page_proposals_lie_on_page_outline() {
        let img = page_on_table(100, 80, 4);
        let outcome = detect_corners(&img, &SelectorConfig::default());
        assert!(outcome.detected);
        assert_eq!(outcome.peak_response, 255.0);

        // Saturated edges tie along the border, so the first one in scan
        // order wins rather than the geometric corner
        let near = |v: f64, edge: f64| (v - edge).abs() <= 1.5;
        for corner in outcome.quad.corners {
            let (px, py) = corner.to_pixels(100, 80);
            assert!(
                near(px, 4.0) || near(px, 95.0) || near(py, 4.0) || near(py, 75.0),
                "({}, {}) is off the page outline",
                px,
                py
            );
        }

        let (tl_x, tl_y) = outcome.quad.corner(Corner::TopLeft).to_pixels(100, 80);
        assert!(tl_x < 8.0 && tl_y < 8.0);
        let (br_x, br_y) = outcome.quad.corner(Corner::BottomRight).to_pixels(100, 80);
        assert!(br_x >= 92.0 && br_y >= 72.0);
    }

    #[test]
    fn test_single_feature_in_top_left_window() {
        let mut img = uniform(50, 50, 0);
        set_pixel(&mut img, 2, 3, [255, 255, 255]);

        let outcome = detect_corners(&img, &SelectorConfig::default());
        assert!(outcome.detected);

        let (px, py) = outcome.quad.corner(Corner::TopLeft).to_pixels(50, 50);
        assert!((px - 2.0).abs() <= 1.0 && (py - 3.0).abs() <= 1.0);

        // Flat windows keep their image corner
        let (bx, by) = outcome.quad.corner(Corner::BottomRight).to_pixels(50, 50);
        assert!((bx - 49.0).abs() < 1e-9 && (by - 49.0).abs() < 1e-9);
    }

    #[test]
    fn test_sobel_on_vertical_step() {
        // Left column black, rest white: strong horizontal gradient at x = 1
        let mut img = uniform(3, 3, 255);
        for y in 0..3 {
            set_pixel(&mut img, 0, y, [0, 0, 0]);
        }
        assert_eq!(sobel_magnitude(&img, 1, 1), 255.0);
        assert_eq!(sobel_magnitude(&img, 0, 1), 0.0);
    }

    #[test]
    fn test_window_side() {
        assert_eq!(window_side(1000, 800), 80);
        assert_eq!(window_side(15, 15), 2);
        assert_eq!(window_side(3, 3), 1);
    }
}
