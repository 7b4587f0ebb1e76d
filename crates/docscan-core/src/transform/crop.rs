//! Axis-aligned cropping in normalized coordinates, and one-shot auto-crop.
//!
//! # Coordinate System
//!
//! - (0.0, 0.0) = top-left corner
//! - (1.0, 1.0) = bottom-right corner
//! - width/height are relative to the source dimensions

use tracing::{debug, warn};

use crate::config::SelectorConfig;
use crate::decode::DecodedImage;
use crate::detect::detect_corners;

/// Crop an image to a normalized rectangle.
///
/// Coordinates outside `[0, 1]` are clamped, the crop never extends past the
/// image, and the result is at least 1x1 pixels. A full-frame crop returns a
/// copy of the source, as does a source whose pixel buffer does not match
/// its dimensions.
pub fn apply_crop(
    image: &DecodedImage,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> DecodedImage {
    if left <= 0.0 && top <= 0.0 && width >= 1.0 && height >= 1.0 {
        return image.clone();
    }
    if image.is_empty() {
        return image.clone();
    }
    if let Err(e) = image.check_buffer() {
        warn!(error = %e, "Skipping crop of malformed image");
        return image.clone();
    }

    let src_w = image.width as f64;
    let src_h = image.height as f64;

    let px_left = ((left.clamp(0.0, 1.0) * src_w).round() as u32).min(image.width - 1);
    let px_top = ((top.clamp(0.0, 1.0) * src_h).round() as u32).min(image.height - 1);
    let px_width = (width.clamp(0.0, 1.0) * src_w).round() as u32;
    let px_height = (height.clamp(0.0, 1.0) * src_h).round() as u32;

    let px_right = (px_left + px_width).min(image.width);
    let px_bottom = (px_top + px_height).min(image.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let src_stride = image.width as usize * 3;
    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for y in px_top..px_top + out_height {
        let start = y as usize * src_stride + px_left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::new(out_width, out_height, output)
}

/// Crop a photo to the bounding box of its detected document corners.
///
/// No perspective correction is applied. When the detector finds no edges
/// the whole image is returned unchanged.
pub fn auto_crop(image: &DecodedImage) -> DecodedImage {
    let outcome = detect_corners(image, &SelectorConfig::default());
    if !outcome.detected {
        debug!("Auto-crop found no document edges, keeping full frame");
        return image.clone();
    }

    let (left, top, right, bottom) = outcome.quad.bounding_box();
    debug!(left, top, right, bottom, "Auto-crop bounding box");
    apply_crop(image, left, top, right - left, bottom - top)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test image where each pixel value encodes its position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    /// White page with a dark border, photographed on a black table.
    fn page_on_table(width: u32, height: u32, margin: u32) -> DecodedImage {
        let mut img = DecodedImage::blank(width, height);
        for y in margin..height - margin {
            for x in margin..width - margin {
                let idx = ((y * width + x) * 3) as usize;
                img.pixels[idx..idx + 3].copy_from_slice(&[240, 240, 240]);
            }
        }
        img
    }

    #[test]
    fn test_full_crop_is_copy() {
        let img = test_image(50, 50);
        assert_eq!(apply_crop(&img, 0.0, 0.0, 1.0, 1.0), img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, 0.2, 0.2, 0.6, 0.6);

        assert_eq!((result.width, result.height), (6, 6));
        // First pixel comes from (2, 2): 2 * 10 + 2 = 22
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, 0.8, 0.8, 0.5, 0.5);
        assert_eq!((result.width, result.height), (2, 2));
    }

    #[test]
    fn test_crop_handles_negative_coords() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, -0.1, -0.1, 0.5, 0.5);
        assert_eq!((result.width, result.height), (50, 50));
        assert_eq!(result.pixels[0], 0);
    }

    #[test]
    fn test_crop_minimum_dimension() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, 0.99, 0.99, 0.001, 0.001);
        assert_eq!((result.width, result.height), (1, 1));
    }

    #[test]
    fn test_crop_of_short_buffer_is_unchanged() {
        let short = DecodedImage {
            width: 100,
            height: 80,
            pixels: vec![7; 30],
        };
        assert_eq!(apply_crop(&short, 0.25, 0.25, 0.5, 0.5), short);
        assert_eq!(auto_crop(&short), short);
    }

    #[test]
    fn test_auto_crop_uniform_image_is_unchanged() {
        let img = DecodedImage::new(30, 20, vec![90u8; 30 * 20 * 3]);
        assert_eq!(auto_crop(&img), img);
    }

    #[test]
    fn test_auto_crop_shrinks_to_page() {
        let img = page_on_table(100, 80, 4);
        let result = auto_crop(&img);

        assert!(result.width < img.width);
        assert!(result.height < img.height);
        assert!(result.width > 80 && result.height > 60);
    }
}
