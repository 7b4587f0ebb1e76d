//! Bilinear sampling of source rasters.

use crate::decode::DecodedImage;

/// Sample `image` at continuous pixel-index coordinates `(x, y)`.
///
/// Integer coordinates hit pixel centres exactly. Positions within half a
/// pixel outside the raster are clamped to the edge; anything further out is
/// black, matching what an empty canvas contributes to an encoded page.
pub(crate) fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as f64, image.height as f64);

    if image.is_empty() || !(x >= -0.5 && x <= w - 0.5 && y >= -0.5 && y <= h - 0.5) {
        return [0, 0, 0];
    }

    let x = x.clamp(0.0, w - 1.0);
    let y = y.clamp(0.0, h - 1.0);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 3];
    for (i, out) in result.iter_mut().enumerate() {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        *out = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}
