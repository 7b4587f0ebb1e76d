//! Software canvas for headless previews and tests.
//!
//! Shapes are rasterized without anti-aliasing: a pixel is painted when its
//! centre lies inside the shape, and colours with alpha below 255 are
//! blended over what is already there.

use std::convert::Infallible;

use crate::config::Rgba;
use crate::decode::DecodedImage;

use super::mapper::CanvasPoint;
use super::render::Canvas;

/// RGB raster implementing [`Canvas`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterCanvas {
    image: DecodedImage,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: DecodedImage::blank(width, height),
        }
    }

    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn into_image(self) -> DecodedImage {
        self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.pixel(x, y)
    }

    /// Blend `color` into every pixel whose centre satisfies `inside`,
    /// scanning only the given bounding box.
    fn paint<F>(&mut self, bounds: (f64, f64, f64, f64), color: Rgba, inside: F)
    where
        F: Fn(f64, f64) -> bool,
    {
        let (w, h) = (self.image.width, self.image.height);
        if w == 0 || h == 0 {
            return;
        }

        let (min_x, min_y, max_x, max_y) = bounds;
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return;
        }
        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(w);
        let y1 = (max_y.ceil().max(0.0) as u32).min(h);

        for y in y0..y1 {
            for x in x0..x1 {
                if inside(x as f64 + 0.5, y as f64 + 0.5) {
                    let idx = ((y * w + x) * 3) as usize;
                    blend(&mut self.image.pixels[idx..idx + 3], color);
                }
            }
        }
    }
}

fn blend(dst: &mut [u8], color: Rgba) {
    let [r, g, b, a] = color.0;
    if a == 255 {
        dst.copy_from_slice(&[r, g, b]);
        return;
    }
    let alpha = a as f32 / 255.0;
    for (d, s) in dst.iter_mut().zip([r, g, b]) {
        *d = (*d as f32 * (1.0 - alpha) + s as f32 * alpha).round() as u8;
    }
}

impl Canvas for RasterCanvas {
    type Error = Infallible;

    fn resize(&mut self, width: u32, height: u32) -> Result<(), Infallible> {
        if self.image.width != width || self.image.height != height {
            self.image = DecodedImage::blank(width, height);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.image.pixels.fill(0);
        Ok(())
    }

    fn draw_image(&mut self, image: &DecodedImage) -> Result<(), Infallible> {
        let (w, h) = (self.image.width, self.image.height);
        if image.is_empty() || image.pixels.len() != image.pixel_count() * 3 || w == 0 || h == 0 {
            return Ok(());
        }

        if image.width == w && image.height == h && image.pixels.len() == self.image.pixels.len() {
            self.image.pixels.copy_from_slice(&image.pixels);
            return Ok(());
        }

        // Nearest-neighbour scaling for mismatched sizes
        for y in 0..h {
            let sy = ((y as u64 * image.height as u64) / h as u64) as u32;
            for x in 0..w {
                let sx = ((x as u64 * image.width as u64) / w as u64) as u32;
                let idx = ((y * w + x) * 3) as usize;
                self.image.pixels[idx..idx + 3].copy_from_slice(&image.pixel(sx, sy));
            }
        }
        Ok(())
    }

    fn stroke_dashed_line(
        &mut self,
        from: CanvasPoint,
        to: CanvasPoint,
        color: Rgba,
        width: f64,
        dash: [f64; 2],
    ) -> Result<(), Infallible> {
        let half = (width / 2.0).max(0.5);
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len_sq = dx * dx + dy * dy;
        let len = len_sq.sqrt();
        let period = dash[0] + dash[1];
        let dashed = dash[0] > 0.0 && dash[1] > 0.0;

        let bounds = (
            from.x.min(to.x) - half,
            from.y.min(to.y) - half,
            from.x.max(to.x) + half,
            from.y.max(to.y) + half,
        );

        self.paint(bounds, color, |px, py| {
            // Projection of the pixel centre onto the segment
            let t = if len_sq > 0.0 {
                (((px - from.x) * dx + (py - from.y) * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (cx, cy) = (from.x + t * dx, from.y + t * dy);
            if (px - cx).hypot(py - cy) > half {
                return false;
            }
            !dashed || (t * len) % period < dash[0]
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: CanvasPoint,
        radius: f64,
        color: Rgba,
    ) -> Result<(), Infallible> {
        let bounds = (
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        self.paint(bounds, color, |px, py| {
            (px - center.x).hypot(py - center.y) <= radius
        });
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: CanvasPoint,
        radius: f64,
        color: Rgba,
        width: f64,
    ) -> Result<(), Infallible> {
        let half = (width / 2.0).max(0.5);
        let outer = radius + half;
        let bounds = (
            center.x - outer,
            center.y - outer,
            center.x + outer,
            center.y + outer,
        );
        self.paint(bounds, color, |px, py| {
            ((px - center.x).hypot(py - center.y) - radius).abs() <= half
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    #[test]
    fn test_resize_and_clear() {
        let mut canvas = RasterCanvas::new(4, 4);
        canvas.resize(10, 5).unwrap();
        assert_eq!((canvas.image().width, canvas.image().height), (10, 5));

        canvas.fill_circle(CanvasPoint::new(5.0, 2.5), 2.0, RED).unwrap();
        canvas.clear().unwrap();
        assert!(canvas.image().pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_draw_image_same_size_copies() {
        let src = DecodedImage::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        let mut canvas = RasterCanvas::new(2, 1);
        canvas.draw_image(&src).unwrap();
        assert_eq!(canvas.image(), &src);
    }

    #[test]
    fn test_draw_image_scales_nearest() {
        let src = DecodedImage::new(2, 1, vec![10, 10, 10, 200, 200, 200]);
        let mut canvas = RasterCanvas::new(4, 2);
        canvas.draw_image(&src).unwrap();
        assert_eq!(canvas.pixel(0, 0), [10, 10, 10]);
        assert_eq!(canvas.pixel(1, 1), [10, 10, 10]);
        assert_eq!(canvas.pixel(2, 0), [200, 200, 200]);
        assert_eq!(canvas.pixel(3, 1), [200, 200, 200]);
    }

    #[test]
    fn test_fill_circle_covers_center_only() {
        let mut canvas = RasterCanvas::new(20, 20);
        canvas.fill_circle(CanvasPoint::new(10.0, 10.0), 3.0, RED).unwrap();
        assert_eq!(canvas.pixel(10, 10), [255, 0, 0]);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0]);
        assert_eq!(canvas.pixel(15, 10), [0, 0, 0]);
    }

    #[test]
    fn test_stroke_circle_leaves_centre() {
        let mut canvas = RasterCanvas::new(30, 30);
        canvas
            .stroke_circle(CanvasPoint::new(15.0, 15.0), 8.0, RED, 2.0)
            .unwrap();
        assert_eq!(canvas.pixel(15, 15), [0, 0, 0]);
        // (22.5, 15.5) is 7.5 from the centre, inside the 1 px half-width ring
        assert_eq!(canvas.pixel(22, 15), [255, 0, 0]);
    }

    #[test]
    fn test_alpha_blends_over_existing() {
        let mut canvas = RasterCanvas::new(3, 3);
        canvas
            .fill_circle(CanvasPoint::new(1.5, 1.5), 1.0, Rgba([200, 100, 0, 128]))
            .unwrap();
        let [r, g, b] = canvas.pixel(1, 1);
        assert_eq!((r, g, b), (100, 50, 0));
    }

    #[test]
    fn test_dashed_line_has_gaps() {
        let mut canvas = RasterCanvas::new(40, 5);
        canvas
            .stroke_dashed_line(
                CanvasPoint::new(0.0, 2.5),
                CanvasPoint::new(40.0, 2.5),
                RED,
                2.0,
                [5.0, 5.0],
            )
            .unwrap();
        assert_eq!(canvas.pixel(2, 2), [255, 0, 0]);
        assert_eq!(canvas.pixel(7, 2), [0, 0, 0]);
        assert_eq!(canvas.pixel(12, 2), [255, 0, 0]);
        assert_eq!(canvas.pixel(2, 0), [0, 0, 0]);
    }

    #[test]
    fn test_shapes_outside_canvas_are_clipped() {
        let mut canvas = RasterCanvas::new(5, 5);
        canvas.fill_circle(CanvasPoint::new(-50.0, -50.0), 3.0, RED).unwrap();
        canvas
            .fill_circle(CanvasPoint::new(f64::NAN, 1.0), 3.0, RED)
            .unwrap();
        assert!(canvas.image().pixels.iter().all(|&v| v == 0));
    }
}
