//! Conversions between pointer, canvas, normalized and source coordinates.
//!
//! Three spaces are involved:
//! - **client**: CSS pixels reported by pointer events
//! - **canvas**: backing-store pixels, i.e. CSS size times device pixel ratio
//! - **normalized**: 0.0 to 1.0 relative to the displayed image
//!
//! None of these functions clamp; clamping is a drag policy applied by
//! [`CornerModel`](super::CornerModel).

use serde::{Deserialize, Serialize};

use crate::NormalizedPoint;

/// On-screen rectangle of the canvas element, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// A position in backing-store pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: CanvasPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Geometry of the fitted display canvas.
///
/// Rebuilt whenever the image or the container changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCanvasState {
    /// Displayed width in CSS pixels
    pub css_width: f64,
    /// Displayed height in CSS pixels
    pub css_height: f64,
    pub device_pixel_ratio: f64,
    /// Backing-store width, `round(css_width * dpr)`, at least 1
    pub backing_width: u32,
    /// Backing-store height, `round(css_height * dpr)`, at least 1
    pub backing_height: u32,
    pub image_width: u32,
    pub image_height: u32,
}

impl DisplayCanvasState {
    /// A non-finite or non-positive ratio is treated as 1.
    pub fn new(
        css_width: f64,
        css_height: f64,
        device_pixel_ratio: f64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            css_width,
            css_height,
            device_pixel_ratio: dpr,
            backing_width: backing_size(css_width, dpr),
            backing_height: backing_size(css_height, dpr),
            image_width,
            image_height,
        }
    }

    /// Source pixels per canvas pixel on each axis.
    pub fn source_scale(&self) -> (f64, f64) {
        (
            self.image_width as f64 / self.backing_width as f64,
            self.image_height as f64 / self.backing_height as f64,
        )
    }
}

fn backing_size(css: f64, dpr: f64) -> u32 {
    let px = (css * dpr).round();
    if px.is_finite() && px >= 1.0 {
        px as u32
    } else {
        1
    }
}

/// Map a pointer position to backing-store pixels.
///
/// Uses the on-screen rectangle to account for CSS scaling of the element.
/// If the rectangle has no area (element not laid out yet) the device pixel
/// ratio is used directly.
pub fn client_to_canvas(
    client_x: f64,
    client_y: f64,
    rect: &CanvasRect,
    state: &DisplayCanvasState,
) -> CanvasPoint {
    let dx = client_x - rect.left;
    let dy = client_y - rect.top;

    if rect.width > 0.0 && rect.height > 0.0 {
        CanvasPoint::new(
            dx / rect.width * state.backing_width as f64,
            dy / rect.height * state.backing_height as f64,
        )
    } else {
        CanvasPoint::new(
            dx * state.device_pixel_ratio,
            dy * state.device_pixel_ratio,
        )
    }
}

pub fn canvas_to_normalized(point: CanvasPoint, state: &DisplayCanvasState) -> NormalizedPoint {
    NormalizedPoint::new(
        point.x / state.backing_width as f64,
        point.y / state.backing_height as f64,
    )
}

pub fn normalized_to_canvas(point: NormalizedPoint, state: &DisplayCanvasState) -> CanvasPoint {
    CanvasPoint::new(
        point.x * state.backing_width as f64,
        point.y * state.backing_height as f64,
    )
}

/// Map a canvas position into full-resolution source pixels.
pub fn canvas_to_source(point: CanvasPoint, state: &DisplayCanvasState) -> (f64, f64) {
    let (sx, sy) = state.source_scale();
    (point.x * sx, point.y * sy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retina_state() -> DisplayCanvasState {
        DisplayCanvasState::new(400.0, 300.0, 2.0, 4000, 3000)
    }

    #[test]
    fn test_backing_store_scales_with_dpr() {
        let state = retina_state();
        assert_eq!((state.backing_width, state.backing_height), (800, 600));
        assert_eq!(state.source_scale(), (5.0, 5.0));
    }

    #[test]
    fn test_backing_store_minimum_one_pixel() {
        let state = DisplayCanvasState::new(0.2, 0.0, 1.0, 10, 10);
        assert_eq!((state.backing_width, state.backing_height), (1, 1));
    }

    #[test]
    fn test_invalid_dpr_treated_as_one() {
        let state = DisplayCanvasState::new(100.0, 50.0, f64::NAN, 10, 10);
        assert_eq!(state.device_pixel_ratio, 1.0);
        assert_eq!((state.backing_width, state.backing_height), (100, 50));
    }

    #[test]
    fn test_client_to_canvas_uses_bounding_rect() {
        let state = retina_state();
        let rect = CanvasRect::new(20.0, 40.0, 400.0, 300.0);
        let p = client_to_canvas(220.0, 190.0, &rect, &state);
        assert_eq!(p, CanvasPoint::new(400.0, 300.0));
        assert_eq!(canvas_to_normalized(p, &state), NormalizedPoint::new(0.5, 0.5));
    }

    #[test]
    fn test_client_to_canvas_css_scaled_element() {
        // Element shrunk to half size by CSS
        let state = DisplayCanvasState::new(400.0, 300.0, 1.0, 400, 300);
        let rect = CanvasRect::new(0.0, 0.0, 200.0, 150.0);
        assert_eq!(
            client_to_canvas(100.0, 75.0, &rect, &state),
            CanvasPoint::new(200.0, 150.0)
        );
    }

    #[test]
    fn test_client_to_canvas_zero_rect_falls_back_to_dpr() {
        let state = retina_state();
        let rect = CanvasRect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(
            client_to_canvas(60.0, 35.0, &rect, &state),
            CanvasPoint::new(100.0, 50.0)
        );
    }

    #[test]
    fn test_no_clamping_outside_canvas() {
        let state = retina_state();
        let rect = CanvasRect::new(0.0, 0.0, 400.0, 300.0);
        let p = client_to_canvas(-40.0, 600.0, &rect, &state);
        let n = canvas_to_normalized(p, &state);
        assert_eq!(n, NormalizedPoint::new(-0.1, 2.0));
    }

    #[test]
    fn test_normalized_to_canvas_and_source() {
        let state = retina_state();
        let p = normalized_to_canvas(NormalizedPoint::new(0.25, 0.5), &state);
        assert_eq!(p, CanvasPoint::new(200.0, 300.0));
        assert_eq!(canvas_to_source(p, &state), (1000.0, 1500.0));
    }
}
