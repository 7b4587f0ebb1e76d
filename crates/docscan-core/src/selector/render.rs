//! Fitting the photo into its container and drawing the corner overlay.
//!
//! Every call to [`render`] is a full redraw: the backing store is resized,
//! cleared, the photo is drawn, then the dashed outline and the handles on
//! top. Nothing is drawn incrementally.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{OverlayStyle, Rgba};
use crate::decode::DecodedImage;
use crate::{Quadrilateral, PERIMETER_EDGES};

use super::mapper::{normalized_to_canvas, CanvasPoint, DisplayCanvasState};

/// Default vertical space reserved for the confirm/cancel buttons.
pub const DEFAULT_CONTROLS_HEIGHT: f64 = 100.0;

/// Space available to the selector, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub container_width: f64,
    pub container_height: f64,
    /// Subtracted from the container height before fitting
    pub controls_height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(container_width: f64, container_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            container_width,
            container_height,
            controls_height: DEFAULT_CONTROLS_HEIGHT,
            device_pixel_ratio,
        }
    }
}

/// Size the display canvas to show the whole image at its aspect ratio.
///
/// Images wider than the available area are fitted to its width, all others
/// to its height.
pub fn fit_to_container(
    image_width: u32,
    image_height: u32,
    viewport: &Viewport,
) -> DisplayCanvasState {
    let max_width = viewport.container_width.max(1.0);
    let max_height = (viewport.container_height - viewport.controls_height).max(1.0);

    let image_aspect = image_width.max(1) as f64 / image_height.max(1) as f64;
    let container_aspect = max_width / max_height;

    let (css_width, css_height) = if image_aspect > container_aspect {
        (max_width, max_width / image_aspect)
    } else {
        (max_height * image_aspect, max_height)
    };

    let state = DisplayCanvasState::new(
        css_width,
        css_height,
        viewport.device_pixel_ratio,
        image_width,
        image_height,
    );
    debug!(
        css_width,
        css_height,
        backing_width = state.backing_width,
        backing_height = state.backing_height,
        "Fitted selector canvas"
    );
    state
}

/// Drawing surface for the overlay.
///
/// Coordinates are backing-store pixels. Implemented by the software
/// [`RasterCanvas`](super::RasterCanvas) and by the browser canvas binding.
pub trait Canvas {
    type Error;

    /// Set the backing-store size.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Self::Error>;

    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Draw an RGB image scaled to cover the whole canvas.
    fn draw_image(&mut self, image: &DecodedImage) -> Result<(), Self::Error>;

    fn stroke_dashed_line(
        &mut self,
        from: CanvasPoint,
        to: CanvasPoint,
        color: Rgba,
        width: f64,
        dash: [f64; 2],
    ) -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        center: CanvasPoint,
        radius: f64,
        color: Rgba,
    ) -> Result<(), Self::Error>;

    fn stroke_circle(
        &mut self,
        center: CanvasPoint,
        radius: f64,
        color: Rgba,
        width: f64,
    ) -> Result<(), Self::Error>;
}

/// Everything one redraw needs, captured at the moment it was requested.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    /// Photo already scaled to the backing store
    pub image: &'a DecodedImage,
    pub quad: Quadrilateral,
    pub selected: Option<usize>,
    /// Draw touch halos behind the handles
    pub halos: bool,
}

/// Redraw the whole selector.
pub fn render<C: Canvas>(
    canvas: &mut C,
    frame: &RenderFrame<'_>,
    state: &DisplayCanvasState,
    style: &OverlayStyle,
) -> Result<(), C::Error> {
    let dpr = state.device_pixel_ratio;

    canvas.resize(state.backing_width, state.backing_height)?;
    canvas.clear()?;
    canvas.draw_image(frame.image)?;

    let points = frame.quad.corners.map(|p| normalized_to_canvas(p, state));
    let dash = [style.dash[0] * dpr, style.dash[1] * dpr];

    for (from, to) in PERIMETER_EDGES {
        canvas.stroke_dashed_line(
            points[from],
            points[to],
            style.accent,
            style.line_width * dpr,
            dash,
        )?;
    }

    for (index, point) in points.iter().enumerate() {
        if frame.halos {
            canvas.fill_circle(*point, style.halo_radius * dpr, style.halo)?;
        }

        let fill = if frame.selected == Some(index) {
            style.active
        } else {
            style.accent
        };
        canvas.fill_circle(*point, style.handle_radius * dpr, fill)?;
        canvas.stroke_circle(
            *point,
            style.handle_radius * dpr,
            style.outline,
            style.outline_width * dpr,
        )?;
    }

    Ok(())
}
