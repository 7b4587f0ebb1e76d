//! One corner-selection session over a decoded photo.

use tracing::debug;

use crate::config::{PointerKind, SelectorConfig};
use crate::decode::{resize, DecodeError, DecodedImage, FilterType};
use crate::detect::{detect_corners, DetectionOutcome};
use crate::encode::{encode, OutputFormat};
use crate::transform::{rectify_image, RectifyError};
use crate::Quadrilateral;

use super::corners::CornerModel;
use super::mapper::{canvas_to_normalized, client_to_canvas, CanvasRect, DisplayCanvasState};
use super::render::{fit_to_container, render, Canvas, RenderFrame, Viewport};

/// Interactive quadrilateral selection over one source image.
///
/// Pointer methods return `true` when the overlay needs a redraw. The host
/// is expected to call [`render`](Self::render) after each such event.
#[derive(Debug, Clone)]
pub struct QuadSelector {
    source: DecodedImage,
    /// Source scaled to the canvas backing store
    display: DecodedImage,
    config: SelectorConfig,
    pointer: PointerKind,
    viewport: Viewport,
    state: DisplayCanvasState,
    corners: CornerModel,
    detection: DetectionOutcome,
}

impl QuadSelector {
    /// Open a session, proposing initial corners from the photo.
    ///
    /// # Errors
    ///
    /// Fails if the source pixel buffer does not match its dimensions or
    /// cannot be scaled to the display size.
    pub fn new(
        source: DecodedImage,
        viewport: Viewport,
        pointer: PointerKind,
        config: SelectorConfig,
    ) -> Result<Self, DecodeError> {
        source.check_buffer()?;
        let detection = detect_corners(&source, &config);
        let viewport = Viewport {
            controls_height: config.controls_height,
            ..viewport
        };
        let state = fit_to_container(source.width, source.height, &viewport);
        let display = scale_for_display(&source, &state)?;

        debug!(
            detected = detection.detected,
            ?pointer,
            "Opened corner selector"
        );

        Ok(Self {
            corners: CornerModel::new(detection.quad, &config),
            source,
            display,
            config,
            pointer,
            viewport,
            state,
            detection,
        })
    }

    pub fn source(&self) -> &DecodedImage {
        &self.source
    }

    pub fn state(&self) -> &DisplayCanvasState {
        &self.state
    }

    pub fn detection(&self) -> &DetectionOutcome {
        &self.detection
    }

    pub fn pointer_kind(&self) -> PointerKind {
        self.pointer
    }

    pub fn quad(&self) -> Quadrilateral {
        self.corners.quad()
    }

    pub fn selected(&self) -> Option<usize> {
        self.corners.selected()
    }

    /// Refit the canvas after the container or pixel ratio changed.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<bool, DecodeError> {
        let viewport = Viewport {
            controls_height: self.config.controls_height,
            ..viewport
        };
        if viewport == self.viewport {
            return Ok(false);
        }
        let state = fit_to_container(self.source.width, self.source.height, &viewport);
        if state.backing_width != self.state.backing_width
            || state.backing_height != self.state.backing_height
        {
            self.display = scale_for_display(&self.source, &state)?;
        }
        self.viewport = viewport;
        self.state = state;
        Ok(true)
    }

    pub fn set_pointer_kind(&mut self, pointer: PointerKind) -> bool {
        let changed = self.pointer != pointer;
        self.pointer = pointer;
        changed
    }

    /// Select the corner under the pointer, if any.
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, rect: &CanvasRect) -> bool {
        let point = client_to_canvas(client_x, client_y, rect, &self.state);
        let radius = self.config.hit_radius(self.pointer);
        let hit = self.corners.hit_test(point, &self.state, radius);
        self.corners.begin_drag(hit)
    }

    /// Drag the selected corner. Ignored when nothing is selected.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, rect: &CanvasRect) -> bool {
        if self.corners.selected().is_none() {
            return false;
        }
        let point = client_to_canvas(client_x, client_y, rect, &self.state);
        self.corners
            .update_drag(canvas_to_normalized(point, &self.state))
    }

    /// Release the selection. Also used for pointer-leave and touch-cancel.
    pub fn pointer_up(&mut self) -> bool {
        self.corners.end_drag()
    }

    /// Restore the default inset quadrilateral.
    pub fn reset(&mut self) -> bool {
        let before = (self.corners.quad(), self.corners.selected());
        self.corners.reset();
        before != (self.corners.quad(), self.corners.selected())
    }

    /// Discard every edit and return to the proposed corners.
    pub fn cancel(&mut self) -> bool {
        let before = (self.corners.quad(), self.corners.selected());
        self.corners.set_quad(self.detection.quad);
        before != (self.corners.quad(), self.corners.selected())
    }

    /// Snapshot of what the next redraw should show.
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            image: &self.display,
            quad: self.corners.quad(),
            selected: self.corners.selected(),
            halos: self.config.touch_halos && self.pointer == PointerKind::Coarse,
        }
    }

    /// Redraw the overlay onto `canvas`.
    pub fn render<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        render(canvas, &self.frame(), &self.state, &self.config.style)
    }

    /// Rectify the selected region of the full-resolution source.
    pub fn rectified(&self) -> Result<DecodedImage, RectifyError> {
        rectify_image(&self.source, &self.corners.quad())
    }

    /// Rectify and encode the selected region.
    pub fn commit(&self, format: OutputFormat) -> Result<Vec<u8>, RectifyError> {
        let page = self.rectified()?;
        Ok(encode(&page, format)?)
    }
}

fn scale_for_display(
    source: &DecodedImage,
    state: &DisplayCanvasState,
) -> Result<DecodedImage, DecodeError> {
    resize(
        source,
        state.backing_width,
        state.backing_height,
        FilterType::Bilinear,
    )
}
