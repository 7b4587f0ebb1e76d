//! Interactive four-corner selection.
//!
//! # Flow
//!
//! 1. [`QuadSelector::new`] proposes corners and fits the photo to the
//!    container ([`fit_to_container`])
//! 2. Pointer events are mapped client → canvas → normalized
//!    ([`mapper`]) and applied to the [`CornerModel`]
//! 3. Every state change is followed by a full redraw ([`render`]) of a
//!    [`RenderFrame`] snapshot onto a [`Canvas`]
//! 4. [`QuadSelector::commit`] rectifies the full-resolution source

mod corners;
pub mod mapper;
mod raster_canvas;
mod render;
mod session;

pub use corners::CornerModel;
pub use mapper::{
    canvas_to_normalized, canvas_to_source, client_to_canvas, normalized_to_canvas, CanvasPoint,
    CanvasRect, DisplayCanvasState,
};
pub use raster_canvas::RasterCanvas;
pub use render::{fit_to_container, render, Canvas, RenderFrame, Viewport, DEFAULT_CONTROLS_HEIGHT};
pub use session::QuadSelector;
