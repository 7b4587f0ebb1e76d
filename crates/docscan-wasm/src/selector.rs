//! Corner selector bindings and the browser canvas backend.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, JsQuadSelector } from '@docscan/wasm';
//!
//! const selector = new JsQuadSelector(decode_image(bytes), box.width, box.height, undefined);
//! canvas.style.width = `${selector.css_width}px`;
//! canvas.style.height = `${selector.css_height}px`;
//! selector.render(canvas.getContext('2d'));
//!
//! canvas.addEventListener('pointerdown', (e) => {
//!   const r = canvas.getBoundingClientRect();
//!   if (selector.pointer_down(e.clientX, e.clientY, r.left, r.top, r.width, r.height)) {
//!     selector.render(ctx);
//!   }
//! });
//! ```

use crate::types::{options_from_js, JsDecodedImage};
use docscan_core::decode::{DecodeError, DecodedImage};
use docscan_core::encode::OutputFormat;
use docscan_core::selector::{Canvas, CanvasPoint, CanvasRect, QuadSelector, Viewport};
use docscan_core::{PointerKind, Rgba, SelectorConfig};
use std::f64::consts::TAU;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, ImageData};

/// Interactive corner selection over one photo.
///
/// Every pointer method returns `true` when the canvas should be redrawn.
#[wasm_bindgen]
pub struct JsQuadSelector {
    inner: QuadSelector,
}

#[wasm_bindgen]
impl JsQuadSelector {
    /// Open a selector sized to the container.
    ///
    /// The pixel ratio and pointer kind are read from the window. `config`
    /// may be `undefined` or a partial `SelectorConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        image: &JsDecodedImage,
        container_width: f64,
        container_height: f64,
        config: JsValue,
    ) -> Result<JsQuadSelector, JsValue> {
        let config: SelectorConfig = options_from_js(config, "selector config")?;
        let viewport = Viewport::new(container_width, container_height, device_pixel_ratio());
        Self::open(image.to_decoded(), viewport, current_pointer_kind(), config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Canvas width in css pixels
    #[wasm_bindgen(getter)]
    pub fn css_width(&self) -> f64 {
        self.inner.state().css_width
    }

    /// Canvas height in css pixels
    #[wasm_bindgen(getter)]
    pub fn css_height(&self) -> f64 {
        self.inner.state().css_height
    }

    /// Whether the initial corners came from detected page edges
    #[wasm_bindgen(getter)]
    pub fn detected(&self) -> bool {
        self.inner.detection().detected
    }

    #[wasm_bindgen(getter)]
    pub fn selected_corner(&self) -> Option<u32> {
        self.inner.selected().map(|i| i as u32)
    }

    #[wasm_bindgen(getter)]
    pub fn pointer_kind(&self) -> String {
        pointer_kind_name(self.inner.pointer_kind()).to_string()
    }

    /// Switch between `"fine"` and `"coarse"` hit-testing.
    pub fn set_pointer_kind(&mut self, kind: &str) -> Result<bool, JsValue> {
        let kind = pointer_kind_from_str(kind)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown pointer kind: {}", kind)))?;
        Ok(self.inner.set_pointer_kind(kind))
    }

    /// Current corners as `[x0, y0, x1, y1, x2, y2, x3, y3]`.
    pub fn corners(&self) -> Vec<f64> {
        self.inner.quad().to_flat().to_vec()
    }

    /// Rect arguments are the canvas `getBoundingClientRect()`.
    pub fn pointer_down(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        rect_height: f64,
    ) -> bool {
        let rect = CanvasRect::new(rect_left, rect_top, rect_width, rect_height);
        self.inner.pointer_down(client_x, client_y, &rect)
    }

    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        rect_height: f64,
    ) -> bool {
        let rect = CanvasRect::new(rect_left, rect_top, rect_width, rect_height);
        self.inner.pointer_move(client_x, client_y, &rect)
    }

    /// Also call on `pointerleave` and `pointercancel`.
    pub fn pointer_up(&mut self) -> bool {
        self.inner.pointer_up()
    }

    /// Back to the default inset quadrilateral.
    pub fn reset(&mut self) -> bool {
        self.inner.reset()
    }

    /// Back to the proposed corners.
    pub fn cancel(&mut self) -> bool {
        self.inner.cancel()
    }

    /// Refit after the container resized or the window moved to a screen
    /// with a different pixel ratio.
    pub fn resize(&mut self, container_width: f64, container_height: f64) -> Result<bool, JsValue> {
        let viewport = Viewport::new(container_width, container_height, device_pixel_ratio());
        self.inner
            .set_viewport(viewport)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Redraw the photo and overlay, resizing the canvas backing store.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let mut canvas = WebCanvas::new(ctx.clone());
        self.inner.render(&mut canvas)
    }

    /// Rectify the selection at full resolution and encode it.
    ///
    /// `format` is `{ kind: 'jpeg', quality }`, `{ kind: 'png' }` or
    /// `undefined` for JPEG at quality 90.
    pub fn commit(&self, format: JsValue) -> Result<Vec<u8>, JsValue> {
        let format: OutputFormat = options_from_js(format, "output format")?;
        self.inner
            .commit(format)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Rectify without encoding, e.g. to run enhancements first.
    pub fn commit_image(&self) -> Result<JsDecodedImage, JsValue> {
        self.inner
            .rectified()
            .map(JsDecodedImage::from_decoded)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsQuadSelector {
    pub(crate) fn open(
        source: DecodedImage,
        viewport: Viewport,
        pointer: PointerKind,
        config: SelectorConfig,
    ) -> Result<Self, DecodeError> {
        QuadSelector::new(source, viewport, pointer, config).map(|inner| Self { inner })
    }
}

/// `"coarse"` when the primary pointer is a finger, otherwise `"fine"`.
#[wasm_bindgen]
pub fn detect_pointer_kind() -> String {
    pointer_kind_name(current_pointer_kind()).to_string()
}

/// The window's device pixel ratio, 1 outside a browser window.
#[wasm_bindgen]
pub fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
}

fn current_pointer_kind() -> PointerKind {
    let coarse = web_sys::window()
        .and_then(|w| w.match_media("(pointer: coarse)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false);
    if coarse {
        PointerKind::Coarse
    } else {
        PointerKind::Fine
    }
}

fn pointer_kind_name(kind: PointerKind) -> &'static str {
    match kind {
        PointerKind::Fine => "fine",
        PointerKind::Coarse => "coarse",
    }
}

fn pointer_kind_from_str(value: &str) -> Option<PointerKind> {
    match value {
        "fine" => Some(PointerKind::Fine),
        "coarse" => Some(PointerKind::Coarse),
        _ => None,
    }
}

/// [`Canvas`] backed by a 2D rendering context.
pub(crate) struct WebCanvas {
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    pub(crate) fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn set_dash(&self, dash: &[f64]) -> Result<(), JsValue> {
        let segments = js_sys::Array::new();
        for length in dash {
            segments.push(&JsValue::from_f64(*length));
        }
        self.ctx.set_line_dash(&segments)
    }

    fn circle_path(&self, center: CanvasPoint, radius: f64) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, TAU)
    }
}

impl Canvas for WebCanvas {
    type Error = JsValue;

    fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        let element = self
            .ctx
            .canvas()
            .ok_or_else(|| JsValue::from_str("Rendering context has no canvas"))?;
        // Assigning the size clears the canvas, so skip it when unchanged
        if element.width() != width {
            element.set_width(width);
        }
        if element.height() != height {
            element.set_height(height);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), JsValue> {
        let Some(element) = self.ctx.canvas() else {
            return Ok(());
        };
        self.ctx
            .clear_rect(0.0, 0.0, element.width() as f64, element.height() as f64);
        Ok(())
    }

    fn draw_image(&mut self, image: &DecodedImage) -> Result<(), JsValue> {
        let rgba = image.to_rgba();
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(rgba.as_slice()),
            image.width,
            image.height,
        )?;
        self.ctx.put_image_data(&data, 0.0, 0.0)
    }

    fn stroke_dashed_line(
        &mut self,
        from: CanvasPoint,
        to: CanvasPoint,
        color: Rgba,
        width: f64,
        dash: [f64; 2],
    ) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.set_dash(&dash)?;
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        self.set_dash(&[])
    }

    fn fill_circle(&mut self, center: CanvasPoint, radius: f64, color: Rgba) -> Result<(), JsValue> {
        self.circle_path(center, radius)?;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: CanvasPoint,
        radius: f64,
        color: Rgba,
        width: f64,
    ) -> Result<(), JsValue> {
        self.circle_path(center, radius)?;
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
        Ok(())
    }
}
