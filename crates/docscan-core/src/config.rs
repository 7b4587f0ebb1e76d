//! Configuration for the corner selector and export options.
//!
//! Field names are camelCase on the JavaScript side.
//!
//! Every struct here deserializes with `#[serde(default)]`, so the host can
//! pass a partial object (or nothing) and get the scanner's stock behaviour.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_INSET;

/// Primary pointing device reported by the platform.
///
/// Determined by the host via a capability check (the `(pointer: coarse)`
/// media query in the browser), never guessed from screen size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Mouse, trackpad or stylus.
    #[default]
    Fine,
    /// Finger on a touch screen.
    Coarse,
}

/// An sRGB colour with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba([r, g, b, 255])
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        let [r, g, b, _] = self.0;
        Rgba([r, g, b, alpha])
    }

    /// CSS colour string for canvas fill/stroke styles.
    pub fn to_css(self) -> String {
        let [r, g, b, a] = self.0;
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("rgba({}, {}, {}, {:.3})", r, g, b, a as f64 / 255.0)
        }
    }
}

/// Colours and sizes of the corner overlay, in css pixels.
///
/// Sizes are multiplied by the device pixel ratio when drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayStyle {
    /// Edge lines and idle handles
    pub accent: Rgba,
    /// Handle of the corner being dragged
    pub active: Rgba,
    /// Ring drawn around every handle
    pub outline: Rgba,
    /// Touch-target halo fill
    pub halo: Rgba,
    pub handle_radius: f64,
    pub halo_radius: f64,
    pub line_width: f64,
    pub outline_width: f64,
    /// Dash and gap lengths of the edge lines
    pub dash: [f64; 2],
}

impl Default for OverlayStyle {
    fn default() -> Self {
        let accent = Rgba::rgb(0x3b, 0x82, 0xf6);
        Self {
            accent,
            active: Rgba::rgb(0xef, 0x44, 0x44),
            outline: Rgba::WHITE,
            halo: accent.with_alpha(0x40),
            handle_radius: 12.0,
            halo_radius: 24.0,
            line_width: 2.0,
            outline_width: 2.0,
            dash: [5.0, 5.0],
        }
    }
}

/// Behaviour of the interactive corner selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Corners are clamped to `[drag_margin, 1 - drag_margin]` while dragging
    pub drag_margin: f64,
    /// Inset of the reset quadrilateral
    pub default_inset: f64,
    /// Hit-test radius in canvas pixels for fine pointers
    pub mouse_hit_radius: f64,
    /// Hit-test radius in canvas pixels for touch
    pub touch_hit_radius: f64,
    /// Vertical space (css px) reserved below the canvas for buttons
    pub controls_height: f64,
    /// Sobel magnitude below which the corner detector gives up
    pub min_edge_response: f32,
    /// Draw halos around handles on touch devices
    pub touch_halos: bool,
    pub style: OverlayStyle,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            drag_margin: 0.05,
            default_inset: DEFAULT_INSET,
            mouse_hit_radius: 30.0,
            touch_hit_radius: 40.0,
            controls_height: 100.0,
            min_edge_response: 1.0,
            touch_halos: true,
            style: OverlayStyle::default(),
        }
    }
}

impl SelectorConfig {
    /// Hit-test radius for the given pointing device.
    pub fn hit_radius(&self, pointer: PointerKind) -> f64 {
        match pointer {
            PointerKind::Fine => self.mouse_hit_radius,
            PointerKind::Coarse => self.touch_hit_radius,
        }
    }
}

/// Options handed to the host's PDF/DOCX writers together with the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    pub title: String,
    pub include_images: bool,
    pub include_text: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Scanned Document".to_string(),
            include_images: true,
            include_text: true,
        }
    }
}
