//! docscan Core - document corner selection and rectification
//!
//! This crate provides the image-processing core of the docscan document
//! scanner: the interactive four-corner selector, the rectifying transform,
//! automatic corner proposals, page enhancement, and image decode/encode at
//! the host boundary.

pub mod config;
pub mod decode;
pub mod detect;
pub mod encode;
pub mod enhance;
pub mod luminance;
pub mod selector;
pub mod transform;

pub use config::{ExportOptions, OverlayStyle, PointerKind, Rgba, SelectorConfig};
pub use detect::{detect_corners, propose_corners, DetectionOutcome};
pub use enhance::{apply_enhancements, ColorMode, EnhanceSettings};
pub use selector::{QuadSelector, RasterCanvas};
pub use transform::{auto_crop, rectify, rectify_image, rectify_or_original, RectifyError};

use serde::{Deserialize, Serialize};

/// Inset of the default quadrilateral from each image edge.
pub const DEFAULT_INSET: f64 = 0.1;

/// A point in image-relative coordinates (0.0 to 1.0 on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Horizontal position as a fraction of image width
    pub x: f64,
    /// Vertical position as a fraction of image height
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes independently into `[min, max]`.
    pub fn clamped(self, min: f64, max: f64) -> Self {
        Self {
            x: self.x.clamp(min, max),
            y: self.y.clamp(min, max),
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Absolute pixel position in an image of the given size.
    pub fn to_pixels(self, width: u32, height: u32) -> (f64, f64) {
        (self.x * width as f64, self.y * height as f64)
    }
}

/// Semantic role of each quadrilateral corner.
///
/// The discriminant is the corner's index in [`Quadrilateral::corners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Corner index pairs walked around the outline: TL → TR → BR → BL → TL.
///
/// This is not array order; the last two corners are visited swapped.
pub const PERIMETER_EDGES: [(usize, usize); 4] = [(0, 1), (1, 3), (3, 2), (2, 0)];

/// Four document corners in normalized coordinates.
///
/// Corner order is positional (see [`Corner`]). The shape is not validated:
/// it may be concave or self-intersecting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub corners: [NormalizedPoint; 4],
}

impl Default for Quadrilateral {
    fn default() -> Self {
        Self::inset(DEFAULT_INSET)
    }
}

impl Quadrilateral {
    pub fn new(corners: [NormalizedPoint; 4]) -> Self {
        Self { corners }
    }

    /// Axis-aligned quadrilateral inset by `margin` from every image edge.
    pub fn inset(margin: f64) -> Self {
        let far = 1.0 - margin;
        Self {
            corners: [
                NormalizedPoint::new(margin, margin),
                NormalizedPoint::new(far, margin),
                NormalizedPoint::new(margin, far),
                NormalizedPoint::new(far, far),
            ],
        }
    }

    #[inline]
    pub fn corner(&self, corner: Corner) -> NormalizedPoint {
        self.corners[corner.index()]
    }

    /// Flatten to `[x0, y0, x1, y1, x2, y2, x3, y3]` for the JS boundary.
    pub fn to_flat(&self) -> [f64; 8] {
        let mut flat = [0.0; 8];
        for (i, p) in self.corners.iter().enumerate() {
            flat[i * 2] = p.x;
            flat[i * 2 + 1] = p.y;
        }
        flat
    }

    /// Inverse of [`to_flat`](Self::to_flat). Returns `None` unless exactly
    /// eight values are given.
    pub fn from_flat(values: &[f64]) -> Option<Self> {
        if values.len() != 8 {
            return None;
        }
        let mut corners = [NormalizedPoint::default(); 4];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = NormalizedPoint::new(values[i * 2], values[i * 2 + 1]);
        }
        Some(Self { corners })
    }

    /// Normalized bounding box as `(left, top, right, bottom)`.
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        self.corners.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(l, t, r, b), p| (l.min(p.x), t.min(p.y), r.max(p.x), b.max(p.y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quad_is_inset_tenth() {
        let quad = Quadrilateral::default();
        assert_eq!(quad.corner(Corner::TopLeft), NormalizedPoint::new(0.1, 0.1));
        assert_eq!(quad.corner(Corner::TopRight), NormalizedPoint::new(0.9, 0.1));
        assert_eq!(quad.corner(Corner::BottomLeft), NormalizedPoint::new(0.1, 0.9));
        assert_eq!(quad.corner(Corner::BottomRight), NormalizedPoint::new(0.9, 0.9));
    }

    #[test]
    fn test_corner_index_round_trip() {
        for corner in Corner::ALL {
            assert_eq!(Corner::from_index(corner.index()), Some(corner));
        }
        assert_eq!(Corner::from_index(4), None);
    }

    #[test]
    fn test_perimeter_visits_every_corner_once() {
        let starts: Vec<usize> = PERIMETER_EDGES.iter().map(|(a, _)| *a).collect();
        assert_eq!(starts, vec![0, 1, 3, 2]);
        for (i, (_, end)) in PERIMETER_EDGES.iter().enumerate() {
            assert_eq!(*end, PERIMETER_EDGES[(i + 1) % 4].0);
        }
    }

    #[test]
    fn test_flat_conversion() {
        let quad = Quadrilateral::default();
        let flat = quad.to_flat();
        assert_eq!(flat, [0.1, 0.1, 0.9, 0.1, 0.1, 0.9, 0.9, 0.9]);
        assert_eq!(Quadrilateral::from_flat(&flat), Some(quad));
        assert_eq!(Quadrilateral::from_flat(&flat[..6]), None);
    }

    #[test]
    fn test_bounding_box_of_skewed_quad() {
        let quad = Quadrilateral::new([
            NormalizedPoint::new(0.2, 0.1),
            NormalizedPoint::new(0.8, 0.15),
            NormalizedPoint::new(0.1, 0.9),
            NormalizedPoint::new(0.95, 0.85),
        ]);
        assert_eq!(quad.bounding_box(), (0.1, 0.1, 0.95, 0.9));
    }

    #[test]
    fn test_point_clamping_and_pixels() {
        let p = NormalizedPoint::new(-0.5, 2.0).clamped(0.05, 0.95);
        assert_eq!(p, NormalizedPoint::new(0.05, 0.95));
        assert_eq!(NormalizedPoint::new(0.5, 0.25).to_pixels(200, 100), (100.0, 25.0));
        assert!(!NormalizedPoint::new(f64::NAN, 0.0).is_finite());
    }
}
