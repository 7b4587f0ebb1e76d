//! The four draggable corners and the active selection.

use crate::config::SelectorConfig;
use crate::{NormalizedPoint, Quadrilateral};

use super::mapper::{normalized_to_canvas, CanvasPoint, DisplayCanvasState};

/// Corner positions plus at most one selected corner.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerModel {
    quad: Quadrilateral,
    selected: Option<usize>,
    drag_margin: f64,
    default_inset: f64,
}

impl CornerModel {
    pub fn new(quad: Quadrilateral, config: &SelectorConfig) -> Self {
        Self {
            quad,
            selected: None,
            drag_margin: config.drag_margin,
            default_inset: config.default_inset,
        }
    }

    pub fn quad(&self) -> Quadrilateral {
        self.quad
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Replace all four corners and drop the selection.
    pub fn set_quad(&mut self, quad: Quadrilateral) {
        self.quad = quad;
        self.selected = None;
    }

    /// Nearest corner within `radius` canvas pixels of `point`.
    ///
    /// Equidistant corners resolve to the lowest index.
    pub fn hit_test(
        &self,
        point: CanvasPoint,
        state: &DisplayCanvasState,
        radius: f64,
    ) -> Option<usize> {
        let mut nearest: Option<(usize, f64)> = None;

        for (index, corner) in self.quad.corners.iter().enumerate() {
            let dist = normalized_to_canvas(*corner, state).distance(point);
            if dist > radius || dist.is_nan() {
                continue;
            }
            if nearest.map_or(true, |(_, best)| dist < best) {
                nearest = Some((index, dist));
            }
        }

        nearest.map(|(index, _)| index)
    }

    /// Start dragging a corner. `None` and out-of-range indices are ignored.
    ///
    /// Returns true when the selection changed.
    pub fn begin_drag(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i < self.quad.corners.len() && self.selected != Some(i) => {
                self.selected = Some(i);
                true
            }
            _ => false,
        }
    }

    /// Move the selected corner, clamping each axis to the drag margin.
    ///
    /// Returns true when a corner moved. Non-finite positions are dropped.
    pub fn update_drag(&mut self, point: NormalizedPoint) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        if !point.is_finite() {
            return false;
        }

        let clamped = point.clamped(self.drag_margin, 1.0 - self.drag_margin);
        if self.quad.corners[index] == clamped {
            return false;
        }
        self.quad.corners[index] = clamped;
        true
    }

    /// Release the selection. Returns true if a corner was selected.
    pub fn end_drag(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Restore the default inset quadrilateral and clear the selection.
    pub fn reset(&mut self) {
        self.set_quad(Quadrilateral::inset(self.default_inset));
    }
}
