// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight stroked segments: bar connectors, axis domains, and ticks.

use bridgeviz_core::{Mark, MarkId};
use kurbo::{BezPath, Line};
use peniko::{Brush, Color};

/// A paint and width pair for stroked outlines and lines.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates; `0` disables the stroke.
    pub width: f64,
}

impl StrokeStyle {
    /// A solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            brush: Brush::Solid(color),
            width,
        }
    }

    /// No stroke at all.
    pub fn none() -> Self {
        Self::solid(Color::TRANSPARENT, 0.0)
    }
}

impl Default for StrokeStyle {
    /// One pixel of black.
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// A rule mark spec.
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Segment in scene coordinates.
    pub line: Line,
    /// Stroke.
    pub stroke: StrokeStyle,
    /// Paint order.
    pub z_index: i32,
}

impl RuleMarkSpec {
    /// A rule from `(x0, y0)` to `(x1, y1)` with the default stroke.
    pub fn new(id: MarkId, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            id,
            line: Line::new((x0, y0), (x1, y1)),
            stroke: StrokeStyle::default(),
            z_index: crate::z_order::CONNECTORS,
        }
    }

    /// A horizontal rule at `y`.
    pub fn horizontal(id: MarkId, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(id, x0, y, x1, y)
    }

    /// A vertical rule at `x`.
    pub fn vertical(id: MarkId, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(id, x, y0, x, y1)
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the path mark.
    pub fn mark(&self) -> Mark {
        let mut path = BezPath::new();
        path.move_to(self.line.p0);
        path.line_to(self.line.p1);
        Mark::builder(self.id)
            .path()
            .path_const(path)
            .z_index(self.z_index)
            .fill_const(Color::TRANSPARENT)
            .stroke_brush_const(self.stroke.brush.clone())
            .stroke_width_const(self.stroke.width)
            .build()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Rect;

    use super::*;

    #[test]
    fn horizontal_rule_spans_its_endpoints() {
        let m = RuleMarkSpec::horizontal(MarkId::from_raw(7), 40.0, 10.0, 30.0).mark();
        assert_eq!(m.bounds(), Some(Rect::new(10.0, 40.0, 30.0, 40.0)));
        assert_eq!(m.z_index, crate::z_order::CONNECTORS);
    }
}
