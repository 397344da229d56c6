// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

use bridgeviz_core::{Mark, MarkId};
use peniko::Color;

use crate::rule_mark::StrokeStyle;
use crate::scale::Band;
use crate::view_model::DataPoint;

/// Key namespace of bar marks.
pub const BAR_NAMESPACE: u32 = 1;

/// Id of the bar drawn for the point with identity `key`.
pub fn bar_id(key: u64) -> MarkId {
    MarkId::for_key(BAR_NAMESPACE, key)
}

/// A single vertical bar spanning `[y0, y1]` over a band.
///
/// Either end may be the top; the generated rect is normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct BarMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Horizontal extent in scene coordinates.
    pub band: Band,
    /// One vertical end in scene coordinates.
    pub y0: f64,
    /// The other vertical end in scene coordinates.
    pub y1: f64,
    /// Fill color.
    pub fill: Color,
    /// Outline.
    pub stroke: StrokeStyle,
    /// Whole-bar opacity.
    pub opacity: f64,
    /// Paint order.
    pub z_index: i32,
}

impl BarMarkSpec {
    /// A bar for `point` over `band`, spanning `y0..y1`.
    pub fn for_point(point: &DataPoint, band: Band, y0: f64, y1: f64) -> Self {
        Self {
            id: bar_id(point.key),
            band,
            y0,
            y1,
            fill: point.color,
            stroke: StrokeStyle::none(),
            opacity: 1.0,
            z_index: crate::z_order::BARS,
        }
    }

    /// Sets the outline.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    /// Generates the interactive rect mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .rect()
            .z_index(self.z_index)
            .interactive(true)
            .x_const(self.band.x)
            .y_const(self.y0.min(self.y1))
            .w_const(self.band.width)
            .h_const(self.height())
            .fill_const(self.fill)
            .stroke_brush_const(self.stroke.brush.clone())
            .stroke_width_const(self.stroke.width)
            .opacity_const(self.opacity)
            .build()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;

    use kurbo::Rect;

    use super::*;
    use crate::selection::SelectionHandle;
    use crate::view_model::PointRef;

    #[test]
    fn bar_spans_its_ends_regardless_of_order() {
        let point = DataPoint {
            category: String::from("A"),
            value: 10.0,
            color: Color::WHITE,
            selection_handle: SelectionHandle::for_row("A", 0),
            source: PointRef::Row(0),
            key: 9,
        };
        let band = Band {
            x: 10.0,
            width: 90.0,
        };
        let m = BarMarkSpec::for_point(&point, band, 200.0, 150.0)
            .with_opacity(0.3)
            .mark();
        assert_eq!(m.id, bar_id(9));
        assert!(m.interactive);
        assert_eq!(m.bounds(), Some(Rect::new(10.0, 150.0, 100.0, 200.0)));
        assert_eq!(m.payload.opacity(), Some(0.3));
    }
}
