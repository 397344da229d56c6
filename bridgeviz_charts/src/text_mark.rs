// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis label generation.

extern crate alloc;

use alloc::string::String;

use bridgeviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::Point;
use peniko::{Brush, Color};

/// A text mark spec.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Unshaped text.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Paint order.
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Creates a label with the default axis label styling.
    pub fn new(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self {
            id,
            pos,
            text: text.into(),
            font_size: 10.0,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
            fill: Brush::Solid(Color::BLACK),
            z_index: crate::z_order::AXIS_LABELS,
        }
    }

    /// Sets the font size and fill.
    pub fn with_style(mut self, font_size: f64, fill: Brush) -> Self {
        self.font_size = font_size;
        self.fill = fill;
        self
    }

    /// Sets anchor and baseline.
    pub fn aligned(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        self.anchor = anchor;
        self.baseline = baseline;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .text()
            .z_index(self.z_index)
            .x_const(self.pos.x)
            .y_const(self.pos.y)
            .text_const(self.text.clone())
            .font_size_const(self.font_size)
            .fill_brush_const(self.fill.clone())
            .text_anchor(self.anchor)
            .text_baseline(self.baseline)
            .build()
    }
}
