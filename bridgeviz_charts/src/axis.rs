// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! A bridge chart has two axes: a bottom axis labeling each band with its category, and a
//! left axis with nice ticks over the value domain. Both are a domain line, one tick per
//! entry, and one label per tick.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use bridgeviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::{Brush, Color};

use crate::layout::ChartScales;
use crate::rule_mark::{RuleMarkSpec, StrokeStyle};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Domain line and tick stroke.
    pub rule: StrokeStyle,
    /// Label paint.
    pub label_fill: Brush,
    /// Label font size.
    pub label_font_size: f64,
    /// Tick length.
    pub tick_size: f64,
    /// Gap between a tick's end and its label.
    pub tick_padding: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: StrokeStyle::default(),
            label_fill: Brush::Solid(Color::BLACK),
            label_font_size: 10.0,
            tick_size: 6.0,
            tick_padding: 3.0,
        }
    }
}

/// Which side of the plot an axis sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Category axis below the plot.
    Bottom,
    /// Value axis left of the plot.
    Left,
}

/// An axis specification.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from it.
    pub id_base: u64,
    /// Placement.
    pub orient: AxisOrient,
    /// Approximate number of value ticks (left axis only).
    pub tick_count: usize,
    /// Styling.
    pub style: AxisStyle,
}

impl AxisSpec {
    /// Category axis below the plot.
    pub fn bottom(id_base: u64) -> Self {
        Self {
            id_base,
            orient: AxisOrient::Bottom,
            tick_count: 0,
            style: AxisStyle::default(),
        }
    }

    /// Value axis left of the plot, with about ten ticks.
    pub fn left(id_base: u64) -> Self {
        Self {
            id_base,
            orient: AxisOrient::Left,
            tick_count: 10,
            style: AxisStyle::default(),
        }
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the styling.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Generates marks for this axis around `plot`.
    pub fn marks(&self, plot: Rect, scales: &ChartScales) -> Vec<Mark> {
        match self.orient {
            AxisOrient::Bottom => self.marks_bottom(plot, scales),
            AxisOrient::Left => self.marks_left(plot, scales),
        }
    }

    fn marks_bottom(&self, plot: Rect, scales: &ChartScales) -> Vec<Mark> {
        let y = plot.y1;
        let style = &self.style;
        let mut out = Vec::new();
        out.push(self.domain_rule(plot.x0, y, plot.x1, y));

        for (slot, category) in scales.category.domain().iter().enumerate() {
            let Some(band) = scales.category.band_at_slot(slot) else {
                continue;
            };
            let x = plot.x0 + band.center();
            out.push(self.tick_rule(slot, x, y, x, y + style.tick_size));
            out.push(
                self.label(slot, Point::new(x, y + style.tick_size + style.tick_padding), category)
                    .aligned(TextAnchor::Middle, TextBaseline::Hanging)
                    .mark(),
            );
        }
        out
    }

    fn marks_left(&self, plot: Rect, scales: &ChartScales) -> Vec<Mark> {
        let x = plot.x0;
        let style = &self.style;
        let value = scales.value.translated(plot.y0);
        let ticks = value.ticks(self.tick_count);
        let step = tick_step(&ticks);

        let mut out = Vec::new();
        out.push(self.domain_rule(x, plot.y0, x, plot.y1));
        for (i, v) in ticks.into_iter().enumerate() {
            let y = value.map(v);
            out.push(self.tick_rule(i, x, y, x - style.tick_size, y));
            out.push(
                self.label(
                    i,
                    Point::new(x - style.tick_size - style.tick_padding, y),
                    format_tick(v, step),
                )
                .aligned(TextAnchor::End, TextBaseline::Middle)
                .mark(),
            );
        }
        out
    }

    fn domain_rule(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Mark {
        RuleMarkSpec::new(MarkId::from_raw(self.id_base), x0, y0, x1, y1)
            .with_stroke(self.style.rule.clone())
            .with_z_index(z_order::AXIS_RULES)
            .mark()
    }

    fn tick_rule(&self, index: usize, x0: f64, y0: f64, x1: f64, y1: f64) -> Mark {
        let id = MarkId::from_raw(self.id_base + 1 + 2 * index as u64);
        RuleMarkSpec::new(id, x0, y0, x1, y1)
            .with_stroke(self.style.rule.clone())
            .with_z_index(z_order::AXIS_RULES)
            .mark()
    }

    fn label(&self, index: usize, pos: Point, text: impl Into<String>) -> TextMarkSpec {
        let id = MarkId::from_raw(self.id_base + 2 + 2 * index as u64);
        TextMarkSpec::new(id, pos, text)
            .with_style(self.style.label_font_size, self.style.label_fill.clone())
    }
}

/// Formats a tick value with just enough decimals to tell neighbors `step` apart.
pub fn format_tick(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        let d = (-step.log10() - 1e-9).ceil().clamp(0.0, 6.0);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped to 0..=6 above"
        )]
        {
            d as usize
        }
    } else {
        0
    };
    // Avoid printing "-0".
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v:.decimals$}")
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}
