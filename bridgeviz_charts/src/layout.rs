// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport arrangement and scale derivation.
//!
//! Layout is two steps:
//! - **Arrange**: carve the viewport into a plot rectangle and the axis strips around it.
//! - **Scale**: derive a category (band) scale and a value (linear) scale for the plot's
//!   drawable size from a [`ViewModel`].
//!
//! Scales work in plot-local coordinates; mark generation offsets them by the plot origin.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use crate::bridge::{ResolvedSegment, layout_order};
use crate::scale::{CategoryScale, DEFAULT_BAND_PADDING, ScaleLinear};
use crate::view_model::ViewModel;

/// A width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in scene units.
    pub width: f64,
    /// Height in scene units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margins {
    /// Above the plot.
    pub top: f64,
    /// Right of the plot.
    pub right: f64,
    /// Below the plot; holds the category axis.
    pub bottom: f64,
    /// Left of the plot; holds the value axis.
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 200.0,
            left: 70.0,
        }
    }
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Whole viewport.
    pub view: Rect,
    /// Drawable plot area.
    pub plot: Rect,
    /// Strip left of the plot (value axis), if axes are shown.
    pub axis_left: Option<Rect>,
    /// Strip below the plot (category axis), if axes are shown.
    pub axis_bottom: Option<Rect>,
}

impl ChartLayout {
    /// Places the plot inside `viewport` after removing `margins`.
    ///
    /// A viewport smaller than its margins yields a zero-sized plot rather than a negative one.
    pub fn arrange(viewport: Size, margins: &Margins, show_axes: bool) -> Self {
        let w = viewport.width.max(0.0);
        let h = viewport.height.max(0.0);
        let left = margins.left.max(0.0).min(w);
        let top = margins.top.max(0.0).min(h);
        let plot_w = (w - left - margins.right.max(0.0)).max(0.0);
        let plot_h = (h - top - margins.bottom.max(0.0)).max(0.0);
        let plot = Rect::new(left, top, left + plot_w, top + plot_h);
        let view = Rect::new(0.0, 0.0, w, h);

        let (axis_left, axis_bottom) = if show_axes {
            (
                Some(Rect::new(0.0, plot.y0, plot.x0, plot.y1)),
                Some(Rect::new(plot.x0, plot.y1, plot.x1, view.y1)),
            )
        } else {
            (None, None)
        };

        Self {
            view,
            plot,
            axis_left,
            axis_bottom,
        }
    }
}

/// Category and value scales for one update cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartScales {
    /// Bands for each point, in layout order.
    pub category: CategoryScale,
    /// `[0, value_max]` onto `[height, 0]`.
    pub value: ScaleLinear,
    /// Layout order as view-model point indices.
    pub order: Vec<usize>,
}

impl ChartScales {
    /// Scales with bands in view-model order and the default padding.
    pub fn layout(view_model: &ViewModel, width: f64, height: f64) -> Self {
        Self::layout_bridged(view_model, width, height, &[], DEFAULT_BAND_PADDING)
    }

    /// Scales with bands in bridge layout order.
    ///
    /// An empty view model produces an empty category domain.
    pub fn layout_bridged(
        view_model: &ViewModel,
        width: f64,
        height: f64,
        segments: &[ResolvedSegment],
        band_padding: f64,
    ) -> Self {
        let order = layout_order(view_model.data_points.len(), segments);
        let category = CategoryScale::new(view_model, &order, width, band_padding);
        let value = ScaleLinear::new((0.0, view_model.value_max), (height.max(0.0), 0.0));
        Self {
            category,
            value,
            order,
        }
    }

    /// Plot height the value scale maps onto.
    pub fn drawable_height(&self) -> f64 {
        self.value.range().0
    }
}
