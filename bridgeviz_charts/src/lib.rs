// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge (waterfall) bar charts on top of `bridgeviz_core`.
//!
//! The pipeline runs once per host update:
//! - **Rows** are loosely typed cells, normalized into `(category, measure)` pairs.
//! - **Aggregates** derive the synthetic "Total" point (a sum or a first-two-rows gap).
//! - The **view model** orders the points, colors them, and attaches selection handles.
//! - **Layout** carves the viewport and derives a band scale and a linear scale.
//! - The **renderer** emits bars, bridge connectors, and axes as `bridgeviz_core::Mark`s
//!   and reconciles them into a diff batch.
//!
//! Selection is asynchronous: a click issues a toggle request to a host service, and the
//! service's acknowledgement later re-emphasizes the bars in one batch.
//!
//! [`BridgeVisual`] is the host-facing entry point that owns all of the above.

#![no_std]

extern crate alloc;

mod aggregate;
mod axis;
mod bar_mark;
mod bridge;
mod config;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod layout;
mod palette;
#[cfg(test)]
mod pipeline_tests;
mod render;
mod row;
mod rule_mark;
mod scale;
mod selection;
mod text_mark;
mod view_model;
mod visual;
pub mod z_order;

pub use aggregate::{AggregateMode, Aggregates, MIN_ROWS};
pub use axis::{AxisOrient, AxisSpec, AxisStyle, format_tick};
pub use bar_mark::{BAR_NAMESPACE, BarMarkSpec, bar_id};
pub use bridge::{BridgeLayout, BridgeSegment, ResolvedSegment, layout_order, resolve_segments};
pub use config::{BridgeChartConfig, DEFAULT_DIMMED_OPACITY};
pub use error::ChartError;
pub use layout::{ChartLayout, ChartScales, Margins, Size};
pub use palette::{ColorProvider, DEFAULT_COLORS, Palette};
pub use render::{
    BOTTOM_AXIS_ID_BASE, CONNECTOR_IN_NAMESPACE, CONNECTOR_OUT_NAMESPACE, Frame,
    LEFT_AXIS_ID_BASE, ShapeRenderer, axis_marks, bar_marks, connector_marks,
};
pub use row::{Cell, Row, normalize_rows};
pub use rule_mark::{RuleMarkSpec, StrokeStyle};
pub use scale::{Band, CategoryScale, DEFAULT_BAND_PADDING, ScaleBand, ScaleLinear};
pub use selection::{
    DEFAULT_SELECTION_TIMEOUT, Emphasis, LocalSelectionService, RequestId, SelectionAck,
    SelectionController, SelectionError, SelectionHandle, SelectionService, ToggleRequest,
};
pub use text_mark::TextMarkSpec;
pub use view_model::{
    DEFAULT_VALUE_HEADROOM, DataPoint, PointRef, TOTAL_CATEGORY, ViewModel, ViewModelBuilder,
};
pub use visual::{BridgeVisual, ClickOutcome, UpdateOptions};
