// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint order of the marks a bridge chart emits.
//!
//! Renderers sort by `(z_index, MarkId)`, so equal layers tie-break deterministically.

/// Bars.
pub const BARS: i32 = 0;
/// Connector lines between bridged bars.
pub const CONNECTORS: i32 = 10;
/// Axis domain lines and ticks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
