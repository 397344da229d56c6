// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.

use core::time::Duration;

use crate::aggregate::AggregateMode;
use crate::bridge::BridgeLayout;
use crate::layout::Margins;
use crate::rule_mark::StrokeStyle;
use crate::scale::DEFAULT_BAND_PADDING;
use crate::selection::DEFAULT_SELECTION_TIMEOUT;
use crate::view_model::DEFAULT_VALUE_HEADROOM;

/// Opacity of shapes outside a non-empty selection, relative to the base opacity.
pub const DEFAULT_DIMMED_OPACITY: f64 = 0.3;

/// Everything that varies between bridge chart instances.
///
/// Strokes are not serialized; deserialized configs use the default black 1px strokes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BridgeChartConfig {
    /// Whether the synthetic point is the sum of all rows or the gap between the first two.
    pub aggregate_mode: AggregateMode,
    /// Whether clicks toggle selection.
    pub enable_selection: bool,
    /// Which points are drawn as floating bridge bars.
    pub bridge: BridgeLayout,
    /// Space around the plot.
    pub margins: Margins,
    /// Added to the largest value to get the top of the value domain.
    pub value_headroom: f64,
    /// Fraction of each band step left empty.
    pub band_padding: f64,
    /// Relative opacity of shapes outside the selection.
    pub dimmed_opacity: f64,
    /// Base bar opacity in percent, `10..=100`.
    pub bar_opacity: u8,
    /// Whether axes are drawn.
    pub show_axes: bool,
    /// Bar outline.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub bar_stroke: StrokeStyle,
    /// Connector line stroke.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub connector_stroke: StrokeStyle,
    /// How long a selection request may stay unacknowledged.
    pub selection_timeout: Duration,
}

impl Default for BridgeChartConfig {
    fn default() -> Self {
        Self {
            aggregate_mode: AggregateMode::default(),
            enable_selection: true,
            bridge: BridgeLayout::Auto,
            margins: Margins::default(),
            value_headroom: DEFAULT_VALUE_HEADROOM,
            band_padding: DEFAULT_BAND_PADDING,
            dimmed_opacity: DEFAULT_DIMMED_OPACITY,
            bar_opacity: 100,
            show_axes: true,
            bar_stroke: StrokeStyle::default(),
            connector_stroke: StrokeStyle::default(),
            selection_timeout: DEFAULT_SELECTION_TIMEOUT,
        }
    }
}

impl BridgeChartConfig {
    /// Sets the aggregate mode.
    pub fn with_aggregate_mode(mut self, mode: AggregateMode) -> Self {
        self.aggregate_mode = mode;
        self
    }

    /// Enables or disables click selection.
    pub fn with_selection(mut self, enable: bool) -> Self {
        self.enable_selection = enable;
        self
    }

    /// Sets the bridge layout.
    pub fn with_bridge(mut self, bridge: BridgeLayout) -> Self {
        self.bridge = bridge;
        self
    }

    /// Sets the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the value headroom.
    pub fn with_value_headroom(mut self, headroom: f64) -> Self {
        self.value_headroom = headroom;
        self
    }

    /// Sets the band padding fraction.
    pub fn with_band_padding(mut self, padding: f64) -> Self {
        self.band_padding = padding;
        self
    }

    /// Sets the relative opacity of unselected shapes.
    pub fn with_dimmed_opacity(mut self, opacity: f64) -> Self {
        self.dimmed_opacity = opacity;
        self
    }

    /// Sets the base bar opacity in percent (clamped to `10..=100`).
    pub fn with_bar_opacity(mut self, percent: u8) -> Self {
        self.bar_opacity = percent.clamp(10, 100);
        self
    }

    /// Shows or hides axes.
    pub fn with_axes(mut self, show: bool) -> Self {
        self.show_axes = show;
        self
    }

    /// Sets the bar outline.
    pub fn with_bar_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.bar_stroke = stroke;
        self
    }

    /// Sets the connector stroke.
    pub fn with_connector_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.connector_stroke = stroke;
        self
    }

    /// Sets the selection acknowledgement timeout.
    pub fn with_selection_timeout(mut self, timeout: Duration) -> Self {
        self.selection_timeout = timeout;
        self
    }

    /// Opacity of shapes in the `Normal` state.
    pub fn normal_opacity(&self) -> f64 {
        f64::from(self.bar_opacity.clamp(10, 100)) / 100.0
    }

    /// Opacity of shapes in the `Dimmed` state.
    pub fn dimmed_opacity(&self) -> f64 {
        self.normal_opacity() * self.dimmed_opacity.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn defaults_match_the_host_visual() {
        let c = BridgeChartConfig::default();
        assert_eq!(c.aggregate_mode, AggregateMode::Difference);
        assert!(c.enable_selection);
        assert_eq!(c.margins.bottom, 200.0);
        assert_eq!(c.normal_opacity(), 1.0);
        assert!((c.dimmed_opacity() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn base_opacity_scales_both_states() {
        let c = BridgeChartConfig::default().with_bar_opacity(50);
        assert_eq!(c.normal_opacity(), 0.5);
        assert!((c.dimmed_opacity() - 0.15).abs() < 1e-12);
        assert_eq!(BridgeChartConfig::default().with_bar_opacity(0).bar_opacity, 10);
    }
}
