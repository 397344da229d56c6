// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing bridge chart.
//!
//! [`BridgeVisual`] strings the pipeline together for a host that calls it on data or size
//! changes, forwards pointer clicks, and delivers selection acknowledgements. Every call
//! returns the [`MarkDiff`] batch the host canvas must apply.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use bridgeviz_core::{MarkDiff, Scene};
use kurbo::Point;
use tracing::{debug, warn};

use crate::ChartError;
use crate::bridge::resolve_segments;
use crate::config::BridgeChartConfig;
use crate::layout::{ChartLayout, ChartScales, Size};
use crate::palette::ColorProvider;
use crate::render::{Frame, ShapeRenderer};
use crate::row::Cell;
use crate::selection::{
    Emphasis, RequestId, SelectionAck, SelectionController, SelectionHandle, SelectionService,
};
use crate::view_model::{ViewModel, ViewModelBuilder};

/// Inputs of one update cycle.
#[derive(Clone, Copy, Debug)]
pub struct UpdateOptions<'a, R> {
    /// Host rows, each `[category, measure, ..]`.
    pub rows: &'a [R],
    /// Size of the host container.
    pub viewport: Size,
    /// Host locale tag, stored for the host and otherwise unused.
    pub locale: &'a str,
}

/// What the host should do with a click after the visual saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click hit a bar and started a selection toggle; do not propagate it.
    Consumed(RequestId),
    /// The visual ignored the click; the host may handle it (for example, to clear selection).
    Propagate,
}

/// A bridge chart bound to a color provider and a selection service.
#[derive(Debug)]
pub struct BridgeVisual<C, S> {
    config: BridgeChartConfig,
    colors: C,
    service: S,
    selection: SelectionController,
    renderer: ShapeRenderer,
    view_model: ViewModel,
    locale: String,
}

impl<C: ColorProvider, S: SelectionService> BridgeVisual<C, S> {
    /// Creates a visual with nothing rendered.
    pub fn new(config: BridgeChartConfig, colors: C, service: S) -> Self {
        let selection = SelectionController::new(config.selection_timeout);
        Self {
            config,
            colors,
            service,
            selection,
            renderer: ShapeRenderer::new(),
            view_model: ViewModel::default(),
            locale: String::new(),
        }
    }

    /// Configuration.
    pub fn config(&self) -> &BridgeChartConfig {
        &self.config
    }

    /// View model of the last successful update.
    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    /// Currently rendered marks.
    pub fn scene(&self) -> &Scene {
        self.renderer.scene()
    }

    /// Selection state.
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// The selection service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The selection service, mutably (hosts drive acknowledgements through it).
    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    /// Locale of the last successful update.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Emphasis of the bar selecting `handle`.
    pub fn emphasis(&self, handle: SelectionHandle) -> Emphasis {
        self.selection.emphasis(handle)
    }

    /// Rebuilds and redraws everything from `options`.
    ///
    /// On error nothing is redrawn: the previous shapes and view model stay in place.
    pub fn update<R: AsRef<[Cell]>>(
        &mut self,
        options: UpdateOptions<'_, R>,
    ) -> Result<Vec<MarkDiff>, ChartError> {
        let config = &self.config;
        let built = ViewModelBuilder::new(&self.colors, &self.service)
            .with_mode(config.aggregate_mode)
            .with_headroom(config.value_headroom)
            .build(options.rows)
            .and_then(|vm| {
                let segments =
                    resolve_segments(&vm, &config.bridge.segments(config.aggregate_mode))?;
                Ok((vm, segments))
            });
        let (view_model, segments) = match built {
            Ok(built) => built,
            Err(err) => {
                warn!(rows = options.rows.len(), error = %err, "update aborted");
                return Err(err);
            }
        };

        let layout = ChartLayout::arrange(options.viewport, &config.margins, config.show_axes);
        let scales = ChartScales::layout_bridged(
            &view_model,
            layout.plot.width(),
            layout.plot.height(),
            &segments,
            config.band_padding,
        );
        let frame = Frame {
            view_model: &view_model,
            scales: &scales,
            segments: &segments,
            layout,
        };
        let selection = &self.selection;
        let diffs = self
            .renderer
            .render(&frame, config, |h| opacity(config, selection, h));

        debug!(
            rows = view_model.row_count(),
            mode = ?config.aggregate_mode,
            width = options.viewport.width,
            height = options.viewport.height,
            diffs = diffs.len(),
            "update applied"
        );
        self.view_model = view_model;
        self.locale = String::from(options.locale);
        Ok(diffs)
    }

    /// Handles a click at `point` (scene coordinates) at host time `now`.
    pub fn click(&mut self, point: Point, now: Duration) -> ClickOutcome {
        if !self.config.enable_selection {
            return ClickOutcome::Propagate;
        }
        let Some(handle) = self.renderer.handle_at(point) else {
            return ClickOutcome::Propagate;
        };
        self.selection.expire(now);
        ClickOutcome::Consumed(self.selection.request_toggle(&mut self.service, handle, now))
    }

    /// Applies a selection acknowledgement received at host time `now`.
    ///
    /// Successful acknowledgements re-emphasize every bar in one batch. Failed, unknown, or
    /// timed-out ones (judged against `now`) change nothing.
    pub fn acknowledge(&mut self, ack: SelectionAck, now: Duration) -> Vec<MarkDiff> {
        if self.selection.acknowledge(ack, now).is_err() {
            return Vec::new();
        }
        let (config, selection) = (&self.config, &self.selection);
        self.renderer.apply_emphasis(|h| opacity(config, selection, h))
    }

    /// Drops selection requests older than the timeout. Returns how many were dropped.
    pub fn expire(&mut self, now: Duration) -> usize {
        self.selection.expire(now)
    }

    /// Removes every shape and forgets selection state.
    pub fn destroy(&mut self) -> Vec<MarkDiff> {
        self.selection.reset();
        self.view_model = ViewModel::default();
        let diffs = self.renderer.clear();
        debug!(removed = diffs.len(), "visual destroyed");
        diffs
    }
}

fn opacity(config: &BridgeChartConfig, selection: &SelectionController, h: SelectionHandle) -> f64 {
    match selection.emphasis(h) {
        Emphasis::Normal => config.normal_opacity(),
        Emphasis::Dimmed => config.dimmed_opacity(),
    }
}
