// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape materialization and reconciliation.
//!
//! Every update regenerates the full mark list (bars, connectors, axes) and hands it to a
//! retained [`Scene`], which diffs it by [`MarkId`] against the previous frame. Bar ids are
//! keyed by data point identity, so a category that survives an update is updated in place
//! no matter where it moves.

extern crate alloc;

use alloc::vec::Vec;

use bridgeviz_core::{Mark, MarkDiff, MarkId, Scene};
use kurbo::Point;
use tracing::debug;

use crate::axis::AxisSpec;
use crate::bar_mark::BarMarkSpec;
use crate::bridge::ResolvedSegment;
use crate::config::BridgeChartConfig;
use crate::layout::{ChartLayout, ChartScales};
use crate::rule_mark::RuleMarkSpec;
use crate::scale::Band;
use crate::selection::SelectionHandle;
use crate::view_model::ViewModel;
use crate::z_order;

/// Key namespace of connectors leading into a bridge bar.
pub const CONNECTOR_IN_NAMESPACE: u32 = 2;
/// Key namespace of connectors leading out of a bridge bar.
pub const CONNECTOR_OUT_NAMESPACE: u32 = 3;
/// Id base of the category axis marks.
pub const BOTTOM_AXIS_ID_BASE: u64 = 1 << 32;
/// Id base of the value axis marks.
pub const LEFT_AXIS_ID_BASE: u64 = 2 << 32;

/// Everything one update cycle lays out.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Points to draw.
    pub view_model: &'a ViewModel,
    /// Scales in plot-local coordinates.
    pub scales: &'a ChartScales,
    /// Bridge segments resolved against `view_model`.
    pub segments: &'a [ResolvedSegment],
    /// Viewport arrangement.
    pub layout: ChartLayout,
}

impl Frame<'_> {
    /// Band of point `index` in scene coordinates.
    fn band(&self, index: usize) -> Option<Band> {
        let band = self.scales.category.band_for_point(index)?;
        Some(Band {
            x: band.x + self.layout.plot.x0,
            width: band.width,
        })
    }

    /// Scene y of `value`.
    fn level(&self, value: f64) -> f64 {
        self.layout.plot.y0 + self.scales.value.map(value)
    }

    /// Scene y of point `index`'s value.
    fn point_level(&self, index: usize) -> Option<f64> {
        let point = self.view_model.data_points.get(index)?;
        Some(self.level(point.value))
    }
}

/// Bars for every point in `frame`, paired with the handle each bar selects.
///
/// A point that is some segment's `bar` floats between its anchor's and target's levels;
/// every other bar rises from zero to its value.
pub fn bar_marks(
    frame: &Frame<'_>,
    config: &BridgeChartConfig,
    opacity: impl Fn(SelectionHandle) -> f64,
) -> Vec<(Mark, SelectionHandle)> {
    let baseline = frame.level(0.0);
    let mut out = Vec::with_capacity(frame.view_model.data_points.len());
    for &index in &frame.scales.order {
        let Some(point) = frame.view_model.data_points.get(index) else {
            continue;
        };
        let Some(band) = frame.band(index) else {
            continue;
        };
        let span = match frame.segments.iter().find(|s| s.bar == index) {
            Some(s) => frame
                .point_level(s.anchor)
                .zip(frame.point_level(s.target)),
            None => Some((frame.level(point.value), baseline)),
        };
        let Some((y0, y1)) = span else {
            continue;
        };
        let mark = BarMarkSpec::for_point(point, band, y0, y1)
            .with_stroke(config.bar_stroke.clone())
            .with_opacity(opacity(point.selection_handle))
            .mark();
        out.push((mark, point.selection_handle));
    }
    out
}

/// Two horizontal connectors per segment: anchor level into the bar, target level out of it.
pub fn connector_marks(frame: &Frame<'_>, config: &BridgeChartConfig) -> Vec<Mark> {
    let mut out = Vec::with_capacity(2 * frame.segments.len());
    for s in frame.segments {
        let (Some(anchor), Some(bar), Some(target)) =
            (frame.band(s.anchor), frame.band(s.bar), frame.band(s.target))
        else {
            continue;
        };
        let (Some(y_in), Some(y_out)) = (frame.point_level(s.anchor), frame.point_level(s.target))
        else {
            continue;
        };
        let key = frame.view_model.data_points[s.bar].key;
        let rules = [
            (CONNECTOR_IN_NAMESPACE, y_in, anchor.x_end(), bar.x),
            (CONNECTOR_OUT_NAMESPACE, y_out, bar.x_end(), target.x),
        ];
        for (namespace, y, x0, x1) in rules {
            out.push(
                RuleMarkSpec::horizontal(MarkId::for_key(namespace, key), y, x0, x1)
                    .with_stroke(config.connector_stroke.clone())
                    .with_z_index(z_order::CONNECTORS)
                    .mark(),
            );
        }
    }
    out
}

/// Axis marks, if the layout reserved room for axes.
pub fn axis_marks(frame: &Frame<'_>) -> Vec<Mark> {
    let mut out = Vec::new();
    if frame.layout.axis_bottom.is_some() {
        out.extend(AxisSpec::bottom(BOTTOM_AXIS_ID_BASE).marks(frame.layout.plot, frame.scales));
    }
    if frame.layout.axis_left.is_some() {
        out.extend(AxisSpec::left(LEFT_AXIS_ID_BASE).marks(frame.layout.plot, frame.scales));
    }
    out
}

/// Owns the rendered shapes between update cycles.
#[derive(Debug, Default)]
pub struct ShapeRenderer {
    scene: Scene,
    bars: Vec<(MarkId, SelectionHandle)>,
}

impl ShapeRenderer {
    /// Creates an empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The retained scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Number of bars currently rendered.
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Replaces the rendered shapes with those of `frame`.
    pub fn render(
        &mut self,
        frame: &Frame<'_>,
        config: &BridgeChartConfig,
        opacity: impl Fn(SelectionHandle) -> f64,
    ) -> Vec<MarkDiff> {
        let bars = bar_marks(frame, config, opacity);
        self.bars = bars.iter().map(|(m, h)| (m.id, *h)).collect();

        let mut marks: Vec<Mark> = bars.into_iter().map(|(m, _)| m).collect();
        marks.extend(connector_marks(frame, config));
        marks.extend(axis_marks(frame));

        let diffs = self.scene.tick(marks);
        debug!(
            bars = self.bars.len(),
            segments = frame.segments.len(),
            enter = diffs.iter().filter(|d| d.is_enter()).count(),
            update = diffs.iter().filter(|d| d.is_update()).count(),
            exit = diffs.iter().filter(|d| d.is_exit()).count(),
            "rendered frame"
        );
        diffs
    }

    /// Re-applies bar opacity in one batch. Bars whose opacity is unchanged emit nothing.
    pub fn apply_emphasis(&mut self, opacity: impl Fn(SelectionHandle) -> f64) -> Vec<MarkDiff> {
        let scene = &mut self.scene;
        self.bars
            .iter()
            .filter_map(|&(id, handle)| {
                let value = opacity(handle);
                scene.patch(id, |m| m.payload.set_opacity(value))
            })
            .collect()
    }

    /// Handle of the bar under `point`, if any.
    pub fn handle_at(&self, point: Point) -> Option<SelectionHandle> {
        let id = self.scene.hit_test(point)?;
        self.bars.iter().find(|(bar, _)| *bar == id).map(|(_, h)| *h)
    }

    /// Removes every shape.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        self.bars.clear();
        self.scene.clear()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use bridgeviz_core::MarkPayload;
    use kurbo::Rect;

    use super::*;
    use crate::bar_mark::bar_id;
    use crate::bridge::{BridgeSegment, resolve_segments};
    use crate::layout::{Margins, Size};
    use crate::palette::Palette;
    use crate::row::Cell;
    use crate::selection::LocalSelectionService;
    use crate::view_model::ViewModelBuilder;

    struct Fixture {
        vm: ViewModel,
        scales: ChartScales,
        segments: Vec<ResolvedSegment>,
        layout: ChartLayout,
    }

    impl Fixture {
        fn new(rows: &[(&str, f64)], bridged: bool, show_axes: bool) -> Self {
            let palette = Palette::default();
            let service = LocalSelectionService::new();
            let rows: Vec<Vec<Cell>> = rows
                .iter()
                .map(|(c, v)| vec![Cell::from(*c), Cell::from(*v)])
                .collect();
            let vm = ViewModelBuilder::new(&palette, &service)
                .build(&rows)
                .unwrap();
            let segments = if bridged {
                resolve_segments(&vm, &[BridgeSegment::waterfall()]).unwrap()
            } else {
                Vec::new()
            };
            // Plot is 310 x 200 at (70, 20).
            let layout =
                ChartLayout::arrange(Size::new(400.0, 420.0), &Margins::default(), show_axes);
            let scales = ChartScales::layout_bridged(
                &vm,
                layout.plot.width(),
                layout.plot.height(),
                &segments,
                0.1,
            );
            Self {
                vm,
                scales,
                segments,
                layout,
            }
        }

        fn frame(&self) -> Frame<'_> {
            Frame {
                view_model: &self.vm,
                scales: &self.scales,
                segments: &self.segments,
                layout: self.layout,
            }
        }
    }

    fn rect(mark: &Mark) -> Rect {
        match &mark.payload {
            MarkPayload::Rect(r) => r.rect,
            _ => panic!("not a rect"),
        }
    }

    #[test]
    fn grounded_bars_are_proportional_to_values() {
        let fx = Fixture::new(&[("A", 10.0), ("B", 30.0)], false, false);
        let bars = bar_marks(&fx.frame(), &BridgeChartConfig::default(), |_| 1.0);
        let heights: Vec<f64> = bars.iter().map(|(m, _)| rect(m).height()).collect();
        // value_max = 40, plot height = 200.
        assert_eq!(heights, vec![50.0, 150.0, 100.0]);
        assert!(bars.iter().all(|(m, _)| rect(m).y1 == 220.0));
    }

    #[test]
    fn waterfall_bar_floats_between_rows() {
        let fx = Fixture::new(&[("A", 10.0), ("B", 30.0)], true, false);
        let frame = fx.frame();
        let bars = bar_marks(&frame, &BridgeChartConfig::default(), |_| 1.0);
        let total = rect(&bars[1].0);
        assert_eq!(bars[1].1, SelectionHandle::AGGREGATE);
        // Levels: A at 220 - 50 = 170, B at 220 - 150 = 70.
        assert_eq!((total.y0, total.y1), (70.0, 170.0));
        assert_eq!(total.height(), 100.0);

        let connectors = connector_marks(&frame, &BridgeChartConfig::default());
        assert_eq!(connectors.len(), 2);
        let a = rect(&bars[0].0);
        let b = rect(&bars[2].0);
        let incoming = connectors[0].bounds().unwrap();
        let outgoing = connectors[1].bounds().unwrap();
        assert_eq!(incoming, Rect::new(a.x1, 170.0, total.x0, 170.0));
        assert_eq!(outgoing, Rect::new(total.x1, 70.0, b.x0, 70.0));
    }

    #[test]
    fn rerender_updates_in_place_and_removes_missing_categories() {
        let mut renderer = ShapeRenderer::new();
        let config = BridgeChartConfig::default();
        let first = Fixture::new(&[("A", 10.0), ("B", 30.0), ("C", 5.0)], false, false);
        let diffs = renderer.render(&first.frame(), &config, |_| 1.0);
        assert_eq!(diffs.len(), 4);
        assert!(diffs.iter().all(MarkDiff::is_enter));

        let second = Fixture::new(&[("A", 12.0), ("B", 30.0)], false, false);
        let diffs = renderer.render(&second.frame(), &config, |_| 1.0);
        let exits: Vec<MarkId> = diffs.iter().filter(|d| d.is_exit()).map(MarkDiff::id).collect();
        let gone = first.vm.data_points[2].key;
        assert_eq!(exits, vec![bar_id(gone)]);
        let a = bar_id(first.vm.data_points[0].key);
        assert!(diffs.iter().any(|d| d.is_update() && d.id() == a));
        assert_eq!(renderer.bar_count(), 3);
    }

    #[test]
    fn emphasis_patches_only_changed_bars() {
        let mut renderer = ShapeRenderer::new();
        let config = BridgeChartConfig::default();
        let fx = Fixture::new(&[("A", 10.0), ("B", 30.0)], true, true);
        renderer.render(&fx.frame(), &config, |_| 1.0);

        let a = fx.vm.data_points[0].selection_handle;
        let diffs = renderer.apply_emphasis(|h| if h == a { 1.0 } else { 0.3 });
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(MarkDiff::is_update));

        let again = renderer.apply_emphasis(|h| if h == a { 1.0 } else { 0.3 });
        assert!(again.is_empty());
    }

    #[test]
    fn hit_testing_finds_bar_handles() {
        let mut renderer = ShapeRenderer::new();
        let fx = Fixture::new(&[("A", 10.0), ("B", 30.0)], true, true);
        renderer.render(&fx.frame(), &BridgeChartConfig::default(), |_| 1.0);
        // Band 0 spans x in [80, 170]; bar A spans y in [170, 220].
        assert_eq!(
            renderer.handle_at(Point::new(100.0, 200.0)),
            Some(fx.vm.data_points[0].selection_handle)
        );
        assert_eq!(renderer.handle_at(Point::new(100.0, 100.0)), None);
        assert_eq!(renderer.handle_at(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn empty_frame_renders_nothing() {
        let vm = ViewModel::default();
        let scales = ChartScales::layout(&vm, 300.0, 200.0);
        let layout = ChartLayout::arrange(Size::new(400.0, 420.0), &Margins::default(), false);
        let frame = Frame {
            view_model: &vm,
            scales: &scales,
            segments: &[],
            layout,
        };
        let mut renderer = ShapeRenderer::new();
        assert!(renderer.render(&frame, &BridgeChartConfig::default(), |_| 1.0).is_empty());
        assert!(renderer.clear().is_empty());
    }
}
