// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use bridgeviz_core::{MarkDiff, MarkId, MarkPayload};
use kurbo::Rect;

use crate::{
    AggregateMode, BridgeChartConfig, BridgeLayout, BridgeSegment, BridgeVisual,
    CONNECTOR_IN_NAMESPACE, CONNECTOR_OUT_NAMESPACE, Cell, ChartError, DEFAULT_COLORS,
    LocalSelectionService, Margins, Palette, PointRef, Size, UpdateOptions, bar_id,
};

type Visual = BridgeVisual<Palette, LocalSelectionService>;

fn visual(config: BridgeChartConfig) -> Visual {
    BridgeVisual::new(config, Palette::default(), LocalSelectionService::new())
}

fn cells(values: &[(&str, f64)]) -> Vec<Vec<Cell>> {
    values
        .iter()
        .map(|(c, v)| vec![Cell::from(*c), Cell::from(*v)])
        .collect()
}

fn run(v: &mut Visual, values: &[(&str, f64)], viewport: Size) -> Vec<MarkDiff> {
    v.update(UpdateOptions {
        rows: &cells(values),
        viewport,
        locale: "en-US",
    })
    .unwrap()
}

fn find_enter_bounds(diffs: &[MarkDiff], id: MarkId) -> Rect {
    for d in diffs {
        if let MarkDiff::Enter {
            id: got, bounds, ..
        } = d
            && *got == id
        {
            return bounds.expect("rect marks should have bounds");
        }
    }
    panic!("missing Enter diff for {id:?}");
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() <= 1e-9, "{a} != {b}");
}

// Plot is 310 x 200 with the default margins.
const VIEWPORT: Size = Size::new(400.0, 420.0);

#[test]
fn two_rows_render_a_waterfall() {
    let mut v = visual(BridgeChartConfig::default());
    let diffs = run(&mut v, &[("A", 10.0), ("B", 30.0)], VIEWPORT);

    let vm = v.view_model().clone();
    assert_eq!(vm.data_points.len(), 3);
    assert_eq!(vm.data_points[2].category, "Total");
    assert_eq!(vm.data_points[2].value, 20.0);

    let a = find_enter_bounds(&diffs, bar_id(vm.data_points[0].key));
    let b = find_enter_bounds(&diffs, bar_id(vm.data_points[1].key));
    let total = find_enter_bounds(&diffs, bar_id(vm.data_points[2].key));
    // Heights are proportional to 10, 30 and 20 over a domain of 40.
    assert_close(a.height(), 50.0);
    assert_close(b.height(), 150.0);
    assert_close(total.height(), 100.0);

    // The total sits between A and B, floating at A's level.
    assert!(a.x1 < total.x0 && total.x1 < b.x0);
    assert_close(total.y1, a.y0);
    assert_close(total.y0, b.y0);

    let key = vm.data_points[2].key;
    let incoming = find_enter_bounds(&diffs, MarkId::for_key(CONNECTOR_IN_NAMESPACE, key));
    let outgoing = find_enter_bounds(&diffs, MarkId::for_key(CONNECTOR_OUT_NAMESPACE, key));
    assert_close(incoming.y0, a.y0);
    assert_close(outgoing.y0, b.y0);
}

#[test]
fn sum_mode_totals_every_row_without_connectors() {
    let mut v = visual(BridgeChartConfig::default().with_aggregate_mode(AggregateMode::Sum));
    let diffs = run(&mut v, &[("A", 10.0), ("B", 30.0), ("C", 5.0)], VIEWPORT);
    assert_eq!(v.view_model().aggregate().map(|p| p.value), Some(45.0));
    assert_eq!(v.view_model().value_max, 55.0);
    let total_key = v.view_model().data_points[3].key;
    let connector = MarkId::for_key(CONNECTOR_IN_NAMESPACE, total_key);
    assert!(diffs.iter().all(|d| d.id() != connector));

    // Bars are laid out in view-model order.
    let xs: Vec<f64> = v
        .view_model()
        .data_points
        .iter()
        .map(|p| find_enter_bounds(&diffs, bar_id(p.key)).x0)
        .collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn palette_wraps_past_five_categories() {
    let mut v = visual(BridgeChartConfig::default().with_aggregate_mode(AggregateMode::Sum));
    let rows: Vec<(&str, f64)> = ["a", "b", "c", "d", "e", "f", "g"]
        .iter()
        .map(|c| (*c, 1.0))
        .collect();
    run(&mut v, &rows, VIEWPORT);
    let colors: Vec<_> = v.view_model().data_points.iter().map(|p| p.color).collect();
    assert_eq!(colors[5], DEFAULT_COLORS[0]);
    assert_eq!(colors[6], DEFAULT_COLORS[1]);
    assert_eq!(colors[7], DEFAULT_COLORS[2]);
}

#[test]
fn resizing_only_updates_existing_marks() {
    let mut v = visual(BridgeChartConfig::default());
    run(&mut v, &[("A", 10.0), ("B", 30.0)], VIEWPORT);
    let diffs = run(&mut v, &[("A", 10.0), ("B", 30.0)], Size::new(600.0, 500.0));
    assert!(!diffs.is_empty());
    assert!(diffs.iter().all(MarkDiff::is_update));

    // Same rows, same size: nothing to do.
    let diffs = run(&mut v, &[("A", 10.0), ("B", 30.0)], Size::new(600.0, 500.0));
    assert!(diffs.is_empty());
}

#[test]
fn explicit_segments_bridge_row_points() {
    let segment = BridgeSegment {
        anchor: PointRef::Row(0),
        bar: PointRef::Row(2),
        target: PointRef::Row(1),
    };
    let config = BridgeChartConfig::default()
        .with_aggregate_mode(AggregateMode::Sum)
        .with_bridge(BridgeLayout::Segments(vec![segment]))
        .with_axes(false);
    let mut v = visual(config);
    let diffs = run(&mut v, &[("Start", 40.0), ("End", 25.0), ("Drop", 15.0)], VIEWPORT);
    let vm = v.view_model().clone();

    let start = find_enter_bounds(&diffs, bar_id(vm.data_points[0].key));
    let end = find_enter_bounds(&diffs, bar_id(vm.data_points[1].key));
    let drop = find_enter_bounds(&diffs, bar_id(vm.data_points[2].key));
    assert!(start.x1 < drop.x0 && drop.x1 < end.x0);
    assert_close(drop.y0, start.y0);
    assert_close(drop.y1, end.y0);

    // Four bars and two connectors.
    assert_eq!(diffs.len(), 6);
}

#[test]
fn segments_beyond_the_rows_are_insufficient_data() {
    let segment = BridgeSegment {
        anchor: PointRef::Row(1),
        bar: PointRef::Row(2),
        target: PointRef::Row(3),
    };
    let mut v = visual(
        BridgeChartConfig::default().with_bridge(BridgeLayout::Segments(vec![segment])),
    );
    let err = v
        .update(UpdateOptions {
            rows: &cells(&[("A", 1.0), ("B", 2.0)]),
            viewport: VIEWPORT,
            locale: "",
        })
        .unwrap_err();
    assert_eq!(
        err,
        ChartError::InsufficientData {
            required: 3,
            actual: 2
        }
    );
    assert!(v.scene().is_empty());
}

#[test]
fn non_numeric_measures_abort_the_update() {
    let mut v = visual(BridgeChartConfig::default());
    let rows = vec![
        vec![Cell::from("A"), Cell::from("ten")],
        vec![Cell::from("B"), Cell::from(30.0)],
    ];
    let err = v
        .update(UpdateOptions {
            rows: &rows,
            viewport: VIEWPORT,
            locale: "",
        })
        .unwrap_err();
    assert!(matches!(err, ChartError::NonNumericMeasure { row: Some(0), .. }));
    assert!(v.scene().is_empty());
}

#[test]
fn loosely_typed_cells_are_coerced() {
    let mut v = visual(BridgeChartConfig::default().with_axes(false));
    let rows = vec![
        vec![Cell::from("A"), Cell::from("12.5")],
        vec![Cell::Number(2024.0), Cell::Bool(true)],
        vec![Cell::from("C"), Cell::Null],
    ];
    v.update(UpdateOptions {
        rows: &rows,
        viewport: VIEWPORT,
        locale: "",
    })
    .unwrap();
    let vm = v.view_model();
    assert_eq!(vm.data_points[1].category, "2024");
    let values: Vec<f64> = vm.data_points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![12.5, 1.0, 0.0, 11.5]);
}

#[test]
fn bar_opacity_setting_scales_selection_states() {
    let mut v = visual(BridgeChartConfig::default().with_bar_opacity(50));
    run(&mut v, &[("A", 10.0), ("B", 30.0)], VIEWPORT);
    let vm = v.view_model().clone();
    let opacity = |v: &Visual, i: usize| match v.scene().get(bar_id(vm.data_points[i].key)) {
        Some(m) => m.payload.opacity().unwrap_or(f64::NAN),
        None => f64::NAN,
    };
    assert_close(opacity(&v, 0), 0.5);

    let a = v.scene().get(bar_id(vm.data_points[0].key)).and_then(|m| m.bounds()).unwrap();
    v.click(a.center(), Duration::ZERO);
    let ack = v.service_mut().acknowledge_next().unwrap();
    let diffs = v.acknowledge(ack, Duration::ZERO);
    assert_eq!(diffs.len(), 2);
    assert_close(opacity(&v, 0), 0.5);
    assert_close(opacity(&v, 1), 0.15);

    // Toggling A again clears the selection.
    v.click(a.center(), Duration::from_secs(1));
    let ack = v.service_mut().acknowledge_next().unwrap();
    v.acknowledge(ack, Duration::from_secs(1));
    assert!(v.service().selected().is_empty());
    assert_close(opacity(&v, 1), 0.5);
}

#[test]
fn text_marks_do_not_count_as_bars() {
    let mut v = visual(BridgeChartConfig::default().with_margins(Margins {
        top: 0.0,
        right: 0.0,
        bottom: 40.0,
        left: 40.0,
    }));
    let diffs = run(&mut v, &[("A", 10.0), ("B", 30.0)], VIEWPORT);
    let labels = diffs
        .iter()
        .filter(|d| {
            matches!(d, MarkDiff::Enter { new, .. } if matches!(**new, MarkPayload::Text(_)))
        })
        .count();
    // Three category labels plus at least two value ticks.
    assert!(labels >= 5);
}
