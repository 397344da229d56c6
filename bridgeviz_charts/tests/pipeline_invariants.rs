// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the bridge chart pipeline.
//!
//! 1. A view model has one point per row plus a trailing "Total".
//! 2. `value_max` is the largest point value plus the headroom.
//! 3. Sum mode totals every row; Difference mode is the gap between the first two rows.
//! 4. Building is pure.
//! 5. Bands are ordered, disjoint, stay inside the plot width, and cover the width minus
//!    the padding.
//! 6. Toggling a handle twice restores the original selection.

use bridgeviz_charts::{
    AggregateMode, Cell, ChartScales, DEFAULT_BAND_PADDING, DEFAULT_VALUE_HEADROOM,
    LocalSelectionService, Palette, SelectionAck, SelectionController, SelectionHandle,
    TOTAL_CATEGORY, ViewModelBuilder,
};
use core::time::Duration;
use proptest::prelude::*;

fn rows_strategy() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec(("[A-Z][a-z]{0,6}", -1.0e6f64..1.0e6), 2..12)
}

fn mode_strategy() -> impl Strategy<Value = AggregateMode> {
    prop_oneof![Just(AggregateMode::Sum), Just(AggregateMode::Difference)]
}

fn cells(rows: &[(String, f64)]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|(c, v)| vec![Cell::from(c.as_str()), Cell::from(*v)])
        .collect()
}

// =========================================================================
// View model
// =========================================================================

proptest! {
    #[test]
    fn one_point_per_row_plus_total(rows in rows_strategy(), mode in mode_strategy()) {
        let (palette, service) = (Palette::default(), LocalSelectionService::new());
        let vm = ViewModelBuilder::new(&palette, &service)
            .with_mode(mode)
            .build(&cells(&rows))
            .unwrap();
        prop_assert_eq!(vm.data_points.len(), rows.len() + 1);
        prop_assert_eq!(vm.data_points.last().map(|p| p.category.as_str()), Some(TOTAL_CATEGORY));
        for (point, (category, value)) in vm.data_points.iter().zip(&rows) {
            prop_assert_eq!(&point.category, category);
            prop_assert_eq!(point.value, *value);
        }
    }

    #[test]
    fn value_max_is_largest_value_plus_headroom(rows in rows_strategy(), mode in mode_strategy()) {
        let (palette, service) = (Palette::default(), LocalSelectionService::new());
        let vm = ViewModelBuilder::new(&palette, &service)
            .with_mode(mode)
            .build(&cells(&rows))
            .unwrap();
        let max = vm.data_points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(vm.value_max, max + DEFAULT_VALUE_HEADROOM);
    }

    #[test]
    fn aggregate_follows_the_mode(rows in rows_strategy()) {
        let (palette, service) = (Palette::default(), LocalSelectionService::new());
        let cells = cells(&rows);
        let sum = ViewModelBuilder::new(&palette, &service)
            .with_mode(AggregateMode::Sum)
            .build(&cells)
            .unwrap();
        let expected: f64 = rows.iter().map(|(_, v)| v).sum();
        prop_assert_eq!(sum.aggregate().map(|p| p.value), Some(expected));

        let diff = ViewModelBuilder::new(&palette, &service)
            .with_mode(AggregateMode::Difference)
            .build(&cells)
            .unwrap();
        prop_assert_eq!(diff.aggregate().map(|p| p.value), Some((rows[0].1 - rows[1].1).abs()));
    }

    #[test]
    fn building_is_pure(rows in rows_strategy(), mode in mode_strategy()) {
        let (palette, service) = (Palette::default(), LocalSelectionService::new());
        let builder = ViewModelBuilder::new(&palette, &service).with_mode(mode);
        let cells = cells(&rows);
        prop_assert_eq!(builder.build(&cells).unwrap(), builder.build(&cells).unwrap());
    }
}

// =========================================================================
// Scales
// =========================================================================

proptest! {
    #[test]
    fn bands_are_ordered_and_disjoint(rows in rows_strategy(), width in 50.0f64..2000.0) {
        let (palette, service) = (Palette::default(), LocalSelectionService::new());
        let vm = ViewModelBuilder::new(&palette, &service).build(&cells(&rows)).unwrap();
        let scales = ChartScales::layout(&vm, width, 200.0);

        let bands: Vec<_> = (0..vm.data_points.len())
            .map(|i| scales.category.band_for_point(i).unwrap())
            .collect();
        prop_assert!(bands[0].x >= 0.0);
        prop_assert!(bands[bands.len() - 1].x_end() <= width + 1e-9);
        for pair in bands.windows(2) {
            prop_assert!(pair[0].x_end() < pair[1].x, "bands overlap: {:?}", pair);
            prop_assert!((pair[0].width - pair[1].width).abs() < 1e-9);
        }

        let n = bands.len() as f64;
        let step = scales.category.band_scale().step();
        let covered: f64 = bands.iter().map(|b| b.width).sum();
        let padding = (n + 1.0) * DEFAULT_BAND_PADDING * step;
        prop_assert!(
            (covered - (width - padding)).abs() < 1e-6,
            "bands cover {} of {} with padding {}",
            covered,
            width,
            padding
        );
    }
}

// =========================================================================
// Selection
// =========================================================================

proptest! {
    #[test]
    fn double_toggle_restores_selection(
        initial in prop::collection::vec(0usize..8, 0..6),
        target in 0usize..8,
    ) {
        let handle = |i: usize| SelectionHandle::for_row("c", i);
        let mut service = LocalSelectionService::new();
        for i in &initial {
            if !service.selected().contains(&handle(*i)) {
                service.toggle(handle(*i));
            }
        }
        let before = service.selected().to_vec();

        let mut controller = SelectionController::new(Duration::from_secs(5));
        controller.request_toggle(&mut service, handle(target), Duration::ZERO);
        controller.request_toggle(&mut service, handle(target), Duration::ZERO);
        let acks: Vec<SelectionAck> =
            core::iter::from_fn(|| service.acknowledge_next()).collect();
        prop_assert_eq!(acks.len(), 2);
        for ack in acks {
            prop_assert!(controller.acknowledge(ack, Duration::ZERO).is_ok());
        }

        let mut after = controller.selected().to_vec();
        let mut before_sorted = before;
        after.sort();
        before_sorted.sort();
        prop_assert_eq!(after, before_sorted);
    }
}
