// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render-ready view model.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;
use tracing::debug;

use crate::ChartError;
use crate::aggregate::{AggregateMode, Aggregates};
use crate::palette::ColorProvider;
use crate::row::{Cell, normalize_rows};
use crate::selection::{SelectionHandle, SelectionService, fnv1a, fnv1a_str};

/// Category label of the synthetic aggregate point.
pub const TOTAL_CATEGORY: &str = "Total";

/// Visual headroom added above the largest value.
pub const DEFAULT_VALUE_HEADROOM: f64 = 10.0;

/// Reference to a point of a view model, independent of how many rows there are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointRef {
    /// The point built from the row at this index.
    Row(usize),
    /// The synthetic aggregate point (always last).
    Aggregate,
}

/// A single bar's worth of data.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    /// Category label.
    pub category: String,
    /// Finite value.
    pub value: f64,
    /// Fill color.
    pub color: Color,
    /// Handle used to coordinate selection with the host.
    pub selection_handle: SelectionHandle,
    /// Where the point came from.
    pub source: PointRef,
    /// Stable identity key: category plus its occurrence count, so duplicate labels stay
    /// distinct and a row keeps its key when other rows come and go.
    pub key: u64,
}

/// Ordered data points plus the value-domain maximum.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewModel {
    /// Row points in input order, then exactly one aggregate point.
    pub data_points: Vec<DataPoint>,
    /// Largest value plus headroom.
    pub value_max: f64,
}

impl ViewModel {
    /// Number of points built from rows.
    pub fn row_count(&self) -> usize {
        self.data_points.len().saturating_sub(1)
    }

    /// Index of `point` in [`ViewModel::data_points`], if it exists.
    pub fn index_of(&self, point: PointRef) -> Option<usize> {
        match point {
            PointRef::Row(i) => (i < self.row_count()).then_some(i),
            PointRef::Aggregate => self.data_points.len().checked_sub(1),
        }
    }

    /// Looks up a point.
    pub fn get(&self, point: PointRef) -> Option<&DataPoint> {
        self.index_of(point).map(|i| &self.data_points[i])
    }

    /// The synthetic aggregate point.
    pub fn aggregate(&self) -> Option<&DataPoint> {
        self.get(PointRef::Aggregate)
    }
}

/// Builds a [`ViewModel`] from host rows.
///
/// Building is pure: the same rows with the same providers yield equal view models.
#[derive(Debug)]
pub struct ViewModelBuilder<'a, C, S> {
    colors: &'a C,
    selection: &'a S,
    mode: AggregateMode,
    headroom: f64,
}

impl<'a, C: ColorProvider, S: SelectionService> ViewModelBuilder<'a, C, S> {
    /// Creates a builder using the given providers, `Difference` mode and default headroom.
    pub fn new(colors: &'a C, selection: &'a S) -> Self {
        Self {
            colors,
            selection,
            mode: AggregateMode::default(),
            headroom: DEFAULT_VALUE_HEADROOM,
        }
    }

    /// Sets the aggregate mode.
    pub fn with_mode(mut self, mode: AggregateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the headroom added to the value maximum.
    pub fn with_headroom(mut self, headroom: f64) -> Self {
        self.headroom = headroom;
        self
    }

    /// Normalizes `rows`, computes the aggregate, and assembles the view model.
    pub fn build<R: AsRef<[Cell]>>(&self, rows: &[R]) -> Result<ViewModel, ChartError> {
        let rows = normalize_rows(rows)?;
        let aggregates = Aggregates::compute(&rows)?;

        let mut data_points = Vec::with_capacity(rows.len() + 1);
        let mut seen: Vec<(&str, u64)> = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if row.category.is_empty() {
                return Err(ChartError::EmptyCategory { row: i });
            }
            if !row.measure.is_finite() {
                return Err(ChartError::NonNumericMeasure {
                    row: Some(i),
                    category: row.category.clone(),
                });
            }
            let ordinal = occurrence(&mut seen, &row.category);
            data_points.push(DataPoint {
                category: row.category.clone(),
                value: row.measure,
                color: self.colors.color_for(i)?,
                selection_handle: self.selection.create_handle(&row.category, i),
                source: PointRef::Row(i),
                key: row_key(&row.category, ordinal),
            });
        }

        let total = aggregates.value(self.mode);
        if !total.is_finite() {
            return Err(ChartError::NonNumericMeasure {
                row: None,
                category: String::from(TOTAL_CATEGORY),
            });
        }
        data_points.push(DataPoint {
            category: String::from(TOTAL_CATEGORY),
            value: total,
            color: self.colors.color_for(rows.len())?,
            selection_handle: SelectionHandle::AGGREGATE,
            source: PointRef::Aggregate,
            key: AGGREGATE_KEY,
        });

        let value_max = data_points
            .iter()
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max)
            + self.headroom;

        debug!(
            rows = rows.len(),
            mode = ?self.mode,
            aggregate = total,
            value_max,
            "built view model"
        );
        Ok(ViewModel {
            data_points,
            value_max,
        })
    }
}

const AGGREGATE_KEY: u64 = u64::MAX;

fn row_key(category: &str, ordinal: u64) -> u64 {
    fnv1a(fnv1a_str(category), &ordinal.to_le_bytes()).min(AGGREGATE_KEY - 1)
}

fn occurrence<'r>(seen: &mut Vec<(&'r str, u64)>, category: &'r str) -> u64 {
    match seen.iter_mut().find(|(c, _)| *c == category) {
        Some((_, n)) => {
            *n += 1;
            *n
        }
        None => {
            seen.push((category, 0));
            0
        }
    }
}
