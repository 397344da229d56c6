// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived aggregate values for the synthetic "Total" point.

use crate::ChartError;
use crate::row::Row;

/// Minimum number of rows the aggregate calculator accepts.
pub const MIN_ROWS: usize = 2;

/// Which aggregate the synthetic point carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggregateMode {
    /// Sum of all row measures.
    Sum,
    /// Absolute gap between the first two row measures (bridge charts).
    #[default]
    Difference,
}

/// Both aggregates computed from one set of rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aggregates {
    /// Sum of all measures.
    pub total: f64,
    /// `|measure(row 0) - measure(row 1)|`.
    pub difference: f64,
}

impl Aggregates {
    /// Computes both aggregates.
    ///
    /// Needs at least [`MIN_ROWS`] rows. Non-finite measures propagate into the results.
    pub fn compute(rows: &[Row]) -> Result<Self, ChartError> {
        let [first, second, ..] = rows else {
            return Err(ChartError::InsufficientData {
                required: MIN_ROWS,
                actual: rows.len(),
            });
        };
        Ok(Self {
            total: rows.iter().map(|r| r.measure).sum(),
            difference: (first.measure - second.measure).abs(),
        })
    }

    /// Returns the aggregate selected by `mode`.
    pub fn value(&self, mode: AggregateMode) -> f64 {
        match mode {
            AggregateMode::Sum => self.total,
            AggregateMode::Difference => self.difference,
        }
    }
}
