// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by the chart pipeline.

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// Errors that abort an update cycle.
///
/// Any of these leaves the previously rendered scene untouched: there is no partial chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChartError {
    /// A row has fewer than the two required fields (category, measure).
    MalformedRow {
        /// Index of the offending row.
        row: usize,
        /// Number of fields the row actually has.
        fields: usize,
    },
    /// A row has an empty category label.
    EmptyCategory {
        /// Index of the offending row.
        row: usize,
    },
    /// Fewer points than the aggregate or a bridge segment needs.
    InsufficientData {
        /// Minimum number of rows needed.
        required: usize,
        /// Number of rows supplied.
        actual: usize,
    },
    /// A measure (or a value derived from measures) is not a finite number.
    NonNumericMeasure {
        /// Index of the offending row, or `None` for the aggregate point.
        row: Option<usize>,
        /// Category of the offending point.
        category: String,
    },
    /// The color provider has no entries.
    EmptyPalette,
    /// A bridge segment is degenerate (a bar bridging to itself, or a bar used twice).
    InvalidBridgeSegment {
        /// Index of the segment in the configured list.
        segment: usize,
    },
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRow { row, fields } => {
                write!(f, "row {row} has {fields} field(s), expected at least 2")
            }
            Self::EmptyCategory { row } => write!(f, "row {row} has an empty category"),
            Self::InsufficientData { required, actual } => {
                write!(f, "need at least {required} row(s), got {actual}")
            }
            Self::NonNumericMeasure {
                row: Some(row),
                category,
            } => write!(f, "measure of row {row} ({category:?}) is not a finite number"),
            Self::NonNumericMeasure {
                row: None,
                category,
            } => write!(f, "aggregate {category:?} is not a finite number"),
            Self::EmptyPalette => f.write_str("color palette is empty"),
            Self::InvalidBridgeSegment { segment } => {
                write!(f, "bridge segment {segment} is degenerate")
            }
        }
    }
}

impl core::error::Error for ChartError {}
