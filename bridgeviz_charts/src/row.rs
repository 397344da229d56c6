// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row normalization: loosely typed host cells into `(category, measure)` pairs.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::ChartError;

/// A single loosely typed cell as supplied by the host.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Cell {
    /// Missing value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl Cell {
    /// Coerces the cell to a measure.
    ///
    /// Numbers pass through, booleans map to `1`/`0`, null maps to `0`, and text is parsed
    /// after trimming (blank text is `0`). Unparseable text yields `NaN`; this never fails.
    pub fn to_measure(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(v) => *v,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// Stringifies the cell for use as a category label.
    pub fn to_category(&self) -> String {
        match self {
            Self::Null => String::from("null"),
            Self::Bool(b) => format!("{b}"),
            Self::Number(v) => format!("{v}"),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A normalized input row.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Category label.
    pub category: String,
    /// Measure value. May be non-finite; validation happens in the view-model builder.
    pub measure: f64,
}

/// Normalizes host rows into typed [`Row`]s, preserving order.
///
/// Only the first two fields of each row are read. Fails with
/// [`ChartError::MalformedRow`] if any row has fewer than two fields.
pub fn normalize_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Vec<Row>, ChartError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row.as_ref() {
            [category, measure, ..] => Ok(Row {
                category: category.to_category(),
                measure: measure.to_measure(),
            }),
            short => Err(ChartError::MalformedRow {
                row: i,
                fields: short.len(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn measures_are_coerced_like_host_numbers() {
        assert_eq!(Cell::from(" 12.5 ").to_measure(), 12.5);
        assert_eq!(Cell::from("").to_measure(), 0.0);
        assert_eq!(Cell::Null.to_measure(), 0.0);
        assert_eq!(Cell::from(true).to_measure(), 1.0);
        assert!(Cell::from("twelve").to_measure().is_nan());
    }

    #[test]
    fn numeric_categories_are_stringified_without_trailing_zeroes() {
        assert_eq!(Cell::from(2024.0).to_category(), "2024");
        assert_eq!(Cell::from(1.5).to_category(), "1.5");
        assert_eq!(Cell::from("East").to_category(), "East");
    }

    #[test]
    fn normalize_keeps_order_and_ignores_extra_fields() {
        let rows = vec![
            vec![Cell::from("A"), Cell::from(10.0), Cell::from("extra")],
            vec![Cell::from("B"), Cell::from("30")],
        ];
        let out = normalize_rows(&rows).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].category, "A");
        assert_eq!(out[0].measure, 10.0);
        assert_eq!(out[1].category, "B");
        assert_eq!(out[1].measure, 30.0);
    }

    #[test]
    fn short_rows_are_malformed() {
        let rows = vec![vec![Cell::from("A"), Cell::from(1.0)], vec![Cell::from("B")]];
        assert_eq!(
            normalize_rows(&rows),
            Err(ChartError::MalformedRow { row: 1, fields: 1 })
        );
    }

    #[test]
    fn non_numeric_measures_propagate_as_nan() {
        let rows = vec![vec![Cell::from("A"), Cell::from("n/a")]];
        let out = normalize_rows(&rows).unwrap();
        assert!(out[0].measure.is_nan());
    }
}
