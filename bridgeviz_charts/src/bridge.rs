// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge (waterfall) segments.
//!
//! A segment says "draw `bar` floating between the levels of `anchor` and `target`, and link
//! the three bars with horizontal connectors". The floating bar's height is the gap between
//! the two levels, which is exactly what the `Difference` aggregate measures.
//!
//! Segments also decide layout order: each segment's `bar` sits directly after its `anchor`.

extern crate alloc;

use alloc::vec::Vec;

use crate::ChartError;
use crate::aggregate::{AggregateMode, MIN_ROWS};
use crate::view_model::{PointRef, ViewModel};

/// One bridge between two points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BridgeSegment {
    /// Point whose level the bridge starts from.
    pub anchor: PointRef,
    /// Point drawn floating between the two levels.
    pub bar: PointRef,
    /// Point whose level the bridge ends at.
    pub target: PointRef,
}

impl BridgeSegment {
    /// The classic two-row waterfall: first row, gap, second row.
    pub const fn waterfall() -> Self {
        Self {
            anchor: PointRef::Row(0),
            bar: PointRef::Aggregate,
            target: PointRef::Row(1),
        }
    }
}

/// How bridge segments are chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BridgeLayout {
    /// [`BridgeSegment::waterfall`] in `Difference` mode, plain bars in `Sum` mode.
    #[default]
    Auto,
    /// Plain grounded bars.
    None,
    /// An explicit segment list.
    Segments(Vec<BridgeSegment>),
}

impl BridgeLayout {
    /// Returns the segments that apply under `mode`.
    pub fn segments(&self, mode: AggregateMode) -> Vec<BridgeSegment> {
        match self {
            Self::Auto => match mode {
                AggregateMode::Difference => alloc::vec![BridgeSegment::waterfall()],
                AggregateMode::Sum => Vec::new(),
            },
            Self::None => Vec::new(),
            Self::Segments(s) => s.clone(),
        }
    }
}

/// A segment with its points resolved to view-model indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedSegment {
    /// Index of the anchor point.
    pub anchor: usize,
    /// Index of the floating bar.
    pub bar: usize,
    /// Index of the target point.
    pub target: usize,
}

/// Resolves `segments` against `view_model`.
///
/// An empty view model resolves to no segments. A segment naming a row the model does not
/// have fails with [`ChartError::InsufficientData`]; a bar that bridges to itself or appears
/// in two segments fails with [`ChartError::InvalidBridgeSegment`].
pub fn resolve_segments(
    view_model: &ViewModel,
    segments: &[BridgeSegment],
) -> Result<Vec<ResolvedSegment>, ChartError> {
    if view_model.data_points.is_empty() {
        return Ok(Vec::new());
    }
    let lookup = |point: PointRef| {
        view_model
            .index_of(point)
            .ok_or(ChartError::InsufficientData {
                required: match point {
                    PointRef::Row(i) => (i + 1).max(MIN_ROWS),
                    PointRef::Aggregate => MIN_ROWS,
                },
                actual: view_model.row_count(),
            })
    };

    let mut out: Vec<ResolvedSegment> = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let resolved = ResolvedSegment {
            anchor: lookup(segment.anchor)?,
            bar: lookup(segment.bar)?,
            target: lookup(segment.target)?,
        };
        let degenerate = resolved.bar == resolved.anchor
            || resolved.bar == resolved.target
            || out.iter().any(|s| s.bar == resolved.bar);
        if degenerate {
            return Err(ChartError::InvalidBridgeSegment { segment: i });
        }
        out.push(resolved);
    }
    Ok(out)
}

/// Layout order of `point_count` points: identity, except each segment's bar is moved to
/// directly after its anchor.
pub fn layout_order(point_count: usize, segments: &[ResolvedSegment]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..point_count).collect();
    for s in segments {
        let Some(from) = order.iter().position(|&i| i == s.bar) else {
            continue;
        };
        order.remove(from);
        let Some(anchor) = order.iter().position(|&i| i == s.anchor) else {
            order.insert(from, s.bar);
            continue;
        };
        order.insert(anchor + 1, s.bar);
    }
    order
}
