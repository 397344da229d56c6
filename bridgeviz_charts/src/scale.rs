// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! A band scale places categories along x and a linear scale maps values along y. Both work
//! in drawable-area coordinates (`[0, width]` by `[0, height]`); callers offset by the plot
//! origin when emitting marks.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::view_model::ViewModel;

/// Default fraction of each band step left as padding.
pub const DEFAULT_BAND_PADDING: f64 = 0.1;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns a copy with the range shifted by `offset`.
    pub fn translated(&self, offset: f64) -> Self {
        Self::new(self.domain, (self.range.0 + offset, self.range.1 + offset))
    }

    /// Returns “nice-ish” tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).ceil() * step;
    let stop = (max / step).floor() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

pub(crate) fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale.
///
/// Bands are equal-width. `padding` is the fraction of each step left empty between bands,
/// and the same fraction is reserved before the first and after the last band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding: f64,
}

impl ScaleBand {
    /// Creates a band scale covering `count` bands over `range` with default padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding: DEFAULT_BAND_PADDING,
        }
    }

    /// Sets the padding fraction, clamped to `[0, 1)`.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.clamp(0.0, 0.99);
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Distance between the starts of consecutive bands.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let denom = n - self.padding + 2.0 * self.padding;
        if denom <= 0.0 {
            0.0
        } else {
            (r1 - r0).abs() / denom
        }
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Returns the start of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let step = self.step();
        let start = if r1 >= r0 { r0 } else { r1 };
        start + step * self.padding + step * index as f64
    }
}

/// A band along the category axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    /// Left edge.
    pub x: f64,
    /// Width.
    pub width: f64,
}

impl Band {
    /// Right edge.
    pub fn x_end(&self) -> f64 {
        self.x + self.width
    }

    /// Horizontal center.
    pub fn center(&self) -> f64 {
        self.x + 0.5 * self.width
    }
}

/// An ordinal scale from view-model points to bands.
///
/// Bands follow a layout order (a permutation of point indices). With the identity order
/// the bands follow the view model exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryScale {
    band: ScaleBand,
    domain: Vec<String>,
    slot_of_point: Vec<usize>,
}

impl CategoryScale {
    /// Builds the scale for `view_model` laid out in `order` over `[0, width]`.
    ///
    /// Indices in `order` that are out of range are skipped.
    pub fn new(view_model: &ViewModel, order: &[usize], width: f64, padding: f64) -> Self {
        let n = view_model.data_points.len();
        let order: Vec<usize> = order.iter().copied().filter(|&i| i < n).collect();
        let mut slot_of_point = alloc::vec![usize::MAX; n];
        for (slot, &point) in order.iter().enumerate() {
            slot_of_point[point] = slot;
        }
        Self {
            band: ScaleBand::new((0.0, width.max(0.0)), order.len()).with_padding(padding),
            domain: order
                .iter()
                .map(|&i| view_model.data_points[i].category.clone())
                .collect(),
            slot_of_point,
        }
    }

    /// Category labels in layout order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Returns `true` if no categories are mapped.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Underlying band scale.
    pub fn band_scale(&self) -> ScaleBand {
        self.band
    }

    /// Band of the band slot `slot` in layout order.
    pub fn band_at_slot(&self, slot: usize) -> Option<Band> {
        (slot < self.domain.len()).then(|| Band {
            x: self.band.x(slot),
            width: self.band.band_width(),
        })
    }

    /// Band of the view-model point at `index`.
    pub fn band_for_point(&self, index: usize) -> Option<Band> {
        let slot = *self.slot_of_point.get(index)?;
        self.band_at_slot(slot)
    }

    /// Band of the first point (in layout order) labeled `category`.
    pub fn band(&self, category: &str) -> Option<Band> {
        let slot = self.domain.iter().position(|c| c == category)?;
        self.band_at_slot(slot)
    }
}
