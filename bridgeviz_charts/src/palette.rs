// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color providers for data points.

extern crate alloc;

use alloc::vec::Vec;

use peniko::Color;

use crate::ChartError;

/// The fixed five-entry palette used when the host does not supply one.
pub const DEFAULT_COLORS: [Color; 5] = [
    Color::from_rgba8(0x66, 0xc2, 0xa5, 0xff),
    Color::from_rgba8(0xfc, 0x8d, 0x62, 0xff),
    Color::from_rgba8(0x8d, 0xa0, 0xcb, 0xff),
    Color::from_rgba8(0xe7, 0x8a, 0xc3, 0xff),
    Color::from_rgba8(0xa6, 0xd8, 0x54, 0xff),
];

/// A source of point colors indexed by position.
///
/// Positions past the end wrap around (`index mod len`), so a provider never runs out;
/// categories `len` apart share a color.
pub trait ColorProvider {
    /// Number of distinct entries.
    fn len(&self) -> usize;

    /// Returns the entry at `slot`, where `slot < len()`.
    fn entry(&self, slot: usize) -> Color;

    /// Returns `true` if the provider has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color for the point at `index`, wrapping around the entries.
    fn color_for(&self, index: usize) -> Result<Color, ChartError> {
        let n = self.len();
        if n == 0 {
            return Err(ChartError::EmptyPalette);
        }
        Ok(self.entry(index % n))
    }
}

/// An owned list of colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette from `colors`.
    pub fn new(colors: impl Into<Vec<Color>>) -> Self {
        Self {
            colors: colors.into(),
        }
    }

    /// Returns the colors.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS)
    }
}

impl ColorProvider for Palette {
    fn len(&self) -> usize {
        self.colors.len()
    }

    fn entry(&self, slot: usize) -> Color {
        self.colors[slot]
    }
}
