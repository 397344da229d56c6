// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable mark identity.

/// A stable identifier for a mark.
///
/// Identity is what the [`Scene`](crate::Scene) diffs on: a mark with the same id in two
/// consecutive ticks is an `Update`, never an `Exit` followed by an `Enter`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

/// Keyed ids always carry the top bit so they cannot collide with small raw ids used by guides.
const KEYED_BIT: u64 = 1 << 63;

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id for a keyed element (for example a bar keyed by its category).
    ///
    /// The same `(namespace, key)` pair always yields the same id.
    pub fn for_key(namespace: u32, key: u64) -> Self {
        let mixed = splitmix64((u64::from(namespace) << 32) ^ splitmix64(key));
        Self(KEYED_BIT | (mixed >> 1))
    }

    /// Returns `true` if this id was produced by [`MarkId::for_key`].
    pub fn is_keyed(self) -> bool {
        self.0 & KEYED_BIT != 0
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
