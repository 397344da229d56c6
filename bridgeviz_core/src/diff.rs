// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed mark diffs.

extern crate alloc;

use alloc::boxed::Box;

use kurbo::Rect;

use crate::{MarkId, MarkKind, MarkPayload};

/// A change to a single mark between two scene states.
///
/// A host canvas applies a batch of diffs in order: `Enter` creates an element, `Update`
/// rewrites its attributes in place, and `Exit` removes it.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// The mark is new in this tick.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Render order hint.
        z_index: i32,
        /// Bounds of the new payload, if any.
        bounds: Option<Rect>,
        /// New payload.
        new: Box<MarkPayload>,
    },
    /// The mark existed before and its payload or z-index changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind (after the update).
        kind: MarkKind,
        /// Previous render order hint.
        old_z_index: i32,
        /// New render order hint.
        new_z_index: i32,
        /// Bounds before the update.
        old_bounds: Option<Rect>,
        /// Bounds after the update.
        new_bounds: Option<Rect>,
        /// Previous payload.
        old: Box<MarkPayload>,
        /// New payload.
        new: Box<MarkPayload>,
    },
    /// The mark is gone in this tick.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Last render order hint.
        z_index: i32,
        /// Last known bounds.
        bounds: Option<Rect>,
        /// Last payload.
        old: Box<MarkPayload>,
    },
}

impl MarkDiff {
    /// Returns the id of the mark this diff applies to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }

    /// Returns `true` for `Enter` diffs.
    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }

    /// Returns `true` for `Update` diffs.
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    /// Returns `true` for `Exit` diffs.
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}
