// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal retained scene for bridge charts.
//!
//! The crate owns three things:
//! - **Marks** with stable identity ([`MarkId`]) and fully evaluated payloads
//!   (rectangles, stroked paths, and unshaped text).
//! - A [`Scene`] that reconciles successive mark lists into keyed
//!   [`MarkDiff`] batches (`Enter` / `Update` / `Exit`).
//! - Hit testing for marks flagged as interactive.
//!
//! Drawing is out of scope: a host canvas consumes the diffs and applies them to its own
//! retained elements. Text shaping is likewise downstream; text marks carry plain strings.

#![no_std]

extern crate alloc;

mod diff;
mod id;
mod mark;
mod scene;

pub use diff::MarkDiff;
pub use id::MarkId;
pub use mark::{
    Mark, MarkBuilder, MarkKind, MarkPayload, PathPayload, RectPayload, TextAnchor, TextBaseline,
    TextPayload,
};
pub use scene::{MIN_HIT_EXTENT, Scene};
