// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained mark state and reconciliation.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect};

use crate::{Mark, MarkDiff, MarkId};

/// Smallest width and height a mark presents to [`Scene::hit_test`].
pub const MIN_HIT_EXTENT: f64 = 4.0;

/// The set of currently rendered marks.
///
/// The scene owns rendered state between update cycles. Every change goes through
/// [`Scene::tick`] or [`Scene::patch`], which return the diffs a canvas must apply to stay in
/// sync.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
    version: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if no marks are live.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Monotonic counter bumped by every call that produced at least one diff.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Looks up a live mark.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Returns live marks in paint order (`(z_index, id)`).
    pub fn marks_in_paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.values().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Replaces the scene contents with `marks` and returns the keyed diff.
    ///
    /// Marks present before and after are `Update`d only if their payload or z-index changed.
    /// If `marks` contains the same id more than once, the first occurrence wins.
    ///
    /// `Enter`/`Update` diffs follow the input order; `Exit` diffs follow, sorted by id.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut diffs = Vec::new();
        let mut seen: HashSet<MarkId> = HashSet::new();
        let mut next: HashMap<MarkId, Mark> = HashMap::new();

        for mark in marks {
            if !seen.insert(mark.id) {
                continue;
            }
            match self.marks.remove(&mark.id) {
                Some(old) => {
                    if old.payload != mark.payload || old.z_index != mark.z_index {
                        diffs.push(update_diff(&old, &mark));
                    }
                }
                None => diffs.push(MarkDiff::Enter {
                    id: mark.id,
                    kind: mark.kind(),
                    z_index: mark.z_index,
                    bounds: mark.bounds(),
                    new: Box::new(mark.payload.clone()),
                }),
            }
            next.insert(mark.id, mark);
        }

        let mut gone: Vec<Mark> = self.marks.drain().map(|(_, m)| m).collect();
        gone.sort_by_key(|m| m.id);
        diffs.extend(gone.into_iter().map(exit_diff));

        self.marks = next;
        if !diffs.is_empty() {
            self.version += 1;
        }
        diffs
    }

    /// Mutates a live mark in place.
    ///
    /// Returns `None` if the mark does not exist or the closure left it unchanged.
    pub fn patch(&mut self, id: MarkId, f: impl FnOnce(&mut Mark)) -> Option<MarkDiff> {
        let mark = self.marks.get_mut(&id)?;
        let old = mark.clone();
        f(mark);
        mark.id = id;
        if old.payload == mark.payload && old.z_index == mark.z_index {
            return None;
        }
        self.version += 1;
        Some(update_diff(&old, mark))
    }

    /// Returns the topmost interactive mark whose bounds contain `point`.
    ///
    /// Bounds thinner than [`MIN_HIT_EXTENT`] on either axis are widened to it around their
    /// center, so zero-height marks stay clickable. Ties in `z_index` resolve to the larger
    /// id, matching the paint order.
    pub fn hit_test(&self, point: Point) -> Option<MarkId> {
        self.marks
            .values()
            .filter(|m| m.interactive)
            .filter(|m| m.bounds().is_some_and(|b| hit_area(b).contains(point)))
            .max_by_key(|m| (m.z_index, m.id))
            .map(|m| m.id)
    }

    /// Removes every mark, returning one `Exit` per mark sorted by id.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        let mut gone: Vec<Mark> = self.marks.drain().map(|(_, m)| m).collect();
        gone.sort_by_key(|m| m.id);
        if !gone.is_empty() {
            self.version += 1;
        }
        gone.into_iter().map(exit_diff).collect()
    }
}

fn update_diff(old: &Mark, new: &Mark) -> MarkDiff {
    MarkDiff::Update {
        id: new.id,
        kind: new.kind(),
        old_z_index: old.z_index,
        new_z_index: new.z_index,
        old_bounds: old.bounds(),
        new_bounds: new.bounds(),
        old: Box::new(old.payload.clone()),
        new: Box::new(new.payload.clone()),
    }
}

fn hit_area(bounds: Rect) -> Rect {
    let center = bounds.center();
    let (w, h) = (
        bounds.width().max(MIN_HIT_EXTENT),
        bounds.height().max(MIN_HIT_EXTENT),
    );
    Rect::from_center_size(center, (w, h))
}

fn exit_diff(mark: Mark) -> MarkDiff {
    MarkDiff::Exit {
        id: mark.id,
        kind: mark.kind(),
        z_index: mark.z_index,
        bounds: mark.bounds(),
        old: Box::new(mark.payload),
    }
}
