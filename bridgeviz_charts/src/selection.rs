// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-to-highlight selection.
//!
//! The selected set lives in an external [`SelectionService`]. The controller only tracks
//! in-flight toggle requests and the last acknowledged set, and answers "is this handle
//! emphasized?" for the renderer.
//!
//! Requests are asynchronous: [`SelectionController::request_toggle`] hands a
//! [`ToggleRequest`] to the service, and the host later feeds the service's answer back as a
//! [`SelectionAck`]. Every accepted acknowledgement replaces the selected set wholesale, so
//! the last one received wins.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use tracing::{debug, warn};

/// Default time a toggle request may stay unacknowledged before it is dropped.
pub const DEFAULT_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Opaque identity of a data point for selection purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionHandle(u64);

impl SelectionHandle {
    /// Sentinel handle shared by synthetic aggregate points.
    pub const AGGREGATE: Self = Self(u64::MAX);

    /// Wraps a raw handle value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Derives a handle from a category and its row position.
    ///
    /// The same `(category, index)` always yields the same handle, and never
    /// [`SelectionHandle::AGGREGATE`].
    pub fn for_row(category: &str, index: usize) -> Self {
        let mut h = fnv1a(FNV_OFFSET, category.as_bytes());
        h = fnv1a(h, &(index as u64).to_le_bytes());
        Self(h.min(u64::MAX - 1))
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;

pub(crate) fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

pub(crate) fn fnv1a_str(s: &str) -> u64 {
    fnv1a(FNV_OFFSET, s.as_bytes())
}

/// Identifier of one toggle request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// A request to toggle one handle in the external selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleRequest {
    /// Request id, echoed back in the acknowledgement.
    pub id: RequestId,
    /// Handle to toggle.
    pub handle: SelectionHandle,
}

/// Why a toggle request did not produce a new selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// The service refused the toggle.
    Rejected,
    /// The request was not acknowledged in time.
    TimedOut,
    /// The acknowledgement does not match any in-flight request.
    UnknownRequest,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rejected => "selection toggle rejected",
            Self::TimedOut => "selection toggle timed out",
            Self::UnknownRequest => "acknowledgement for unknown selection request",
        })
    }
}

impl core::error::Error for SelectionError {}

/// The service's answer to a [`ToggleRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionAck {
    /// Id of the request being answered.
    pub request: RequestId,
    /// The full set of selected handles after the toggle, or the failure.
    pub result: Result<Vec<SelectionHandle>, SelectionError>,
}

/// The host's selection service.
pub trait SelectionService {
    /// Creates the handle for the row at `index` with the given category.
    fn create_handle(&self, category: &str, index: usize) -> SelectionHandle;

    /// Starts toggling `request.handle`.
    ///
    /// The answer arrives later as a [`SelectionAck`] carrying `request.id`.
    fn request_toggle(&mut self, request: ToggleRequest);
}

/// An in-memory selection service with set-toggle semantics.
///
/// Toggling a handle inserts it if absent and removes it otherwise, so toggling the same
/// handle twice restores the previous set. Requests queue until acknowledged.
#[derive(Clone, Debug, Default)]
pub struct LocalSelectionService {
    selected: Vec<SelectionHandle>,
    queue: VecDeque<ToggleRequest>,
}

impl LocalSelectionService {
    /// Creates a service with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected handles, in insertion order.
    pub fn selected(&self) -> &[SelectionHandle] {
        &self.selected
    }

    /// Number of queued, unanswered requests.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Applies the oldest queued toggle and returns its acknowledgement.
    pub fn acknowledge_next(&mut self) -> Option<SelectionAck> {
        let request = self.queue.pop_front()?;
        Some(SelectionAck {
            request: request.id,
            result: Ok(self.toggle(request.handle).to_vec()),
        })
    }

    /// Drops the oldest queued toggle and returns a rejection for it.
    pub fn reject_next(&mut self) -> Option<SelectionAck> {
        let request = self.queue.pop_front()?;
        Some(SelectionAck {
            request: request.id,
            result: Err(SelectionError::Rejected),
        })
    }

    /// Toggles `handle` immediately and returns the new set.
    pub fn toggle(&mut self, handle: SelectionHandle) -> &[SelectionHandle] {
        match self.selected.iter().position(|h| *h == handle) {
            Some(i) => {
                self.selected.remove(i);
            }
            None => self.selected.push(handle),
        }
        &self.selected
    }
}

impl SelectionService for LocalSelectionService {
    fn create_handle(&self, category: &str, index: usize) -> SelectionHandle {
        SelectionHandle::for_row(category, index)
    }

    fn request_toggle(&mut self, request: ToggleRequest) {
        self.queue.push_back(request);
    }
}

/// Visual emphasis of a data point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// Drawn at full opacity.
    Normal,
    /// Drawn faded.
    Dimmed,
}

#[derive(Clone, Copy, Debug)]
struct InFlight {
    id: RequestId,
    handle: SelectionHandle,
    issued_at: Duration,
}

/// Tracks in-flight toggle requests and the last acknowledged selection.
///
/// Time is a host-supplied monotonic clock expressed as a [`Duration`] since an arbitrary
/// origin.
#[derive(Clone, Debug)]
pub struct SelectionController {
    timeout: Duration,
    next_request: u64,
    in_flight: Vec<InFlight>,
    selected: Vec<SelectionHandle>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTION_TIMEOUT)
    }
}

impl SelectionController {
    /// Creates a controller whose requests expire after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            next_request: 1,
            in_flight: Vec::new(),
            selected: Vec::new(),
        }
    }

    /// Last acknowledged selection.
    pub fn selected(&self) -> &[SelectionHandle] {
        &self.selected
    }

    /// Number of requests awaiting acknowledgement.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Emphasis for `handle` under the current selection.
    ///
    /// With nothing selected every point is [`Emphasis::Normal`].
    pub fn emphasis(&self, handle: SelectionHandle) -> Emphasis {
        if self.selected.is_empty() || self.selected.contains(&handle) {
            Emphasis::Normal
        } else {
            Emphasis::Dimmed
        }
    }

    /// Issues a toggle request for `handle` to `service`.
    pub fn request_toggle(
        &mut self,
        service: &mut impl SelectionService,
        handle: SelectionHandle,
        now: Duration,
    ) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.in_flight.push(InFlight {
            id,
            handle,
            issued_at: now,
        });
        debug!(request = id.0, handle = handle.raw(), "selection toggle requested");
        service.request_toggle(ToggleRequest { id, handle });
        id
    }

    /// Applies an acknowledgement received at host time `now`.
    ///
    /// Requests past the timeout at `now` are expired first. On success the selected set is
    /// replaced and returned. Failures and acknowledgements for unknown (for example
    /// expired) requests leave the selection unchanged.
    pub fn acknowledge(
        &mut self,
        ack: SelectionAck,
        now: Duration,
    ) -> Result<&[SelectionHandle], SelectionError> {
        self.expire(now);
        let Some(pos) = self.in_flight.iter().position(|r| r.id == ack.request) else {
            warn!(request = ack.request.0, "ignoring acknowledgement for unknown request");
            return Err(SelectionError::UnknownRequest);
        };
        let request = self.in_flight.remove(pos);
        match ack.result {
            Ok(set) => {
                debug!(
                    request = request.id.0,
                    handle = request.handle.raw(),
                    selected = set.len(),
                    "selection acknowledged"
                );
                self.selected = set;
                Ok(&self.selected)
            }
            Err(err) => {
                warn!(request = request.id.0, error = %err, "selection toggle failed");
                Err(err)
            }
        }
    }

    /// Drops requests older than the timeout. Returns how many were dropped.
    pub fn expire(&mut self, now: Duration) -> usize {
        let timeout = self.timeout;
        let before = self.in_flight.len();
        self.in_flight.retain(|r| {
            let alive = now.saturating_sub(r.issued_at) < timeout;
            if !alive {
                warn!(
                    request = r.id.0,
                    error = %SelectionError::TimedOut,
                    "dropping selection request"
                );
            }
            alive
        });
        before - self.in_flight.len()
    }

    /// Forgets in-flight requests and the acknowledged selection.
    pub fn reset(&mut self) {
        self.in_flight.clear();
        self.selected.clear();
    }
}
