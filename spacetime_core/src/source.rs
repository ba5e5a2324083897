// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace data sources.
//!
//! The layout engine pulls events one clock at a time through
//! [`TraceSource`]. It never decides thread order on its own: the source hands
//! back a stable ordering index for each thread, and the horizontal position
//! of a timeline is derived from that index.
//!
//! [`VecTrace`] is the in-memory source used by the debug tooling and tests.
//! Events may be appended while a session is drawing, so a live trace can be
//! followed by calling [`Session::advance`](crate::session::Session::advance)
//! whenever new events arrive.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::error::TraceError;
use crate::event::{EventId, ThreadId, TraceEvent};

/// A source of trace events indexed by logical clock.
pub trait TraceSource {
    /// Returns the event at `clock`, or `None` if the trace has no event
    /// there (yet).
    fn event_at(&self, clock: u64) -> Option<&TraceEvent>;

    /// Returns the stable ordering index of `thread`, or `None` if the thread
    /// is unknown to the source.
    fn ordered_index_of(&self, thread: &ThreadId) -> Option<usize>;
}

impl<T: TraceSource + ?Sized> TraceSource for &T {
    fn event_at(&self, clock: u64) -> Option<&TraceEvent> {
        (**self).event_at(clock)
    }

    fn ordered_index_of(&self, thread: &ThreadId) -> Option<usize> {
        (**self).ordered_index_of(thread)
    }
}

/// An append-only, in-memory trace.
///
/// Events must arrive with contiguous clocks starting at zero. Threads are
/// ordered by first appearance.
#[derive(Clone, Debug, Default)]
pub struct VecTrace {
    events: Vec<TraceEvent>,
    ids: HashSet<EventId>,
    threads: Vec<ThreadId>,
    thread_index: HashMap<ThreadId, usize>,
}

impl VecTrace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a trace from events in clock order.
    pub fn from_events(
        events: impl IntoIterator<Item = TraceEvent>,
    ) -> Result<Self, TraceError> {
        let mut trace = Self::new();
        for event in events {
            trace.push(event)?;
        }
        Ok(trace)
    }

    /// Appends an event.
    ///
    /// The event's clock must equal [`len`](Self::len) and its id must be new.
    pub fn push(&mut self, event: TraceEvent) -> Result<(), TraceError> {
        let expected = self.events.len() as u64;
        if event.clock != expected {
            return Err(TraceError::NonContiguousClock {
                expected,
                found: event.clock,
            });
        }
        if self.ids.contains(&event.id) {
            return Err(TraceError::DuplicateEvent(event.id));
        }

        if !self.thread_index.contains_key(&event.thread) {
            self.thread_index
                .insert(event.thread.clone(), self.threads.len());
            self.threads.push(event.thread.clone());
        }
        self.ids.insert(event.id.clone());
        self.events.push(event);
        Ok(())
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether the trace has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the threads in ordering-index order.
    #[must_use]
    pub fn threads(&self) -> &[ThreadId] {
        &self.threads
    }

    /// Returns all events in clock order.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }
}

impl TraceSource for VecTrace {
    fn event_at(&self, clock: u64) -> Option<&TraceEvent> {
        usize::try_from(clock)
            .ok()
            .and_then(|idx| self.events.get(idx))
    }

    fn ordered_index_of(&self, thread: &ThreadId) -> Option<usize> {
        self.thread_index.get(thread).copied()
    }
}
