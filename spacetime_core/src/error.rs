// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Expected absences (no event at a clock, a dependency that predates the
//! visible trace, a thread the source cannot order) are not errors; they show
//! up as [`RenderOutcome`](crate::session::RenderOutcome) variants.

use crate::event::EventId;

/// Failures of the layout engine.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// A clock was requested out of sequence.
    #[error("clock {requested} requested out of order, next clock is {expected}")]
    OutOfOrder {
        /// The clock the session will draw next.
        expected: u64,
        /// The clock the caller asked for.
        requested: u64,
    },
    /// Every color of the palette is assigned and the session is configured
    /// to fail rather than wrap.
    #[error("palette of {palette_len} colors exhausted")]
    PaletteExhausted {
        /// Number of colors in the palette.
        palette_len: usize,
    },
}

/// Failures while building an in-memory trace.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum TraceError {
    /// An event's clock does not continue the sequence.
    #[error("expected an event at clock {expected}, found clock {found}")]
    NonContiguousClock {
        /// The next clock the trace can accept.
        expected: u64,
        /// The clock of the rejected event.
        found: u64,
    },
    /// An event id was already used.
    #[error("duplicate event id {0}")]
    DuplicateEvent(EventId),
}
