// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental layout engine for space-time diagrams of distributed traces.
//!
//! `spacetime_core` assigns screen coordinates to the threads and events of
//! an execution trace, one logical clock at a time. Each thread gets a
//! vertical timeline; each event becomes a marker on its thread's timeline at
//! the row of its clock; causally related send/receive pairs are joined by a
//! connector. The crate is `no_std` compatible (with `alloc`) and draws
//! through capability traits, so the same layout drives an SVG document, a
//! DOM, or a test double.
//!
//! # Architecture
//!
//! Data flows one way, from the clock driver down to the drawing surface:
//!
//! ```text
//!   Session::advance()
//!       │
//!       ▼
//!   Session::render_clock(clock) ──► TraceSource::event_at()
//!       │
//!       ├──► ColorAllocator::color_for()
//!       ├──► layout::position_for()  ──► TraceSource::ordered_index_of()
//!       ├──► Timelines::open() / extend_all()
//!       │
//!       ▼
//!   Surface / Tooltips ──► Viewport::scroll_to_bottom()
//! ```
//!
//! **[`event`]**: Trace events, identifiers, and event kinds.
//!
//! **[`source`]**: The [`TraceSource`](source::TraceSource) trait and the
//! in-memory [`VecTrace`](source::VecTrace) store.
//!
//! **[`backend`]**: Capability traits the layout draws through:
//! [`Surface`](backend::Surface), [`Tooltips`](backend::Tooltips) and
//! [`Viewport`](backend::Viewport).
//!
//! **[`color`]**: Session-owned palette and per-process color allocation.
//!
//! **[`layout`]**: Layout constants and coordinate math.
//!
//! **[`timeline`]**: Per-thread timeline stems that only ever grow downward.
//!
//! **[`session`]**: The stateful [`Session`](session::Session): clock driver,
//! event renderer, and reset.
//!
//! **[`diagnostics`]**: [`DiagnosticSink`](diagnostics::DiagnosticSink)
//! trait and zero-overhead [`Tracer`](diagnostics::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `diagnostics` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `serde` (disabled by default): Derives `Serialize` and `Deserialize` for
//!   the data model and configuration types.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod color;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod layout;
pub mod session;
pub mod source;
pub mod timeline;

mod render;

#[cfg(test)]
mod testing;

pub use error::{LayoutError, TraceError};
pub use session::{DrawnEvent, RenderOutcome, Session, SessionConfig};
