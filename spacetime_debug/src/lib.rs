// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene, SVG export, trace loading, and pretty-printing for
//! spacetime diagrams.
//!
//! This crate provides `std` implementations of the `spacetime_core` seams
//! for development and offline rendering:
//!
//! - [`scene::SceneSurface`]: an in-memory retained scene implementing
//!   [`Surface`](spacetime_core::backend::Surface),
//!   [`Tooltips`](spacetime_core::backend::Tooltips), and
//!   [`Viewport`](spacetime_core::backend::Viewport).
//! - [`svg::to_svg`]: serializes a scene as an SVG document.
//! - [`json::load_trace`]: reads a JSON trace into a
//!   [`VecTrace`](spacetime_core::source::VecTrace).
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.

pub mod json;
pub mod pretty;
pub mod scene;
pub mod svg;
