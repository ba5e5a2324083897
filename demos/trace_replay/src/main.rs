// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replays a JSON trace into a space-time diagram.
//!
//! Reads the trace named on the command line (or a built-in sample), draws it
//! clock by clock into a [`SceneSurface`](spacetime_debug::scene::SceneSurface)
//! while printing diagnostics through a
//! [`PrettyPrintSink`](spacetime_debug::pretty::PrettyPrintSink), then writes
//! the diagram as an SVG file.
//!
//! Set `RUST_LOG=debug` to see skipped connectors and markers.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use spacetime_core::diagnostics::Tracer;
use spacetime_core::{RenderOutcome, Session, SessionConfig};
use spacetime_debug::pretty::PrettyPrintSink;
use spacetime_debug::scene::SceneSurface;
use spacetime_debug::{json, svg};

const SAMPLE_TRACE: &str = include_str!("../sample_trace.json");
const OUTPUT_PATH: &str = "trace_replay.svg";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // -- trace -------------------------------------------------------------
    let trace = match std::env::args().nth(1) {
        Some(path) => json::load_trace(File::open(&path)?)?,
        None => json::parse_trace(SAMPLE_TRACE)?,
    };
    log::info!("replaying {} events", trace.len());

    // -- replay ------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut session = Session::new(trace, SceneSurface::new(), SessionConfig::default());
    let mut unplaced = 0_u64;
    {
        let mut tracer = Tracer::new(&mut pretty);
        loop {
            match session.advance_with(&mut tracer)? {
                RenderOutcome::NoEvent => break,
                RenderOutcome::Unplaced { .. } => unplaced += 1,
                RenderOutcome::Drawn(_) => {}
            }
        }
    }

    // -- export ------------------------------------------------------------
    let threads = session.drawn_threads().len();
    let clocks = session.drawn_clocks();
    let (_, scene) = session.into_parts();
    let mut writer = BufWriter::new(File::create(OUTPUT_PATH)?);
    svg::export(&scene, &mut writer)?;

    println!("Wrote {OUTPUT_PATH} ({clocks} clocks, {threads} timelines, {unplaced} unplaced)");
    Ok(())
}
