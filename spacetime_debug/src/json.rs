// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON trace loading.
//!
//! A trace file is a JSON array of event objects in clock order:
//!
//! ```json
//! [
//!   { "id": "1", "type": "SND", "pid": "client", "thread": "main||client",
//!     "src": "10.0.0.1:4000", "dst": "10.0.0.2:80", "data": { "message": "7" } },
//!   { "id": "2", "type": "RCV", "pid": "server", "thread": "accept||server",
//!     "dependency": "1", "data": { "message": "7" } }
//! ]
//! ```
//!
//! `clock` may be given explicitly and otherwise defaults to the position in
//! the array. Ids, process ids, and message ids may be strings or numbers. A
//! missing `thread` falls back to the process id.

use std::io;

use serde::Deserialize;
use serde_json::Value;
use spacetime_core::error::TraceError;
use spacetime_core::event::{EventKind, Payload, TraceEvent};
use spacetime_core::source::VecTrace;

/// Errors raised while loading a trace.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input is not a well-formed trace document.
    #[error("malformed trace: {0}")]
    Json(#[from] serde_json::Error),
    /// An event of the document does not fit the trace.
    #[error("invalid trace: {0}")]
    Trace(#[from] TraceError),
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: Value,
    #[serde(rename = "type")]
    kind: EventKind,
    pid: Value,
    #[serde(default)]
    thread: Option<String>,
    #[serde(default)]
    clock: Option<u64>,
    #[serde(default)]
    dependency: Option<Value>,
    #[serde(default)]
    src: Option<String>,
    #[serde(default)]
    dst: Option<String>,
    #[serde(default)]
    data: RawData,
}

#[derive(Debug, Default, Deserialize)]
struct RawData {
    #[serde(default)]
    message: Option<Value>,
}

/// Renders a scalar as the string the data model stores.
///
/// `null` is treated as absent.
fn scalar(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl RawEvent {
    fn into_event(self, index: usize) -> TraceEvent {
        let process = scalar(self.pid).unwrap_or_default();
        let thread = self.thread.unwrap_or_else(|| process.clone());
        let clock = self.clock.unwrap_or(index as u64);
        let mut event = TraceEvent::new(
            scalar(self.id).unwrap_or_default(),
            clock,
            self.kind,
            process,
            thread,
        )
        .with_payload(Payload {
            source: self.src,
            destination: self.dst,
            message: self.data.message.and_then(scalar),
        });
        if let Some(dependency) = self.dependency.and_then(scalar) {
            event = event.with_dependency(dependency);
        }
        event
    }
}

fn build(raw: Vec<RawEvent>) -> Result<VecTrace, LoadError> {
    let count = raw.len();
    let trace = VecTrace::from_events(
        raw.into_iter()
            .enumerate()
            .map(|(index, event)| event.into_event(index)),
    )?;
    log::debug!(
        "loaded {count} events on {} threads",
        trace.threads().len()
    );
    Ok(trace)
}

/// Parses a trace document.
pub fn parse_trace(text: &str) -> Result<VecTrace, LoadError> {
    build(serde_json::from_str(text)?)
}

/// Reads a trace document from `reader`.
pub fn load_trace<R: io::Read>(reader: R) -> Result<VecTrace, LoadError> {
    build(serde_json::from_reader(io::BufReader::new(reader))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacetime_core::event::{EventId, ThreadId};
    use spacetime_core::source::TraceSource;

    const SAMPLE: &str = r#"[
        { "id": "1", "type": "SND", "pid": "client", "thread": "main||client",
          "src": "a:1", "dst": "b:2", "data": { "message": "7" } },
        { "id": 2, "type": "RCV", "pid": 42, "thread": "accept||server",
          "dependency": "1", "data": { "message": 7 } },
        { "id": "3", "type": "LOG", "pid": 42 }
    ]"#;

    #[test]
    fn parses_events_in_order() {
        let trace = parse_trace(SAMPLE).unwrap();
        assert_eq!(trace.len(), 3);

        let send = trace.event_at(0).unwrap();
        assert_eq!(send.kind, EventKind::Send);
        assert_eq!(send.payload.source.as_deref(), Some("a:1"));
        assert_eq!(send.payload.message.as_deref(), Some("7"));

        let receive = trace.event_at(1).unwrap();
        assert_eq!(receive.id, EventId::new("2"));
        assert_eq!(receive.process.as_str(), "42");
        assert_eq!(receive.dependency, Some(EventId::new("1")));
        assert_eq!(receive.payload.message.as_deref(), Some("7"));
    }

    #[test]
    fn thread_defaults_to_process() {
        let trace = parse_trace(SAMPLE).unwrap();
        let log = trace.event_at(2).unwrap();
        assert_eq!(log.thread, ThreadId::new("42"));
        assert_eq!(log.payload, Payload::default());
        assert_eq!(trace.ordered_index_of(&ThreadId::new("42")), Some(2));
    }

    #[test]
    fn unknown_kinds_are_kept() {
        let trace = parse_trace(r#"[{ "id": "x", "type": "FORK", "pid": "p" }]"#).unwrap();
        assert_eq!(trace.event_at(0).unwrap().kind, EventKind::Other("FORK".into()));
    }

    #[test]
    fn explicit_clock_gaps_are_rejected() {
        let err = parse_trace(r#"[{ "id": "x", "type": "LOG", "pid": "p", "clock": 3 }]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Trace(TraceError::NonContiguousClock {
                expected: 0,
                found: 3
            })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_trace(
            r#"[{ "id": "x", "type": "LOG", "pid": "p" }, { "id": "x", "type": "LOG", "pid": "p" }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Trace(TraceError::DuplicateEvent(_))));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = parse_trace("[{").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(err.to_string().starts_with("malformed trace"), "got: {err}");
    }

    #[test]
    fn load_reads_from_a_reader() {
        let trace = load_trace(SAMPLE.as_bytes()).unwrap();
        assert_eq!(trace.threads().len(), 3);
    }
}
