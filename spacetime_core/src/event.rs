// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace events and the identifiers that key them.
//!
//! Events are produced and owned by a [`TraceSource`](crate::source::TraceSource);
//! the layout engine only ever reads them.

use alloc::string::String;
use core::fmt;

/// Separator between a thread's display name and the rest of its identifier.
pub const THREAD_NAME_SEPARATOR: &str = "||";

/// Unique, stable identifier of a trace event.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EventId(pub String);

impl EventId {
    /// Creates an identifier from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the process that owns an event. Colors are keyed by it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ProcessId(pub String);

impl ProcessId {
    /// Creates an identifier from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessId({})", self.0)
    }
}

/// Opaque identifier of a thread. Timelines are keyed by it.
///
/// The identifier encodes the thread's display name followed by
/// [`THREAD_NAME_SEPARATOR`] and whatever else the tracer needs to make it
/// unique (pid, host, ...).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ThreadId(pub String);

impl ThreadId {
    /// Creates an identifier from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the canonical display name: everything before the first
    /// [`THREAD_NAME_SEPARATOR`], or the whole identifier if it has none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.0
            .split_once(THREAD_NAME_SEPARATOR)
            .map_or(self.0.as_str(), |(name, _)| name)
    }
}

impl fmt::Debug for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThreadId({})", self.0)
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What happened at an event.
///
/// The set mirrors what the tracer records for sockets and processes. Unknown
/// kinds round-trip through [`Other`](Self::Other).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum EventKind {
    /// A socket connected to a remote endpoint.
    Connect,
    /// A listening socket accepted a connection.
    Accept,
    /// A message was sent.
    Send,
    /// A message was received.
    Receive,
    /// A process spawned a child.
    Create,
    /// A process joined a child.
    Join,
    /// A process started.
    Start,
    /// A process ended.
    End,
    /// A free-form log line.
    Log,
    /// Any kind not known to this crate.
    Other(String),
}

impl EventKind {
    /// Returns the wire name, which is also the label drawn beside markers.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connect => "CONNECT",
            Self::Accept => "ACCEPT",
            Self::Send => "SND",
            Self::Receive => "RCV",
            Self::Create => "CREATE",
            Self::Join => "JOIN",
            Self::Start => "START",
            Self::End => "END",
            Self::Log => "LOG",
            Self::Other(name) => name,
        }
    }

    /// Returns whether this kind carries a message between endpoints.
    ///
    /// Only message events have their dependency drawn as a connector.
    #[must_use]
    pub const fn is_message(&self) -> bool {
        matches!(self, Self::Send | Self::Receive)
    }
}

impl From<&str> for EventKind {
    fn from(name: &str) -> Self {
        match name {
            "CONNECT" => Self::Connect,
            "ACCEPT" => Self::Accept,
            "SND" => Self::Send,
            "RCV" => Self::Receive,
            "CREATE" => Self::Create,
            "JOIN" => Self::Join,
            "START" => Self::Start,
            "END" => Self::End,
            "LOG" => Self::Log,
            other => Self::Other(other.into()),
        }
    }
}

impl From<String> for EventKind {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Other(_) => Self::Other(name),
            known => known,
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Other(name) => name,
            known => known.as_str().into(),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form event data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Payload {
    /// Source endpoint, for message events.
    pub source: Option<String>,
    /// Destination endpoint(s), for message events.
    pub destination: Option<String>,
    /// Message identifier, or the raw log text for non-message events.
    pub message: Option<String>,
}

/// A single event of an execution trace.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEvent {
    /// Unique, stable identifier.
    pub id: EventId,
    /// Logical clock index. Strictly increasing in emission order.
    pub clock: u64,
    /// What happened.
    pub kind: EventKind,
    /// Owning process.
    pub process: ProcessId,
    /// Owning thread.
    pub thread: ThreadId,
    /// The causally preceding event, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dependency: Option<EventId>,
    /// Free-form data.
    #[cfg_attr(feature = "serde", serde(default))]
    pub payload: Payload,
}

impl TraceEvent {
    /// Creates an event with no dependency and an empty payload.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        clock: u64,
        kind: EventKind,
        process: impl Into<String>,
        thread: impl Into<String>,
    ) -> Self {
        Self {
            id: EventId::new(id),
            clock,
            kind,
            process: ProcessId::new(process),
            thread: ThreadId::new(thread),
            dependency: None,
            payload: Payload::default(),
        }
    }

    /// Sets the causally preceding event.
    #[must_use]
    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependency = Some(EventId::new(dependency));
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Returns the identifier of the thread this event belongs to.
    #[must_use]
    pub fn thread_id(&self) -> &ThreadId {
        &self.thread
    }

    /// Returns whether the event declares a causal dependency.
    #[must_use]
    pub fn has_dependency(&self) -> bool {
        self.dependency.is_some()
    }
}
