//! Run events and the sinks that receive them
//!
//! Every tool invocation produces exactly one [`ToolRunEvent`]. The runner
//! holds it in a [`PendingEvent`] guard which hands it to the configured
//! [`EventSink`] when dropped, so the event is delivered whether the provider
//! returns, fails, or unwinds.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Tool;

/// Record of one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRunEvent {
    pub namespace: String,
    pub name: String,
    /// Type name of the provider that ran
    pub provider: String,
    /// Arguments joined by a single space
    pub args: String,
    pub code: i32,
    pub out: String,
    pub err: String,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl ToolRunEvent {
    pub fn begin(tool: &Tool, args: &[String]) -> Self {
        Self {
            namespace: tool.namespace().to_string(),
            name: tool.name().to_string(),
            provider: tool.provider().identity().to_string(),
            args: args.join(" "),
            code: 0,
            out: String::new(),
            err: String::new(),
            started_at: Utc::now(),
            duration: Duration::ZERO,
        }
    }
}

/// Receiver of committed run events.
pub trait EventSink: Send + Sync {
    fn commit(&self, event: ToolRunEvent);
}

/// Emits each event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn commit(&self, event: ToolRunEvent) {
        tracing::info!(
            target: "toolbelt::events",
            namespace = %event.namespace,
            name = %event.name,
            provider = %event.provider,
            args = %event.args,
            code = event.code,
            duration_ms = event.duration.as_millis() as u64,
            "tool run"
        );
    }
}

/// Keeps events in memory, in commit order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ToolRunEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ToolRunEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn commit(&self, event: ToolRunEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Appends one JSON document per event to a file.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesSink {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &ToolRunEvent) -> io::Result<()> {
        let line = serde_json::to_string(event).map_err(io::Error::other)?;
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{line}")?;
        file.flush()
    }
}

impl EventSink for JsonLinesSink {
    fn commit(&self, event: ToolRunEvent) {
        if let Err(e) = self.append(&event) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to record tool run event");
        }
    }
}

/// Commit-on-drop holder for the event of a running invocation.
pub(crate) struct PendingEvent<'a> {
    sink: &'a dyn EventSink,
    started: Instant,
    event: Option<ToolRunEvent>,
}

impl<'a> PendingEvent<'a> {
    pub(crate) fn begin(sink: &'a dyn EventSink, tool: &Tool, args: &[String]) -> Self {
        Self {
            sink,
            started: Instant::now(),
            event: Some(ToolRunEvent::begin(tool, args)),
        }
    }

    pub(crate) fn args(&self) -> &str {
        self.event.as_ref().map_or("", |event| event.args.as_str())
    }

    pub(crate) fn record_output(&mut self, out: String, err: String) {
        if let Some(event) = self.event.as_mut() {
            event.out = out;
            event.err = err;
        }
    }

    pub(crate) fn record_code(&mut self, code: i32) {
        if let Some(event) = self.event.as_mut() {
            event.code = code;
        }
    }
}

impl Drop for PendingEvent<'_> {
    fn drop(&mut self) {
        if let Some(mut event) = self.event.take() {
            event.duration = self.started.elapsed();
            self.sink.commit(event);
        }
    }
}
