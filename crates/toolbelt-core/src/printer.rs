//! Shared output streams for tool runs
//!
//! A [`ToolPrinter`] wraps the normal and error writers that tool output is
//! forwarded to, plus a severity threshold for the runner's own messages.
//! Writers are shared behind `Arc<Mutex<_>>` so that one printer can serve
//! tools running on several threads.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing::level_filters::LevelFilter;

/// A writer that can be shared between threads.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Output and error writers with a message threshold.
#[derive(Clone)]
pub struct ToolPrinter {
    out: SharedWriter,
    err: SharedWriter,
    threshold: LevelFilter,
}

impl fmt::Debug for ToolPrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolPrinter")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl ToolPrinter {
    /// Create a printer over two owned writers with an `INFO` threshold.
    pub fn new(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        Self::from_shared(Arc::new(Mutex::new(out)), Arc::new(Mutex::new(err)))
    }

    /// Create a printer over already shared writers.
    pub fn from_shared(out: SharedWriter, err: SharedWriter) -> Self {
        Self {
            out,
            err,
            threshold: LevelFilter::INFO,
        }
    }

    /// Printer writing to the process' standard output and error streams.
    pub fn system() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    /// Printer writing into two in-memory buffers, returned alongside it.
    pub fn buffered() -> (Self, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::new();
        let err = SharedBuffer::new();
        (Self::new(out.clone(), err.clone()), out, err)
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: LevelFilter) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> LevelFilter {
        self.threshold
    }

    pub fn out(&self) -> &SharedWriter {
        &self.out
    }

    pub fn err(&self) -> &SharedWriter {
        &self.err
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level <= self.threshold
    }

    pub fn debug(&self, message: &str) {
        self.println(Level::DEBUG, message);
    }

    /// Print `message` if `level` passes the threshold.
    ///
    /// `WARN` and `ERROR` messages go to the error writer, everything else
    /// to the normal writer.
    pub fn println(&self, level: Level, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let writer = if level <= Level::WARN {
            &self.err
        } else {
            &self.out
        };
        if let Err(e) = write_line(writer, message) {
            tracing::warn!(error = %e, "printer could not write message");
        }
    }
}

fn write_line(writer: &SharedWriter, message: &str) -> io::Result<()> {
    let mut writer = writer
        .lock()
        .map_err(|_| io::Error::other("writer lock poisoned"))?;
    writeln!(writer, "{message}")?;
    writer.flush()
}

/// In-memory writer whose contents can be read from any clone.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        match self.bytes.lock() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| io::Error::other("buffer lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Tee writer handed to providers: every byte is kept in a private buffer
/// and forwarded to the printer's shared writer.
///
/// Forwarding failures never fail the provider's write; they are remembered
/// and reported once the invocation finishes.
pub(crate) struct Capture {
    sink: SharedWriter,
    buffer: Vec<u8>,
    troubled: bool,
}

impl Capture {
    pub(crate) fn new(sink: &SharedWriter) -> Self {
        Self {
            sink: Arc::clone(sink),
            buffer: Vec::new(),
            troubled: false,
        }
    }

    pub(crate) fn troubled(&self) -> bool {
        self.troubled
    }

    /// Captured text with surrounding whitespace removed.
    pub(crate) fn into_text(self) -> String {
        String::from_utf8_lossy(&self.buffer).trim().to_string()
    }

    fn forward(&self, buf: &[u8]) -> io::Result<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::other("writer lock poisoned"))?;
        sink.write_all(buf)
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        if self.forward(buf).is_err() {
            self.troubled = true;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let flushed = self
            .sink
            .lock()
            .map_err(|_| io::Error::other("writer lock poisoned"))
            .and_then(|mut sink| sink.flush());
        if flushed.is_err() {
            self.troubled = true;
        }
        Ok(())
    }
}
