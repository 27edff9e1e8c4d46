//! Output sink for `print`, `cat` and auto-printing.
//!
//! The console writes to stdout; the capture buffer collects text for tests
//! and embedders; the silent sink discards everything.

use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Writes to the process's stdout.
///
/// Write failures (a closed pipe, for instance) are ignored: console output
/// is best effort and must not abort evaluation.
#[derive(Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn write_line(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{text}");
    }

    /// Write without a trailing newline and flush, so `cat` output shows up
    /// before the next prompt.
    pub fn write(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

/// Collects output in memory.
#[derive(Default)]
pub struct CaptureSink {
    buffer: Mutex<String>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_line(&self, text: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(text);
        buf.push('\n');
    }

    pub fn write(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Everything written so far, leaving the buffer empty.
    pub fn take_output(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }
}

/// Output destination, dispatched by enum rather than trait object.
pub enum PrintHandler {
    Console(ConsoleSink),
    Capture(CaptureSink),
    Silent,
}

impl PrintHandler {
    /// Write `text` followed by a newline.
    pub fn write_line(&self, text: &str) {
        match self {
            Self::Console(sink) => sink.write_line(text),
            Self::Capture(sink) => sink.write_line(text),
            Self::Silent => {}
        }
    }

    pub fn write(&self, text: &str) {
        match self {
            Self::Console(sink) => sink.write(text),
            Self::Capture(sink) => sink.write(text),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for sinks that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Capture(sink) => sink.output(),
            Self::Console(_) | Self::Silent => String::new(),
        }
    }

    /// Captured output, draining the buffer.
    pub fn take_output(&self) -> String {
        match self {
            Self::Capture(sink) => sink.take_output(),
            Self::Console(_) | Self::Silent => String::new(),
        }
    }
}

/// Print handler shared between the evaluator and its embedder.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn console_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Console(ConsoleSink))
}

pub fn capture_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Capture(CaptureSink::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
