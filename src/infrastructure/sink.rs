//! Production diagnostic sink writing to standard error.

use crate::application::ports::DiagnosticSink;
use std::io::{self, IsTerminal, Write};

/// Diagnostic sink over the process's standard error stream.
///
/// Color capability is an explicit query: stderr must be an interactive
/// terminal and `NO_COLOR` must not be set. Each chunk is written with a
/// single locked `write_all` so concurrent writers cannot interleave inside
/// one warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl StderrSink {
    /// Create a new stderr sink.
    pub fn new() -> Self {
        Self
    }
}

/// Check if colors are disabled via the NO_COLOR convention.
fn colors_disabled() -> bool {
    std::env::var("NO_COLOR")
        .map(|v| !v.is_empty() && v != "0")
        .unwrap_or(false)
}

impl DiagnosticSink for StderrSink {
    fn color_capable(&self) -> bool {
        io::stderr().is_terminal() && !colors_disabled()
    }

    fn write_chunk(&self, chunk: &str) -> io::Result<()> {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        handle.write_all(chunk.as_bytes())?;
        handle.flush()
    }
}
