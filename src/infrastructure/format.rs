//! Rendering of warning lines.
//!
//! Two mutually exclusive layouts over the same semantic fields (namespace,
//! the literal "deprecated" marker, message, call-site reference):
//!
//! - color mode, for interactive terminals: ANSI-colored segments, no
//!   timestamp
//! - plain mode: no escape sequences, a human-readable UTC timestamp
//!   prepended
//!
//! The result is always a single terminated chunk — multi-line when a stack
//! trace is appended — so one sink write covers the whole warning.

use crate::domain::frame::CallFrame;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// ANSI escape codes for color-mode segments.
mod ansi {
    /// Bold cyan for the namespace.
    pub const NAMESPACE: &str = "\x1b[36;1m";
    /// Bold yellow for the "deprecated" marker.
    pub const MARKER: &str = "\x1b[33;1m";
    /// Bright black for the call-site reference.
    pub const LOCATION: &str = "\x1b[90m";
    pub const RESET: &str = "\x1b[0m";
}

/// Timestamp layout for plain mode: weekday, day, month, 4-digit year,
/// HH:MM:SS, timezone abbreviation.
const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Per-emission rendering inputs beyond the semantic fields.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Whether the sink reported color capability.
    pub color: bool,
    /// Emission time; set only in plain mode.
    pub timestamp: Option<DateTime<Utc>>,
    /// Full caller stack, when traced emission is enabled.
    pub trace: Option<Vec<CallFrame>>,
}

/// Render one warning chunk.
pub fn render(namespace: &str, message: &str, frame: &CallFrame, options: &RenderOptions) -> String {
    let site = frame.site();
    let mut out = String::new();

    if options.color {
        let _ = write!(
            out,
            "{}{}{} {}deprecated{} {} {}at {}{}",
            ansi::NAMESPACE,
            namespace,
            ansi::RESET,
            ansi::MARKER,
            ansi::RESET,
            message,
            ansi::LOCATION,
            site,
            ansi::RESET,
        );
    } else {
        if let Some(timestamp) = options.timestamp {
            let _ = write!(out, "{} ", timestamp.format(TIMESTAMP_FORMAT));
        }
        let _ = write!(out, "{} deprecated {} at {}", namespace, message, site);
    }

    if let Some(trace) = &options.trace {
        for trace_frame in trace {
            let _ = write!(
                out,
                "\n    at {} ({})",
                trace_frame.name_or_anonymous(),
                trace_frame.site()
            );
        }
    }

    out.push('\n');
    out
}
