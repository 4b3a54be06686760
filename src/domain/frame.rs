//! Call frame values captured from the runtime stack.
//!
//! A [`CallFrame`] is produced fresh for every capture and never mutated
//! afterwards. Frames from dynamically generated code (no source file on
//! disk) carry the `synthetic` flag and render with an `<anonymous>` tag.

use std::fmt;

/// A single frame of the call stack at a capture point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallFrame {
    /// Source file path, empty when unresolvable.
    pub file: String,
    /// 1-based source line, 0 when unknown.
    pub line: u32,
    /// 1-based source column, 0 when unknown.
    pub column: u32,
    /// Function or method name, `None` for unresolved symbols.
    pub display_name: Option<String>,
    /// True for frames from dynamically generated code with no file on disk.
    pub synthetic: bool,
}

impl CallFrame {
    /// Create a frame with a resolved source location.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            display_name: None,
            synthetic: false,
        }
    }

    /// Attach a display name (function or method path).
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Mark the frame as originating from generated code.
    pub fn into_synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// The degraded frame used when stack information is unavailable.
    ///
    /// Warning delivery must not depend on a successful capture, so the
    /// empty frame is a valid, renderable value rather than an error.
    pub fn unknown() -> Self {
        Self {
            file: String::new(),
            line: 0,
            column: 0,
            display_name: None,
            synthetic: false,
        }
    }

    /// Whether this frame carries no usable location.
    pub fn is_unknown(&self) -> bool {
        self.file.is_empty() && self.line == 0 && self.column == 0
    }

    /// Best-effort name for display, `<anonymous>` when none resolved.
    pub fn name_or_anonymous(&self) -> &str {
        self.display_name.as_deref().unwrap_or("<anonymous>")
    }

    /// Render the call-site reference for this frame.
    ///
    /// - resolved frames: `file:line:column`
    /// - synthetic frames: `<anonymous>:line:column (file)`, keeping the
    ///   enclosing file visible when it is known
    /// - unknown frames: `<unknown location>`
    pub fn site(&self) -> String {
        if self.is_unknown() {
            return "<unknown location>".to_string();
        }
        if self.synthetic {
            if self.file.is_empty() {
                format!("<anonymous>:{}:{}", self.line, self.column)
            } else {
                format!("<anonymous>:{}:{} ({})", self.line, self.column, self.file)
            }
        } else {
            format!("{}:{}:{}", self.file, self.line, self.column)
        }
    }
}

impl fmt::Display for CallFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name_or_anonymous(), self.site())
    }
}

/// A fixed source location, recorded at mark-deprecated time.
///
/// Unlike [`CallFrame`] this is not captured from the live stack; it names
/// where a deprecated function was defined, for the anonymous-message tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceSite {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceSite {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
