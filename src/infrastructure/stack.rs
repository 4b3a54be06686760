//! Production stack provider built on the `backtrace` crate.

use crate::application::ports::StackProvider;
use crate::domain::frame::CallFrame;
use backtrace::{resolve_frame, trace};

/// Upper bound on collected frames per capture.
///
/// Deep stacks past this point never contain the caller frame the emitter
/// is after, and traced emission does not need more context than this.
const MAX_FRAMES: usize = 32;

/// Stack provider walking the live call stack.
///
/// Resolves each frame to file, line, column, and symbol name where debug
/// information allows. Frames that resolve to a symbol but to no source file
/// are tagged synthetic (generated code with nothing on disk). Capture never
/// fails; at worst the walk yields no resolvable frames and the caller
/// degrades to an unknown location.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceProvider;

impl BacktraceProvider {
    /// Create a new backtrace-based provider.
    pub fn new() -> Self {
        Self
    }
}

impl StackProvider for BacktraceProvider {
    fn capture_frames(&self, skip: usize) -> Vec<CallFrame> {
        let mut frames = Vec::new();
        let mut skip_remaining = skip;

        trace(|raw_frame| {
            if skip_remaining > 0 {
                skip_remaining -= 1;
                return true;
            }

            let mut file = String::new();
            let mut line = 0u32;
            let mut column = 0u32;
            let mut display_name = None;

            resolve_frame(raw_frame, |symbol| {
                // Keep the innermost resolution (first callback) for
                // inlined frames.
                if display_name.is_none() {
                    if let Some(name) = symbol.name() {
                        display_name = Some(name.to_string());
                    }
                }
                if file.is_empty() {
                    if let Some(path) = symbol.filename() {
                        file = path.display().to_string();
                    }
                    line = symbol.lineno().unwrap_or(0);
                    column = symbol.colno().unwrap_or(0);
                }
            });

            // A resolved symbol with no source file is generated code.
            let synthetic = file.is_empty() && display_name.is_some() && line != 0;

            let mut frame = CallFrame::new(file, line, column);
            if let Some(name) = display_name {
                frame = frame.with_display_name(name);
            }
            if synthetic {
                frame = frame.into_synthetic();
            }
            frames.push(frame);

            frames.len() < MAX_FRAMES
        });

        frames
    }
}
