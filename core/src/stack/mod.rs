mod call_stack;
mod frame_table;
mod runtime;

pub use call_stack::{CallFrame, CallStack, FrameGuard, enter_frame};
pub use frame_table::{FrameToken, intern_frame, resolve_frame};
pub use runtime::{RuntimeStackFormatter, RuntimeStackProvider, UNKNOWN_FRAME};

use crate::errors::CaptureError;

/// An opaque snapshot of the call stack at one instant.
///
/// Holds a contiguous owned buffer of frame tokens in capture order, most
/// recent frame first. The buffer is filled exactly once, at capture, and is
/// never mutated; turning tokens back into frame data is the formatter's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStack {
    tokens: Box<[FrameToken]>,
}

impl RawStack {
    pub fn from_tokens(tokens: Vec<FrameToken>) -> Self {
        Self {
            tokens: tokens.into_boxed_slice(),
        }
    }

    pub fn tokens(&self) -> &[FrameToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Capability to snapshot the active call stack.
///
/// Injected at construction so the core stays testable with deterministic
/// fake providers.
pub trait StackSnapshotProvider {
    fn capture_stack(&self) -> Result<RawStack, CaptureError>;
}

/// Capability to render a raw snapshot into human-readable frame lines.
///
/// One line per frame, each line independent of the others. Formatting never
/// fails as a whole; frames that cannot be resolved degrade to a fixed
/// placeholder line.
pub trait StackFormatter: Send + Sync {
    fn format_stack(&self, raw: &RawStack) -> Vec<String>;
}
