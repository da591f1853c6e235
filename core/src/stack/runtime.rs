use super::{RawStack, StackFormatter, StackSnapshotProvider};
use super::{call_stack, frame_table};
use crate::errors::CaptureError;

/// Placeholder line for a frame token the table cannot resolve.
pub const UNKNOWN_FRAME: &str = "<unknown frame>";

/// Default snapshot provider: captures the current thread's managed stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeStackProvider;

impl StackSnapshotProvider for RuntimeStackProvider {
    fn capture_stack(&self) -> Result<RawStack, CaptureError> {
        Ok(RawStack::from_tokens(call_stack::snapshot_current_thread()))
    }
}

/// Default formatter: resolves tokens through the frame table and renders
/// each frame as `name(file:line)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeStackFormatter;

impl StackFormatter for RuntimeStackFormatter {
    fn format_stack(&self, raw: &RawStack) -> Vec<String> {
        raw.tokens()
            .iter()
            .map(|token| match frame_table::resolve_frame(*token) {
                Some(frame) => format!("{}({}:{})", frame.function_name, frame.file, frame.line),
                None => UNKNOWN_FRAME.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{CallFrame, FrameToken, intern_frame};

    #[test]
    fn formats_resolvable_frames_as_name_file_line() {
        let token = intern_frame(CallFrame::new("readFile", "fs.js", 42));
        let raw = RawStack::from_tokens(vec![token]);
        let lines = RuntimeStackFormatter.format_stack(&raw);
        assert_eq!(lines, vec!["readFile(fs.js:42)".to_string()]);
    }

    #[test]
    fn unresolvable_frames_degrade_to_the_placeholder() {
        let known = intern_frame(CallFrame::new("known", "fs.js", 7));
        let raw = RawStack::from_tokens(vec![FrameToken(u64::MAX), known]);
        let lines = RuntimeStackFormatter.format_stack(&raw);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], UNKNOWN_FRAME);
        assert_eq!(lines[1], "known(fs.js:7)");
    }
}
