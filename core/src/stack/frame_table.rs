use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use super::call_stack::CallFrame;

/// Opaque fixed-size identifier for one interned call frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub(crate) u64);

#[derive(Default)]
struct FrameTable {
    frames: Vec<CallFrame>,
    by_frame: HashMap<CallFrame, FrameToken>,
}

static TABLE: OnceLock<Mutex<FrameTable>> = OnceLock::new();

fn table() -> std::sync::MutexGuard<'static, FrameTable> {
    TABLE
        .get_or_init(|| Mutex::new(FrameTable::default()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interns a frame in the process-wide table, returning its token.
///
/// Identical frames share one token, so deep recursive stacks stay cheap to
/// snapshot. Interned frames are retained for the process lifetime; tokens
/// stay resolvable long after the frames they describe have returned.
pub fn intern_frame(frame: CallFrame) -> FrameToken {
    let mut table = table();
    if let Some(token) = table.by_frame.get(&frame) {
        return *token;
    }
    let token = FrameToken(table.frames.len() as u64);
    table.frames.push(frame.clone());
    table.by_frame.insert(frame, token);
    token
}

/// Resolves a token back to the frame it was interned for, if any.
pub fn resolve_frame(token: FrameToken) -> Option<CallFrame> {
    table().frames.get(token.0 as usize).cloned()
}
