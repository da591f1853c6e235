use std::cell::RefCell;
use std::marker::PhantomData;

use super::frame_table::{self, FrameToken};

/// One interpreter-level call, as recorded by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallFrame {
    pub function_name: String,
    pub file: String,
    pub line: usize,
}

impl CallFrame {
    pub fn new(function_name: impl Into<String>, file: impl Into<String>, line: usize) -> Self {
        Self {
            function_name: function_name.into(),
            file: file.into(),
            line,
        }
    }
}

/// The managed call stack for one thread of execution.
///
/// The runtime pushes a frame on call entry and pops it on return; a
/// snapshot reverses the frames so the most recent call comes first.
#[derive(Debug, Default)]
pub struct CallStack {
    tokens: Vec<FrameToken>,
}

impl CallStack {
    pub fn push_frame(&mut self, frame: CallFrame) -> FrameToken {
        let token = frame_table::intern_frame(frame);
        self.tokens.push(token);
        token
    }

    pub fn pop_frame(&mut self) {
        self.tokens.pop();
    }

    pub fn depth(&self) -> usize {
        self.tokens.len()
    }

    pub fn snapshot(&self) -> Vec<FrameToken> {
        self.tokens.iter().rev().copied().collect()
    }
}

thread_local! {
    static ACTIVE: RefCell<CallStack> = RefCell::new(CallStack::default());
}

/// Records entry into a managed call on the current thread.
///
/// The returned guard pops the frame when dropped, so the active stack stays
/// balanced across early returns and unwinds.
#[must_use = "dropping the guard immediately pops the frame again"]
pub fn enter_frame(frame: CallFrame) -> FrameGuard {
    ACTIVE.with(|stack| {
        stack.borrow_mut().push_frame(frame);
    });
    FrameGuard {
        _not_send: PhantomData,
    }
}

pub(crate) fn snapshot_current_thread() -> Vec<FrameToken> {
    ACTIVE.with(|stack| stack.borrow().snapshot())
}

/// RAII guard for one active call frame.
pub struct FrameGuard {
    // Frames are per-thread; the guard must drop on the thread that pushed.
    _not_send: PhantomData<*const ()>,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        ACTIVE.with(|stack| {
            stack.borrow_mut().pop_frame();
        });
    }
}
