pub mod errors;
pub mod sink;
pub mod stack;
pub mod throwable;

pub use sink::{TextSink, WriteSink, set_default_sink};
pub use stack::{
    CallFrame, CallStack, FrameGuard, RawStack, StackFormatter, StackSnapshotProvider, enter_frame,
};
pub use throwable::{Throwable, ThrowableBuilder};

use errors::SinkError;

/// Convenience function to render a failure and its cause chain into a String.
pub fn dump(throwable: &Throwable) -> String {
    throwable.dump_to_string()
}

/// Convenience function to dump a failure to the process-wide default sink.
pub fn report(throwable: &Throwable) -> Result<(), SinkError> {
    throwable.print_stack_trace()
}
