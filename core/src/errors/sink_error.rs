use std::io;

use miette::Diagnostic;
use thiserror::Error;

/// A text sink rejected a write during a dump.
///
/// Propagated out of `dump_to` and `print_stack_trace` so a failed dump is
/// observable rather than silently truncated.
#[derive(Debug, Error, Diagnostic)]
#[error("sink write failed: {source}")]
#[diagnostic(help("the dump stopped at the failed write; nothing was retried"))]
pub struct SinkError {
    #[from]
    pub source: io::Error,
}

impl SinkError {
    /// Builds a `SinkError` for sinks that are not backed by `std::io`.
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            source: io::Error::other(message.into()),
        }
    }
}
