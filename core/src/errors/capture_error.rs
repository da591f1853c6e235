use miette::Diagnostic;
use thiserror::Error;

/// The stack snapshot primitive was unavailable or failed.
///
/// A throwable must not exist without a captured stack, so this error is
/// fatal for the construction that triggered it: `ThrowableBuilder::build`
/// panics instead of returning a half-built value.
#[derive(Debug, Error, Diagnostic)]
#[error("stack capture failed: {message}")]
#[diagnostic(help("stack capture is a construction-time requirement; check the snapshot provider"))]
pub struct CaptureError {
    pub message: String,
}

impl CaptureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
