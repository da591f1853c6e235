mod capture_error;
mod sink_error;

pub use capture_error::CaptureError;
pub use sink_error::SinkError;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type wrapping all faultline errors.
#[derive(Debug, Error, Diagnostic)]
pub enum FaultlineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sink(#[from] SinkError),
}
