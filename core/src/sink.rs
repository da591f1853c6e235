use std::io::{self, Write};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::errors::SinkError;

/// Append-only text output consumed by the dump routine.
///
/// Writes must land in call order; there is no seeking and no flushing
/// contract beyond what the backing writer provides.
pub trait TextSink {
    fn write_text(&mut self, text: &str) -> Result<(), SinkError>;
}

impl TextSink for String {
    fn write_text(&mut self, text: &str) -> Result<(), SinkError> {
        self.push_str(text);
        Ok(())
    }
}

/// Adapts any `io::Write` into a `TextSink`.
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> TextSink for WriteSink<W> {
    fn write_text(&mut self, text: &str) -> Result<(), SinkError> {
        self.inner.write_all(text.as_bytes())?;
        Ok(())
    }
}

static DEFAULT_SINK: OnceLock<Mutex<Box<dyn TextSink + Send>>> = OnceLock::new();

/// Binds the process-wide default sink used by `print_stack_trace`.
///
/// The binding is write-once for the process lifetime. Returns the rejected
/// sink if a default has already been bound, including the implicit stdout
/// binding made by the first dump that ran without an explicit one.
pub fn set_default_sink(sink: Box<dyn TextSink + Send>) -> Result<(), Box<dyn TextSink + Send>> {
    DEFAULT_SINK
        .set(Mutex::new(sink))
        .map_err(|rejected| rejected.into_inner().unwrap_or_else(PoisonError::into_inner))
}

pub(crate) fn with_default_sink<R>(f: impl FnOnce(&mut dyn TextSink) -> R) -> R {
    let sink = DEFAULT_SINK.get_or_init(|| Mutex::new(Box::new(WriteSink::new(io::stdout()))));
    let mut guard = sink.lock().unwrap_or_else(PoisonError::into_inner);
    f(guard.as_mut())
}
