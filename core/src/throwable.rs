use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::errors::SinkError;
use crate::sink::{self, TextSink};
use crate::stack::{
    RawStack, RuntimeStackFormatter, RuntimeStackProvider, StackFormatter, StackSnapshotProvider,
};

const DEFAULT_TYPE_NAME: &str = "Throwable";
const FRAME_PREFIX: &str = "        at ";
const CAUSED_BY: &str = "Caused by: ";

/// The base value type for reportable failures in a managed runtime.
///
/// Captures the active call stack at construction, renders it lazily on
/// first access, and knows how to dump itself together with its cause chain.
/// Message, cause, and raw stack are fixed once construction returns (the
/// cause slot is write-once, see [`Throwable::init_cause`]).
pub struct Throwable {
    type_name: Cow<'static, str>,
    message: Option<String>,
    cause: OnceLock<Arc<Throwable>>,
    raw_stack: RawStack,
    formatter: Arc<dyn StackFormatter>,
    frames: OnceLock<Vec<String>>,
}

impl Throwable {
    /// A throwable with neither message nor cause.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self::builder().message(message).build()
    }

    /// A throwable whose message is the cause's display string, snapshotted
    /// at construction time.
    pub fn from_cause(cause: Arc<Throwable>) -> Self {
        Self::builder().cause(cause).build()
    }

    pub fn with_message_and_cause(message: impl Into<String>, cause: Arc<Throwable>) -> Self {
        Self::builder().message(message).cause(cause).build()
    }

    pub fn builder() -> ThrowableBuilder {
        ThrowableBuilder {
            type_name: Cow::Borrowed(DEFAULT_TYPE_NAME),
            message: None,
            cause: None,
            formatter: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> Option<&Arc<Throwable>> {
        self.cause.get()
    }

    /// The most specific runtime type name this value was built with.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn raw_stack(&self) -> &RawStack {
        &self.raw_stack
    }

    /// Attaches a cause to a throwable created before its cause was known.
    ///
    /// The cause slot is write-once; if a cause is already set the offered
    /// one is handed back. The message is not re-derived: message-from-cause
    /// is a construction-time snapshot only.
    pub fn init_cause(&self, cause: Arc<Throwable>) -> Result<(), Arc<Throwable>> {
        self.cause.set(cause)
    }

    /// The formatted stack trace, most recent frame first.
    ///
    /// The first call runs the formatter over the raw snapshot and caches
    /// the result; later calls return the cache untouched. Concurrent first
    /// calls may each format, but the sequences are content-equal and
    /// exactly one becomes the cache, so losing the race is harmless.
    pub fn stack_trace(&self) -> &[String] {
        if let Some(frames) = self.frames.get() {
            return frames;
        }
        let computed = self.formatter.format_stack(&self.raw_stack);
        let _ = self.frames.set(computed);
        self.frames.get().expect("frame cache populated above")
    }

    /// Dumps this throwable and its cause chain to the process-wide default
    /// sink. A rejected write propagates; nothing is retried or swallowed.
    pub fn print_stack_trace(&self) -> Result<(), SinkError> {
        sink::with_default_sink(|sink| self.dump_to(sink))
    }

    /// Renders the full dump into a String.
    pub fn dump_to_string(&self) -> String {
        let mut out = String::new();
        self.dump_to(&mut out)
            .expect("writing to a String cannot fail");
        out
    }

    /// Writes the dump: header line, one `"        at <frame>"` line per
    /// captured frame in capture order, then a `"Caused by: "` block per
    /// link of the cause chain, down to the root cause.
    pub fn dump_to(&self, sink: &mut dyn TextSink) -> Result<(), SinkError> {
        let mut visited: Vec<*const Throwable> = Vec::new();
        self.dump_chain(sink, &mut visited)
    }

    fn dump_chain(
        &self,
        sink: &mut dyn TextSink,
        visited: &mut Vec<*const Throwable>,
    ) -> Result<(), SinkError> {
        visited.push(self as *const Throwable);
        sink.write_text(&self.to_string())?;
        sink.write_text("\n")?;
        for frame in self.stack_trace() {
            sink.write_text(FRAME_PREFIX)?;
            sink.write_text(frame)?;
            sink.write_text("\n")?;
        }
        if let Some(cause) = self.cause() {
            sink.write_text(CAUSED_BY)?;
            // Cyclic chains are malformed input; cut them instead of looping.
            if visited.contains(&Arc::as_ptr(cause)) {
                sink.write_text(&format!("[cycle detected: {cause}]"))?;
                sink.write_text("\n")?;
            } else {
                cause.dump_chain(sink, visited)?;
            }
        }
        Ok(())
    }
}

impl Default for Throwable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Throwable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.type_name),
            None => write!(f, "{}", self.type_name),
        }
    }
}

impl fmt::Debug for Throwable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throwable")
            .field("type_name", &self.type_name)
            .field("message", &self.message)
            .field("cause", &self.cause.get().map(|cause| cause.to_string()))
            .field("raw_stack", &self.raw_stack)
            .finish_non_exhaustive()
    }
}

/// Assembles a throwable: type tag, message, cause, and the capture and
/// formatting capabilities. Concrete failure variants supply their most
/// specific name through [`ThrowableBuilder::type_name`].
pub struct ThrowableBuilder {
    type_name: Cow<'static, str>,
    message: Option<String>,
    cause: Option<Arc<Throwable>>,
    formatter: Option<Arc<dyn StackFormatter>>,
}

impl ThrowableBuilder {
    pub fn type_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.type_name = name.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn cause(mut self, cause: Arc<Throwable>) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn formatter(mut self, formatter: Arc<dyn StackFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Builds with the runtime's default snapshot provider.
    ///
    /// # Panics
    ///
    /// Panics if stack capture fails; there is no valid throwable without a
    /// captured stack.
    pub fn build(self) -> Throwable {
        self.build_with_provider(&RuntimeStackProvider)
    }

    /// Builds with an injected snapshot provider. Capture happens here,
    /// synchronously, before the value is returned.
    ///
    /// # Panics
    ///
    /// Panics if the provider fails; see [`ThrowableBuilder::build`].
    pub fn build_with_provider(self, provider: &dyn StackSnapshotProvider) -> Throwable {
        let raw_stack = match provider.capture_stack() {
            Ok(raw) => raw,
            Err(err) => panic!("throwable construction aborted: {err}"),
        };
        let message = self
            .message
            .or_else(|| self.cause.as_ref().map(|cause| cause.to_string()));
        let cause = OnceLock::new();
        if let Some(value) = self.cause {
            let _ = cause.set(value);
        }
        Throwable {
            type_name: self.type_name,
            message,
            cause,
            raw_stack,
            formatter: self
                .formatter
                .unwrap_or_else(|| Arc::new(RuntimeStackFormatter)),
            frames: OnceLock::new(),
        }
    }
}
