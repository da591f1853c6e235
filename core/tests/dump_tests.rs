use std::sync::{Arc, Mutex};

use faultline::errors::SinkError;
use faultline::sink::TextSink;
use faultline::{CallFrame, Throwable, WriteSink, enter_frame};

struct FailingSink {
    writes_before_failure: usize,
}

impl TextSink for FailingSink {
    fn write_text(&mut self, _text: &str) -> Result<(), SinkError> {
        if self.writes_before_failure == 0 {
            return Err(SinkError::other("sink closed"));
        }
        self.writes_before_failure -= 1;
        Ok(())
    }
}

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<String>>);

impl TextSink for SharedSink {
    fn write_text(&mut self, text: &str) -> Result<(), SinkError> {
        self.0.lock().expect("sink lock").push_str(text);
        Ok(())
    }
}

#[test]
fn dump_without_cause_is_header_plus_frames() {
    let throwable;
    {
        let _outer = enter_frame(CallFrame::new("outer", "main.js", 9));
        let _inner = enter_frame(CallFrame::new("inner", "main.js", 3));
        throwable = Throwable::builder()
            .type_name("example.IOError")
            .message("disk full")
            .build();
    }

    let expected =
        "example.IOError: disk full\n        at inner(main.js:3)\n        at outer(main.js:9)\n";
    assert_eq!(throwable.dump_to_string(), expected);
}

#[test]
fn dump_renders_a_two_level_cause_chain() {
    let root = {
        let _write = enter_frame(CallFrame::new("writeBlock", "fs.js", 57));
        Arc::new(
            Throwable::builder()
                .type_name("example.Base")
                .message("boom")
                .build(),
        )
    };
    let outer = {
        let _copy = enter_frame(CallFrame::new("copyFile", "fs.js", 12));
        Throwable::builder()
            .type_name("example.IOError")
            .message("disk full")
            .cause(root)
            .build()
    };

    let expected = "example.IOError: disk full\n        at copyFile(fs.js:12)\nCaused by: example.Base: boom\n        at writeBlock(fs.js:57)\n";
    assert_eq!(faultline::dump(&outer), expected);
}

#[test]
fn derived_message_repeats_inside_the_caused_by_block() {
    let inner = Arc::new(
        Throwable::builder()
            .type_name("example.Base")
            .message("boom")
            .build(),
    );
    let outer = Throwable::from_cause(inner);

    // The cause-only constructor snapshots the cause's full display string,
    // so the header shows it once and the nested block repeats it.
    assert_eq!(
        outer.dump_to_string(),
        "Throwable: example.Base: boom\nCaused by: example.Base: boom\n"
    );
}

#[test]
fn self_referential_cause_terminates() {
    let throwable = Arc::new(
        Throwable::builder()
            .type_name("example.Loop")
            .message("round and round")
            .build(),
    );
    assert!(throwable.init_cause(Arc::clone(&throwable)).is_ok());

    assert_eq!(
        throwable.dump_to_string(),
        "example.Loop: round and round\nCaused by: [cycle detected: example.Loop: round and round]\n"
    );
}

#[test]
fn two_node_cycle_terminates() {
    let b = Arc::new(Throwable::builder().type_name("example.B").message("b").build());
    let a = Arc::new(
        Throwable::builder()
            .type_name("example.A")
            .message("a")
            .cause(Arc::clone(&b))
            .build(),
    );
    assert!(b.init_cause(Arc::clone(&a)).is_ok());

    assert_eq!(
        a.dump_to_string(),
        "example.A: a\nCaused by: example.B: b\nCaused by: [cycle detected: example.A: a]\n"
    );
}

#[test]
fn rejected_write_propagates_out_of_the_dump() {
    let throwable = Throwable::with_message("boom");
    let mut sink = FailingSink {
        writes_before_failure: 1,
    };
    let err = throwable
        .dump_to(&mut sink)
        .expect_err("second write fails");
    assert!(err.to_string().contains("sink closed"));
}

#[test]
fn write_sink_collects_the_dump_in_order() {
    let throwable = Throwable::builder()
        .type_name("example.IOError")
        .message("disk full")
        .build();

    let mut sink = WriteSink::new(Vec::new());
    throwable.dump_to(&mut sink).expect("dump to buffer");

    let written = String::from_utf8(sink.into_inner()).expect("utf8 dump");
    assert_eq!(written, "example.IOError: disk full\n");
}

#[test]
fn print_stack_trace_uses_the_installed_default_sink() {
    let sink = SharedSink::default();
    assert!(faultline::set_default_sink(Box::new(sink.clone())).is_ok());

    let throwable = Throwable::builder()
        .type_name("example.IOError")
        .message("disk full")
        .build();
    faultline::report(&throwable).expect("dump to default sink");

    let written = sink.0.lock().expect("sink lock").clone();
    assert!(written.starts_with("example.IOError: disk full\n"));
}
