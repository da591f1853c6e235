use std::process;
use std::sync::Arc;

use clap::Parser;
use owo_colors::OwoColorize;

use faultline::errors::FaultlineError;
use faultline::{CallFrame, Throwable, enter_frame};

#[derive(Parser)]
#[command(name = "faultline", about = "Demo driver for the faultline failure-reporting core")]
struct Cli {
    /// Number of simulated nested calls before the failure
    #[arg(long, default_value_t = 3)]
    depth: usize,
    /// Failure message for the outermost throwable
    #[arg(long, default_value = "disk full")]
    message: String,
    /// Skip the nested "Caused by:" chain
    #[arg(long)]
    no_cause: bool,
}

/// Walks a pretend call chain so the captured stack has one frame per level.
fn simulate_call(level: usize, cli: &Cli) -> Throwable {
    let _guard = enter_frame(CallFrame::new(
        format!("level{level}"),
        "demo.js",
        10 + level,
    ));
    if level + 1 < cli.depth {
        return simulate_call(level + 1, cli);
    }

    if cli.no_cause {
        return Throwable::builder()
            .type_name("demo.DiskError")
            .message(cli.message.clone())
            .build();
    }

    let root = {
        let _inner = enter_frame(CallFrame::new("writeBlock", "demo.js", 57));
        Arc::new(
            Throwable::builder()
                .type_name("demo.DeviceError")
                .message("device not ready")
                .build(),
        )
    };
    Throwable::builder()
        .type_name("demo.DiskError")
        .message(cli.message.clone())
        .cause(root)
        .build()
}

fn run(cli: &Cli) -> Result<(), FaultlineError> {
    let throwable = simulate_call(0, cli);
    throwable.print_stack_trace()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    eprintln!("{}", "uncaught failure:".red().bold());
    if let Err(err) = run(&cli) {
        eprintln!("{} {err}", "error:".red().bold());
    }
    process::exit(1);
}
