//! MU-MIPS pipeline simulator CLI.
//!
//! This binary loads a program file and drives the simulator. It performs:
//! 1. **Setup:** Parses arguments, installs the tracing subscriber, reads the optional
//!    JSON configuration, and loads the program. Any failure exits non-zero.
//! 2. **Interactive shell:** Reads `sim`, `run`, `rdump`, `mdump`, and the other shell
//!    commands from stdin until `quit` or end of input.
//! 3. **Batch run:** With `--batch`, runs to completion and prints registers and stats.

mod shell;

use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mips_pipe_core::config::Config;
use mips_pipe_core::sim::loader;
use mips_pipe_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "mu-mips",
    author,
    version,
    about = "Cycle-accurate five-stage MIPS pipeline simulator",
    long_about = "Load a program of hexadecimal instruction words at the text base and drive the pipeline from an interactive shell.\n\nExamples:\n  mu-mips program.in\n  mu-mips --trace program.in\n  mu-mips --config map.json --batch program.in"
)]
struct Cli {
    /// Program file: whitespace-separated 32-bit hexadecimal words.
    program: PathBuf,

    /// JSON configuration file (memory map, text base, tracing).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every pipeline stage (sets the default log filter to `trace`).
    #[arg(long)]
    trace: bool,

    /// Run to completion, dump registers and statistics, and exit.
    #[arg(long)]
    batch: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    let mut config = match &cli.config {
        Some(path) => load_config(path),
        None => Config::default(),
    };
    if cli.trace {
        config.general.trace_instructions = true;
    }

    let program = loader::load_program(&cli.program).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let words = program.len();

    let mut sim = Simulator::new(config, program).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    println!("Program loaded into memory.\n{words} words written into memory.\n");

    if cli.batch {
        let _ = sim.run_to_completion();
        print!("{}", sim.register_dump());
        if let Some(reason) = sim.halt_reason() {
            println!("Halted: {reason}");
        }
        sim.stats().print();
        let code = i32::from(sim.diagnostics().iter().any(|d| d.kind.is_fatal()));
        process::exit(code);
    }

    shell::run(&mut sim);
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` selects the filter; `--trace` overrides it with `trace`.
fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Reads and validates a JSON configuration file, exiting on failure.
fn load_config(path: &PathBuf) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {e}", path.display());
        process::exit(1);
    });
    Config::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    })
}
