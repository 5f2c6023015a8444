//! Pipeline simulator CLI.
//!
//! Single entry point for trace-driven simulation. It performs:
//! 1. **Argument parsing:** Positional `N S trace_file`, optional TOML config
//!    and pipeline-trace flag.
//! 2. **Trace loading:** The whole trace is read and validated before any
//!    cycle is simulated.
//! 3. **Reporting:** One line per retired instruction on stdout, followed by
//!    the configuration/results summary.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::{fs, process};

use tomasim_core::Config;
use tomasim_core::Simulator;
use tomasim_core::sim::loader;

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Trace-driven superscalar out-of-order pipeline simulator",
    long_about = "Simulates a Tomasulo-style dynamically scheduled pipeline over a decoded\ninstruction trace, reporting the cycle interval each instruction spent in\nevery pipeline stage.\n\nExamples:\n  tomasim 4 16 traces/gcc.txt\n  tomasim 2 8 traces/perl.txt --trace"
)]
struct Args {
    /// Superscalar bandwidth (N): per-cycle cap on each stage transition.
    n: usize,

    /// Scheduling queue capacity (S).
    s: usize,

    /// Instruction trace file (one `<pc> <op> <dst> <src1> <src2>` per line).
    trace_file: PathBuf,

    /// TOML configuration overriding execute latencies and trace options.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log per-stage pipeline activity to stderr.
    #[arg(long)]
    trace: bool,
}

fn main() {
    let args = Args::parse();

    if args.n == 0 || args.s == 0 {
        eprintln!("Error: N and S must be positive");
        process::exit(1);
    }

    let mut config = match args.config {
        Some(ref path) => {
            let content = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config {}: {}", path.display(), e);
                process::exit(1);
            });
            toml::from_str(&content).unwrap_or_else(|e| {
                eprintln!("Error parsing config {}: {}", path.display(), e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };
    config.pipeline.width = args.n;
    config.pipeline.sched_queue_size = args.s;
    config.general.trace_pipeline |= args.trace;

    let program = loader::read_trace(&args.trace_file).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let mut sim = Simulator::new(&config, program);
    sim.run();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for instr in sim.retired() {
        writeln!(out, "{}", instr).expect("write to stdout");
    }
    sim.stats()
        .write_summary(&mut out, args.n, args.s)
        .expect("write to stdout");
    out.flush().ok();

    if config.general.trace_pipeline {
        sim.stats().print_detailed();
    }
}
