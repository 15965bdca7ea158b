//! Command-line host for progressive Suguru experiments.
//!
//! Loads a puzzle file, runs the progressive hint-density loop, and prints
//! the performance table plus the final grid.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin suguru -- puzzle.in
//! ```
//!
//! Reproducible hint draws and a bounded hint count:
//!
//! ```sh
//! cargo run --bin suguru -- puzzle.in --seed 7 --target-hints 10
//! ```
//!
//! The puzzle file format is one `rows cols` header line, `rows` lines of
//! reference-grid values (0 = blank), then `rows` lines of region ids.

use std::{path::PathBuf, process::ExitCode, thread};

use clap::{Parser, ValueEnum};
use log::error;
use suguru_core::{Cell, Solution};
use suguru_experiment::{PerformanceSample, ProcfsMonitor, Session, ZeroHintPolicy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ZeroHintMode {
    /// Tolerate an unsolvable zero-hint iteration and keep going.
    Continue,
    /// Stop the run if the puzzle is unsolvable even without hints.
    Stop,
}

impl From<ZeroHintMode> for ZeroHintPolicy {
    fn from(mode: ZeroHintMode) -> Self {
        match mode {
            ZeroHintMode::Continue => ZeroHintPolicy::Continue,
            ZeroHintMode::Stop => ZeroHintPolicy::Stop,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle file to load.
    puzzle: PathBuf,

    /// Highest hint count to solve with (default: the whole hint pool).
    #[arg(long, value_name = "COUNT")]
    target_hints: Option<usize>,

    /// Seed for reproducible hint draws.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Behavior when the puzzle has no solution with zero hints.
    #[arg(long, value_name = "MODE", default_value = "continue")]
    zero_hint_policy: ZeroHintMode,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let mut session = match args.seed {
        Some(seed) => Session::with_seed(ProcfsMonitor, seed),
        None => Session::new(ProcfsMonitor),
    }
    .with_zero_hint_policy(args.zero_hint_policy.into());

    if let Err(err) = session.load_puzzle(&args.puzzle) {
        error!("load failed: {err}");
        eprintln!("{err}");
        return ExitCode::from(2);
    }

    let target = args.target_hints.unwrap_or_else(|| session.hint_pool());

    // The solve loop is synchronous; keep it off the main thread the way an
    // interactive host would, and wait for the worker to finish.
    let worker = thread::spawn(move || {
        let solution = session.solve_progressively(target);
        (session, solution)
    });
    let Ok((session, solution)) = worker.join() else {
        eprintln!("solver worker panicked");
        return ExitCode::FAILURE;
    };
    let solution = match solution {
        Ok(solution) => solution,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    print_performance(session.performance_log());
    println!();
    match solution {
        Some(solution) => {
            print_solution(&solution);
            ExitCode::SUCCESS
        }
        None => {
            println!("No solution at any attempted hint count.");
            ExitCode::FAILURE
        }
    }
}

fn print_performance(samples: &[PerformanceSample]) {
    println!("hints  status      time(s)   mem(MiB)  vars  constraints");
    for sample in samples {
        let memory = sample
            .memory_delta_mb
            .map_or_else(|| "-".to_owned(), |mb| format!("{mb:.2}"));
        println!(
            "{:>5}  {:<10}  {:>7.3}  {:>8}  {:>4}  {:>11}",
            sample.hint_count,
            sample.status.to_string(),
            sample.elapsed.as_secs_f64(),
            memory,
            sample.variable_count,
            sample.constraint_count,
        );
    }
}

fn print_solution(solution: &Solution) {
    for row in 0..solution.rows() {
        let line: Vec<String> = (0..solution.cols())
            .map(|col| solution.label(Cell::new(row, col)).to_string())
            .collect();
        println!("{}", line.join(" "));
    }
}
