//! Progressive hint-density experiments over Suguru puzzles.
//!
//! The experiment repeatedly re-solves one puzzle with an increasing number
//! of pre-filled hints to study how solving difficulty scales with hint
//! density: for each hint count a reproducible random hint subset is drawn,
//! translated into a binary constraint model, handed to the external
//! feasibility solver, and recorded as one performance sample.
//!
//! [`ExperimentRunner`] owns the loop and its state machine;
//! [`Session`] wraps it in the command surface a host application drives
//! (load, clamp hint count, solve progressively, stop, inspect the log).

mod monitor;
mod perf;
mod runner;
mod sampler;
mod session;

pub use self::{
    monitor::{NoopMonitor, ProcfsMonitor, ResourceMonitor},
    perf::{PerformanceLog, PerformanceSample},
    runner::{CancellationToken, ExperimentRunner, RunState, ZeroHintPolicy},
    sampler::sample_hints,
    session::{LoadError, Session, SessionError},
};
