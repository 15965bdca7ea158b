use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use log::{debug, info, warn};
use rand::Rng;
use suguru_core::{AreaIndex, Puzzle, Solution};
use suguru_model::{CspModel, SolveError, solve};

use crate::{PerformanceLog, PerformanceSample, ResourceMonitor, sample_hints};

/// Cooperative cancellation flag shared between a controller and the
/// experiment loop.
///
/// Single writer, single reader: the controller sets it, the loop polls it
/// at iteration boundaries. A solve already in flight is never interrupted,
/// so cancellation may be observed one iteration late.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Clears a previous cancellation request.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }
}

/// Lifecycle of one experiment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RunState {
    /// No run has started yet.
    #[display("idle")]
    Idle,
    /// The loop is executing.
    #[display("running")]
    Running,
    /// The loop ran to its terminal iteration.
    #[display("completed")]
    Completed,
    /// The loop observed a cancellation request.
    #[display("stopped")]
    Stopped,
    /// The solve aborted on an internal-consistency violation.
    #[display("failed")]
    Failed,
}

/// What to do when the puzzle has no solution with zero hints imposed.
///
/// An unhinted infeasibility means the puzzle itself is broken rather than
/// over-constrained by hints, so it is a distinct decision from the ordinary
/// early-exit rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroHintPolicy {
    /// Keep iterating; only a no-solution verdict at a positive hint count
    /// stops the loop.
    #[default]
    Continue,
    /// Stop the run at the zero-hint iteration.
    Stop,
}

/// Drives repeated sample → build → solve cycles over increasing hint
/// counts.
///
/// State machine: `Idle → Running → {Completed, Stopped, Failed}`. Each
/// iteration draws a fresh hint subset of the iteration's size, builds the
/// model, solves it, and appends one [`PerformanceSample`] regardless of
/// verdict. A no-solution verdict at a positive hint count ends the run:
/// the puzzle is deemed infeasible at that hint density.
#[derive(Debug)]
pub struct ExperimentRunner<M> {
    monitor: M,
    zero_hint_policy: ZeroHintPolicy,
    state: RunState,
}

impl<M: ResourceMonitor> ExperimentRunner<M> {
    /// Creates a runner with the given resource monitor and the default
    /// zero-hint policy.
    #[must_use]
    pub fn new(monitor: M) -> Self {
        Self {
            monitor,
            zero_hint_policy: ZeroHintPolicy::default(),
            state: RunState::Idle,
        }
    }

    /// Sets the zero-hint infeasibility policy.
    #[must_use]
    pub fn with_zero_hint_policy(mut self, policy: ZeroHintPolicy) -> Self {
        self.zero_hint_policy = policy;
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs the progressive loop for hint counts `0..=target_hints`
    /// (clamped to the puzzle's hint pool), appending one sample per
    /// iteration to `log`.
    ///
    /// The cancellation token is polled at the top of every iteration; a
    /// solve already in flight completes and is recorded before the request
    /// takes effect. Returns the most recently decoded solution, if any
    /// iteration produced one.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] and moves to [`RunState::Failed`] when a solve
    /// aborts on an internal-consistency violation. Ordinary infeasible or
    /// unknown verdicts are recorded outcomes, not errors.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        puzzle: &Puzzle,
        areas: &AreaIndex,
        target_hints: usize,
        rng: &mut R,
        token: &CancellationToken,
        log: &mut PerformanceLog,
    ) -> Result<Option<Solution>, SolveError> {
        self.state = RunState::Running;
        let all = puzzle.all_hints();
        let target = target_hints.min(all.len());
        info!(
            "starting progressive run: target {target} of {} hints",
            all.len()
        );

        let mut latest = None;
        for hint_count in 0..=target {
            if token.is_cancelled() {
                info!("run stopped before the {hint_count}-hint iteration");
                self.state = RunState::Stopped;
                return Ok(latest);
            }

            let hints = sample_hints(&all, hint_count, rng);
            let model = CspModel::build(puzzle, areas, &hints);

            let memory_before = self.monitor.resident_memory_bytes();
            let start = Instant::now();
            let result = solve(&model, areas);
            let elapsed = start.elapsed();
            let memory_after = self.monitor.resident_memory_bytes();

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!("run failed at {hint_count} hints: {err}");
                    self.state = RunState::Failed;
                    return Err(err);
                }
            };
            debug!(
                "hints={hint_count} status={} vars={} constraints={} elapsed={elapsed:?}",
                outcome.status,
                model.variable_count(),
                model.constraint_count(),
            );
            log.record(PerformanceSample {
                hint_count,
                elapsed,
                memory_delta_mb: memory_delta_mb(memory_before, memory_after),
                variable_count: model.variable_count(),
                constraint_count: model.constraint_count(),
                status: outcome.status,
            });

            match outcome.solution {
                Some(solution) => latest = Some(solution),
                None => {
                    if hint_count > 0 {
                        info!("no solution at {hint_count} hints; stopping the run");
                        break;
                    }
                    if self.zero_hint_policy == ZeroHintPolicy::Stop {
                        info!("no solution with zero hints; stopping per policy");
                        break;
                    }
                }
            }
        }

        self.state = RunState::Completed;
        Ok(latest)
    }
}

fn memory_delta_mb(before: Option<u64>, after: Option<u64>) -> Option<f64> {
    let (before, after) = (before?, after?);
    #[expect(clippy::cast_precision_loss)]
    let delta = after as f64 - before as f64;
    Some(delta / (1024.0 * 1024.0))
}
