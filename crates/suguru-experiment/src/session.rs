use std::{fs, path::Path};

use log::info;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;
use suguru_core::{AreaIndex, ParseError, Puzzle, Solution};
use suguru_model::SolveError;

use crate::{
    CancellationToken, ExperimentRunner, PerformanceLog, PerformanceSample, ResourceMonitor,
    RunState, ZeroHintPolicy,
};

/// Errors from loading a puzzle file.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    /// Reading the file failed.
    #[display("failed to read puzzle file: {_0}")]
    Io(#[from] std::io::Error),
    /// The file contents are not a valid puzzle.
    #[display("failed to parse puzzle: {_0}")]
    Parse(#[from] ParseError),
}

/// Errors from running the progressive solve.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    /// No puzzle has been loaded yet.
    #[display("no puzzle loaded")]
    NoPuzzle,
    /// The solve aborted on an internal-consistency violation.
    #[display("solve aborted: {_0}")]
    Solve(#[from] SolveError),
}

#[derive(Debug)]
struct LoadedPuzzle {
    puzzle: Puzzle,
    areas: AreaIndex,
    hint_pool: usize,
}

/// The command surface a host application drives.
///
/// Owns the current puzzle, its area index, the performance log, and the
/// cancellation token. Loading a new puzzle replaces the session state
/// wholesale and clears the log; a failed load leaves everything untouched.
///
/// The progressive solve itself is synchronous; a host that wants to stay
/// responsive runs [`Session::solve_progressively`] on a worker thread and
/// cancels it through a clone of [`Session::cancellation_token`].
#[derive(Debug)]
pub struct Session<M> {
    runner: ExperimentRunner<M>,
    token: CancellationToken,
    rng: Pcg64Mcg,
    loaded: Option<LoadedPuzzle>,
    hint_count: usize,
    log: PerformanceLog,
}

impl<M: ResourceMonitor> Session<M> {
    /// Creates a session with an OS-seeded random source.
    #[must_use]
    pub fn new(monitor: M) -> Self {
        Self::with_rng(monitor, Pcg64Mcg::from_rng(&mut rand::rng()))
    }

    /// Creates a session whose hint draws are reproducible from `seed`.
    #[must_use]
    pub fn with_seed(monitor: M, seed: u64) -> Self {
        Self::with_rng(monitor, Pcg64Mcg::seed_from_u64(seed))
    }

    fn with_rng(monitor: M, rng: Pcg64Mcg) -> Self {
        Self {
            runner: ExperimentRunner::new(monitor),
            token: CancellationToken::new(),
            rng,
            loaded: None,
            hint_count: 0,
            log: PerformanceLog::new(),
        }
    }

    /// Sets the zero-hint infeasibility policy for subsequent runs.
    #[must_use]
    pub fn with_zero_hint_policy(mut self, policy: ZeroHintPolicy) -> Self {
        self.runner = self.runner.with_zero_hint_policy(policy);
        self
    }

    /// Loads and installs the puzzle at `path`, clearing the performance
    /// log and resetting the hint count.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file cannot be read or parsed; the
    /// previously loaded puzzle (if any) stays installed.
    pub fn load_puzzle(&mut self, path: &Path) -> Result<(), LoadError> {
        let text = fs::read_to_string(path)?;
        let puzzle = Puzzle::parse(&text)?;
        let areas = AreaIndex::new(&puzzle);
        let hint_pool = puzzle.all_hints().len();
        info!(
            "loaded {}x{} puzzle with {hint_pool} hints from {}",
            puzzle.rows(),
            puzzle.cols(),
            path.display()
        );
        self.loaded = Some(LoadedPuzzle {
            puzzle,
            areas,
            hint_pool,
        });
        self.hint_count = 0;
        self.log.clear();
        self.token.reset();
        Ok(())
    }

    /// Sets the requested hint count, silently clamped to the loaded
    /// puzzle's hint pool, and returns the effective value.
    pub fn set_hint_count(&mut self, count: usize) -> usize {
        let pool = self.loaded.as_ref().map_or(0, |loaded| loaded.hint_pool);
        self.hint_count = count.min(pool);
        self.hint_count
    }

    /// The currently requested hint count.
    #[must_use]
    pub fn hint_count(&self) -> usize {
        self.hint_count
    }

    /// Runs the full progressive loop up to `target_hints` (clamped to the
    /// hint pool), populating the performance log as a side effect.
    ///
    /// A fresh run clears any previous cancellation request first; use
    /// [`Session::stop_solving`] (or a token clone on another thread) to
    /// interrupt it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoPuzzle`] when nothing is loaded, or
    /// [`SessionError::Solve`] when the solve aborts on an
    /// internal-consistency violation.
    pub fn solve_progressively(
        &mut self,
        target_hints: usize,
    ) -> Result<Option<Solution>, SessionError> {
        let loaded = self.loaded.as_ref().ok_or(SessionError::NoPuzzle)?;
        self.token.reset();
        let solution = self.runner.run(
            &loaded.puzzle,
            &loaded.areas,
            target_hints,
            &mut self.rng,
            &self.token,
            &mut self.log,
        )?;
        Ok(solution)
    }

    /// Requests cancellation of a run in progress.
    pub fn stop_solving(&self) {
        self.token.cancel();
    }

    /// A clone of the cancellation token, for controllers on other threads.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Samples recorded so far, in append order.
    #[must_use]
    pub fn performance_log(&self) -> &[PerformanceSample] {
        self.log.samples()
    }

    /// The loaded puzzle, if any.
    #[must_use]
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.loaded.as_ref().map(|loaded| &loaded.puzzle)
    }

    /// The loaded puzzle's area index, if any.
    #[must_use]
    pub fn areas(&self) -> Option<&AreaIndex> {
        self.loaded.as_ref().map(|loaded| &loaded.areas)
    }

    /// Size of the loaded puzzle's hint pool, or 0 when nothing is loaded.
    #[must_use]
    pub fn hint_pool(&self) -> usize {
        self.loaded.as_ref().map_or(0, |loaded| loaded.hint_pool)
    }

    /// Lifecycle state of the most recent run.
    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.runner.state()
    }
}
