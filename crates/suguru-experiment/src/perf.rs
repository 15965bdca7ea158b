use std::time::Duration;

use suguru_model::SolveStatus;

/// Bookkeeping for one solve attempt, created once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSample {
    /// Number of hints imposed on this attempt.
    pub hint_count: usize,
    /// Wall-clock time spent in the solver.
    pub elapsed: Duration,
    /// Resident-memory growth across the solve in MiB, when the resource
    /// monitor produced both readings.
    pub memory_delta_mb: Option<f64>,
    /// Number of binary variables in the model.
    pub variable_count: usize,
    /// Number of constraints in the model.
    pub constraint_count: usize,
    /// Classified solver verdict.
    pub status: SolveStatus,
}

/// Ordered log of performance samples, one per solve attempt.
///
/// Owned by the puzzle session: appended to by the experiment runner and
/// cleared when a new puzzle is loaded.
#[derive(Debug, Clone, Default)]
pub struct PerformanceLog {
    samples: Vec<PerformanceSample>,
}

impl PerformanceLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample.
    pub fn record(&mut self, sample: PerformanceSample) {
        self.samples.push(sample);
    }

    /// All samples in append order.
    #[must_use]
    pub fn samples(&self) -> &[PerformanceSample] {
        &self.samples
    }

    /// Number of recorded samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the log holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Discards all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hint_count: usize) -> PerformanceSample {
        PerformanceSample {
            hint_count,
            elapsed: Duration::from_millis(5),
            memory_delta_mb: None,
            variable_count: 10,
            constraint_count: 20,
            status: SolveStatus::Feasible,
        }
    }

    #[test]
    fn test_log_preserves_append_order() {
        let mut log = PerformanceLog::new();
        log.record(sample(0));
        log.record(sample(1));
        log.record(sample(2));

        let hint_counts: Vec<_> = log.samples().iter().map(|s| s.hint_count).collect();
        assert_eq!(hint_counts, [0, 1, 2]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_clear_empties_the_log() {
        let mut log = PerformanceLog::new();
        log.record(sample(0));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }
}
