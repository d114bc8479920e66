// Result aggregation and live progress for a bulk run

use crate::domain::CallResult;
use serde::Serialize;

/// Counters derived from the results recorded so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub completed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub pending: usize,
    pub percent: u8,
}

impl ProgressSnapshot {
    /// Snapshot before any call has finished
    pub fn start(total: usize) -> Self {
        Self {
            total,
            pending: total,
            ..Default::default()
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

/// Append-only log of call results for one run
///
/// Results are kept in completion order; nothing is ever updated or removed.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: usize,
    results: Vec<CallResult>,
    succeeded: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            results: Vec::with_capacity(total),
            succeeded: 0,
        }
    }

    /// Append one result and return the refreshed counters
    pub fn record(&mut self, result: CallResult) -> ProgressSnapshot {
        if result.ok {
            self.succeeded += 1;
        }
        self.results.push(result);
        self.snapshot()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let completed = self.results.len();
        ProgressSnapshot {
            total: self.total,
            completed,
            succeeded: self.succeeded,
            failed: completed - self.succeeded,
            pending: self.total.saturating_sub(completed),
            percent: progress_percent(completed, self.total),
        }
    }

    pub fn results(&self) -> &[CallResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<CallResult> {
        self.results
    }
}

/// `round(100 * completed / total)`, 0 for an empty run
///
/// Stays at 99 until every result is in, so 100 always means "done".
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    if completed >= total {
        return 100;
    }
    let percent = (100.0 * completed as f64 / total as f64).round();
    percent.min(99.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhoneNumber;

    fn number(n: u32) -> PhoneNumber {
        PhoneNumber::parse(format!("+9180000{:05}", n)).unwrap()
    }

    #[test]
    fn test_counts_and_pending() {
        let mut tracker = ProgressTracker::new(4);
        assert_eq!(tracker.snapshot(), ProgressSnapshot::start(4));

        tracker.record(CallResult::success(number(1), Some("c1".into())));
        let snap = tracker.record(CallResult::failure(number(2), "busy"));

        assert_eq!(snap.completed, 2);
        assert_eq!(snap.succeeded, 1);
        assert_eq!(snap.failed, 1);
        assert_eq!(snap.pending, 2);
        assert_eq!(snap.percent, 50);
        assert!(!snap.is_finished());

        assert_eq!(tracker.results()[1].error.as_deref(), Some("busy"));
    }

    #[test]
    fn test_percent_rounding_and_zero_total() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(5, 3), 100);
        assert_eq!(progress_percent(199, 200), 99);
        assert_eq!(ProgressTracker::new(0).snapshot().percent, 0);
    }

    #[test]
    fn test_percent_is_monotonic_and_hits_100_only_at_the_end() {
        let total = 7;
        let mut tracker = ProgressTracker::new(total);
        let mut last = 0;
        for i in 0..total {
            let snap = tracker.record(CallResult::success(number(i as u32), None));
            assert!(snap.percent >= last);
            if snap.completed < total {
                assert!(snap.percent < 100);
            }
            last = snap.percent;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_results_keep_completion_order() {
        let mut tracker = ProgressTracker::new(2);
        tracker.record(CallResult::success(number(2), None));
        tracker.record(CallResult::success(number(1), None));
        let order: Vec<_> = tracker.into_results().into_iter().map(|r| r.to).collect();
        assert_eq!(order, vec![number(2), number(1)]);
    }
}
