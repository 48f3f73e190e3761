use tracing::info;

/// Receives periodic progress during long scans.
///
/// Sinks observe only; nothing they do can change clustering results, and
/// they have no way to fail a run.
pub trait ProgressSink {
    fn report(&mut self, stage: &str, processed: usize, total: usize);
}

/// Discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _stage: &str, _processed: usize, _total: usize) {}
}

/// Emits each report as a `tracing` info event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&mut self, stage: &str, processed: usize, total: usize) {
        info!("{stage}: processed {processed} of {total}");
    }
}

/// Geometric reporting schedule: first report at item 100, and every time a
/// report fires the interval grows by half.
///
/// Lives for one invocation; every scan starts a fresh schedule.
#[derive(Debug, Clone)]
pub struct ProgressSchedule {
    interval: usize,
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSchedule {
    pub const INITIAL_INTERVAL: usize = 100;

    #[must_use]
    pub fn new() -> Self {
        Self {
            interval: Self::INITIAL_INTERVAL,
        }
    }

    /// Whether item number `processed` (1-based) should be reported
    pub fn is_due(&mut self, processed: usize) -> bool {
        if processed > 0 && processed % self.interval == 0 {
            self.interval += self.interval / 2;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_grows_geometrically() {
        let mut schedule = ProgressSchedule::new();
        let due: Vec<usize> = (1..=1000).filter(|&i| schedule.is_due(i)).collect();
        assert_eq!(due, vec![100, 150, 225, 337, 505, 757]);
    }

    #[test]
    fn test_schedule_is_per_instance() {
        let mut first = ProgressSchedule::new();
        assert!(first.is_due(100));
        let mut second = ProgressSchedule::new();
        assert!(second.is_due(100));
    }

    #[test]
    fn test_no_progress_accepts_reports() {
        let mut sink = NoProgress;
        sink.report("similar", 1, 2);
    }
}
