use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a writer's delivery counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WriterStats {
    /// Bytes accepted by `write` into the staging buffer.
    pub bytes_written: u64,
    /// Bytes whose submission the sink completed successfully.
    pub bytes_delivered: u64,
    /// Chunks handed to the sink.
    pub submissions: u64,
    /// Drain steps reverted because the sink was saturated.
    pub deferrals: u64,
    /// Submissions that failed or were abandoned by the sink.
    pub failures: u64,
}

impl WriterStats {
    /// Bytes written but not yet delivered.
    #[must_use]
    pub const fn pending_bytes(&self) -> u64 {
        self.bytes_written.saturating_sub(self.bytes_delivered)
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    bytes_written: AtomicU64,
    bytes_delivered: AtomicU64,
    submissions: AtomicU64,
    deferrals: AtomicU64,
    failures: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_written(&self, len: usize) {
        self.bytes_written.fetch_add(len as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_submission(&self) {
        self.submissions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delivered(&self, len: usize) {
        self.bytes_delivered.fetch_add(len as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_deferral(&self) {
        self.deferrals.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> WriterStats {
        WriterStats {
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            bytes_delivered: self.bytes_delivered.load(Ordering::Relaxed),
            submissions: self.submissions.load(Ordering::Relaxed),
            deferrals: self.deferrals.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}
