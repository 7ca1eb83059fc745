use std::sync::atomic::{AtomicU64, Ordering};

/// Handle for one in-flight analysis submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

impl AnalysisTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Keeps only the newest submission's result.
///
/// Every `begin` supersedes the tickets issued before it, so a slow response
/// for an older submission is dropped instead of replacing a newer report.
#[derive(Debug, Default)]
pub struct AnalysisTracker {
    latest: AtomicU64,
}

impl AnalysisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> AnalysisTicket {
        AnalysisTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: AnalysisTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Hand back `value` when `ticket` is still the latest submission.
    pub fn accept<T>(&self, ticket: AnalysisTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(ticket = ticket.0, "discarding stale analysis result");
            None
        }
    }
}
