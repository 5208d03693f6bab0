//! Sender metrics for observability
//!
//! Counters for monitoring sender health: messages emitted, messages
//! rejected by the threshold filter, and backend failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-sender counters.
///
/// # Example
///
/// ```
/// use rust_journaler::SenderMetrics;
///
/// let metrics = SenderMetrics::new();
/// metrics.record_sent(3);
/// metrics.record_failed();
///
/// assert_eq!(metrics.sent_count(), 3);
/// assert_eq!(metrics.failed_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SenderMetrics {
    /// Messages handed to the backend successfully
    sent: AtomicU64,

    /// Messages rejected by `should_log`
    filtered: AtomicU64,

    /// Backend write or transmission failures
    failed: AtomicU64,
}

impl SenderMetrics {
    pub const fn new() -> Self {
        Self {
            sent: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Record `count` emitted messages (a batch counts each member)
    #[inline]
    pub fn record_sent(&self, count: u64) -> u64 {
        self.sent.fetch_add(count, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate as a percentage of attempted writes (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let sent = self.sent_count();
        let failed = self.failed_count();
        let total = sent + failed;

        if total == 0 {
            0.0
        } else {
            (failed as f64 / total as f64) * 100.0
        }
    }

    pub fn reset(&self) {
        self.sent.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}
