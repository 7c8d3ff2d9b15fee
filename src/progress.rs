//! Progress reporting and cooperative cancellation.
//!
//! A filter pass polls its sink once per outer column: it reports a percent
//! in `[0, 100]` and checks the cancellation flag. The flag is one-way; once
//! set it stays set for the rest of the call.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// The progress/cancellation contract a filter pass runs under.
pub trait ProgressSink {
    /// Record a progress percentage. Reports within one call are
    /// monotonically non-decreasing.
    fn report(&self, percent: u8);

    /// True once cancellation has been requested.
    fn is_cancelled(&self) -> bool;
}

/// Shared progress state for one process call.
///
/// Wrap in an `Arc` to cancel from another thread while the pass runs.
#[derive(Debug, Default)]
pub struct ProcessingContext {
    percent: AtomicU8,
    cancelled: AtomicBool,
}

impl ProcessingContext {
    pub fn new() -> ProcessingContext {
        ProcessingContext::default()
    }

    /// Request cancellation. Irreversible for the lifetime of the context.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Last reported progress percentage.
    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }
}

impl ProgressSink for ProcessingContext {
    fn report(&self, percent: u8) {
        // fetch_max keeps the published value monotonic even if a custom
        // pass reports out of order.
        self.percent.fetch_max(percent.min(100), Ordering::Relaxed);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A sink that discards progress and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn report(&self, _percent: u8) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_starts_clean() {
        let ctx = ProcessingContext::new();
        assert_eq!(ctx.percent(), 0);
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn test_report_is_monotonic() {
        let ctx = ProcessingContext::new();
        ctx.report(40);
        ctx.report(10);
        assert_eq!(ctx.percent(), 40);
        ctx.report(90);
        assert_eq!(ctx.percent(), 90);
    }

    #[test]
    fn test_report_caps_at_100() {
        let ctx = ProcessingContext::new();
        ctx.report(250);
        assert_eq!(ctx.percent(), 100);
    }

    #[test]
    fn test_cancel_is_sticky() {
        let ctx = ProcessingContext::new();
        ctx.cancel();
        assert!(ctx.is_cancelled());
        ctx.report(5);
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_cancel_from_another_thread() {
        use std::sync::Arc;

        let ctx = Arc::new(ProcessingContext::new());
        let remote = Arc::clone(&ctx);
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(ctx.is_cancelled());
    }
}
