//! Thread-safe message accumulator.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A single reported message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The message severity.
    pub severity: Severity,
    /// The message text.
    pub text: String,
}

/// An accumulator for messages emitted during a synthesis run.
///
/// The error count is tracked atomically for fast `has_errors` checks
/// without locking the message vector.
pub struct Reporter {
    messages: Mutex<Vec<Message>>,
    error_count: AtomicUsize,
}

impl Reporter {
    /// Creates a new empty reporter.
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
        }
    }

    /// Records an informational message.
    pub fn info(&self, text: impl Into<String>) {
        self.emit(Severity::Info, text);
    }

    /// Records a warning.
    pub fn warning(&self, text: impl Into<String>) {
        self.emit(Severity::Warning, text);
    }

    /// Records an error message.
    pub fn error(&self, text: impl Into<String>) {
        self.emit(Severity::Error, text);
    }

    /// Records a message with an explicit severity.
    pub fn emit(&self, severity: Severity, text: impl Into<String>) {
        if severity.is_error() {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        let mut messages = self.messages.lock().unwrap();
        messages.push(Message {
            severity,
            text: text.into(),
        });
    }

    /// Returns `true` if any error-severity message has been recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count.load(Ordering::Relaxed) > 0
    }

    /// Returns the number of error-severity messages recorded so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Takes all accumulated messages, leaving the reporter empty.
    pub fn take_all(&self) -> Vec<Message> {
        let mut messages = self.messages.lock().unwrap();
        std::mem::take(&mut *messages)
    }

    /// Returns a snapshot of all accumulated messages without draining.
    pub fn messages(&self) -> Vec<Message> {
        let messages = self.messages.lock().unwrap();
        messages.clone()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reporter() {
        let reporter = Reporter::new();
        assert!(!reporter.has_errors());
        assert_eq!(reporter.error_count(), 0);
        assert!(reporter.take_all().is_empty());
    }

    #[test]
    fn info_is_not_an_error() {
        let reporter = Reporter::new();
        reporter.info("creating new component");
        assert!(!reporter.has_errors());
        assert_eq!(reporter.messages().len(), 1);
    }

    #[test]
    fn error_counted() {
        let reporter = Reporter::new();
        reporter.error("cannot resolve document");
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);
    }

    #[test]
    fn take_all_drains() {
        let reporter = Reporter::new();
        reporter.info("one");
        reporter.warning("two");
        let all = reporter.take_all();
        assert_eq!(all.len(), 2);
        assert!(reporter.take_all().is_empty());
        // Error count is NOT reset by take_all (it's an atomic counter)
        assert_eq!(reporter.error_count(), 0);
    }

    #[test]
    fn thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let reporter = Arc::new(Reporter::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let reporter = Arc::clone(&reporter);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reporter.error("boom");
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(reporter.error_count(), 800);
        assert_eq!(reporter.messages().len(), 800);
    }
}
