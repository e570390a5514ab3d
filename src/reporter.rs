//! Reporter adapter over the host test framework's failure primitives.
//!
//! The chain never talks to a test framework directly; it hands failures to
//! a [`Reporter`], which decides what "non-fatal" and "fatal" mean for the
//! host. Two implementations are provided: [`PanicReporter`] for plain
//! `#[test]` functions and [`RecordingReporter`] for tests that inspect the
//! reported errors themselves.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Error;

/// Receives assertion failures from a chain.
///
/// `error` is the non-fatal path: the test flow continues, and later
/// assertions on the same chain still run. `fatal` aborts the current
/// chain; implementations may abort the whole test.
pub trait Reporter {
    /// Report a non-fatal failure.
    fn error(&mut self, err: Error);

    /// Report a fatal failure.
    fn fatal(&mut self, err: Error);
}

/// Reporter bound to Rust's built-in test framework.
///
/// Rust tests have no non-fatal failure primitive, so both paths panic
/// with the error's display message. Use [`RecordingReporter`] when a test
/// needs to keep running after a reported failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl Reporter for PanicReporter {
    fn error(&mut self, err: Error) {
        panic!("assertion failed: {err}");
    }

    fn fatal(&mut self, err: Error) {
        panic!("assertion failed: {err}");
    }
}

/// Reporter that accumulates failures instead of aborting.
///
/// Clones share storage, so a test keeps one handle and gives the tester
/// another:
///
/// ```rust,ignore
/// let reporter = RecordingReporter::new();
/// let mut tester = Tester::new(reporter.clone(), router);
///
/// tester.get("/hello", ()).expect(404);
/// assert!(reporter.first_error().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    inner: Rc<RefCell<Recorded>>,
}

#[derive(Debug, Default)]
struct Recorded {
    errors: Vec<Error>,
    fatals: Vec<Error>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first non-fatal error reported so far.
    pub fn first_error(&self) -> Option<Error> {
        self.inner.borrow().errors.first().cloned()
    }

    /// The first fatal error reported so far.
    pub fn first_fatal(&self) -> Option<Error> {
        self.inner.borrow().fatals.first().cloned()
    }

    /// Whether anything has been reported, fatal or not.
    pub fn has_failures(&self) -> bool {
        let recorded = self.inner.borrow();
        !recorded.errors.is_empty() || !recorded.fatals.is_empty()
    }

    /// Total count of reported failures.
    pub fn failure_count(&self) -> usize {
        let recorded = self.inner.borrow();
        recorded.errors.len() + recorded.fatals.len()
    }

    /// Drop everything reported so far.
    pub fn clear(&self) {
        let mut recorded = self.inner.borrow_mut();
        recorded.errors.clear();
        recorded.fatals.clear();
    }
}

impl Reporter for RecordingReporter {
    fn error(&mut self, err: Error) {
        self.inner.borrow_mut().errors.push(err);
    }

    fn fatal(&mut self, err: Error) {
        self.inner.borrow_mut().fatals.push(err);
    }
}
