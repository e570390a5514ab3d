//! The per-request assertion chain.
//!
//! A [`Chain`] wraps one captured response and threads it through any
//! number of assertions. Two independent latches track the first non-fatal
//! and the first fatal error; once the fatal latch is set every later
//! assertion is a no-op, so nothing compares against already-reported-bad
//! state.

use http::header::HeaderName;
use log::debug;

use super::compare::{self, Verdict};
use super::value::Value;
use crate::error::Error;
use crate::recorder::ResponseRecorder;
use crate::reporter::Reporter;

/// Fluent assertions over one captured response.
///
/// Every assertion method returns the chain, so checks compose per
/// request:
///
/// ```rust,ignore
/// tester
///     .get("/hello", ())
///     .expect(200)
///     .contains("hello")
///     .expect_header("X-Hello", "World");
/// ```
pub struct Chain<'t> {
    capture: ResponseRecorder,
    reporter: &'t mut dyn Reporter,
    err: Option<Error>,
    fatal: Option<Error>,
}

impl<'t> Chain<'t> {
    pub(crate) fn new(capture: ResponseRecorder, reporter: &'t mut dyn Reporter) -> Self {
        Self {
            capture,
            reporter,
            err: None,
            fatal: None,
        }
    }

    /// Compare the captured status (for an integer argument) or the
    /// captured body (for anything else).
    ///
    /// ```rust,ignore
    /// tester.get("/hello", ()).expect(200).expect("hello world");
    /// ```
    pub fn expect(self, value: impl Into<Value>) -> Self {
        if self.fatal.is_some() {
            return self;
        }
        let verdict = match value.into() {
            Value::Int(code) => {
                let actual = self.capture.status();
                if i64::from(actual) == code {
                    Verdict::Pass
                } else {
                    Verdict::Fail(Error::Status {
                        expected: code,
                        actual,
                    })
                }
            }
            other => compare::body_equals(other, self.capture.body()),
        };
        self.apply(verdict)
    }

    /// Assert the body contains the value's bytes as a contiguous
    /// substring.
    pub fn contains(self, value: impl Into<Value>) -> Self {
        if self.fatal.is_some() {
            return self;
        }
        let verdict = compare::body_contains(value.into(), self.capture.body());
        self.apply(verdict)
    }

    /// Assert some substring of the body matches the pattern.
    pub fn matches(self, pattern: &str) -> Self {
        if self.fatal.is_some() {
            return self;
        }
        let verdict = compare::body_matches(pattern, self.capture.body());
        self.apply(verdict)
    }

    /// Assert the body is a JSON document structurally equal to `expected`.
    ///
    /// ```rust,ignore
    /// tester
    ///     .post_json("/widgets", &widget)
    ///     .expect_json(serde_json::json!({"id": 1, "name": "sprocket"}));
    /// ```
    pub fn expect_json(self, expected: serde_json::Value) -> Self {
        if self.fatal.is_some() {
            return self;
        }
        let verdict = compare::body_json_equals(&expected, self.capture.body());
        self.apply(verdict)
    }

    /// Assert at least one value of the named header equals the value.
    /// A missing header is an error, never a silent pass.
    pub fn expect_header(self, name: &str, value: impl Into<Value>) -> Self {
        if self.fatal.is_some() {
            return self;
        }
        let verdict = match self.header_values(name) {
            Err(verdict) => verdict,
            Ok(values) => compare::header_equals(name, value.into(), &values),
        };
        self.apply(verdict)
    }

    /// Assert at least one value of the named header contains the value's
    /// bytes.
    pub fn contains_header(self, name: &str, value: impl Into<Value>) -> Self {
        if self.fatal.is_some() {
            return self;
        }
        let verdict = match self.header_values(name) {
            Err(verdict) => verdict,
            Ok(values) => compare::header_contains(name, value.into(), &values),
        };
        self.apply(verdict)
    }

    /// Assert at least one value of the named header matches the pattern.
    pub fn matches_header(self, name: &str, pattern: &str) -> Self {
        if self.fatal.is_some() {
            return self;
        }
        let verdict = match self.header_values(name) {
            Err(verdict) => verdict,
            Ok(values) => compare::header_matches(name, pattern, &values),
        };
        self.apply(verdict)
    }

    /// The first recorded non-fatal error, if any.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// The first recorded fatal error, if any.
    pub fn fatal_err(&self) -> Option<&Error> {
        self.fatal.as_ref()
    }

    /// The captured response, for checks the chain does not cover.
    pub fn response(&self) -> &ResponseRecorder {
        &self.capture
    }

    fn header_values(&self, name: &str) -> Result<Vec<Vec<u8>>, Verdict> {
        let parsed: HeaderName = match name.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                return Err(Verdict::Fatal(Error::HeaderName {
                    name: name.to_string(),
                }))
            }
        };
        let values: Vec<Vec<u8>> = self
            .capture
            .headers()
            .get_all(&parsed)
            .iter()
            .map(|value| value.as_bytes().to_vec())
            .collect();
        if values.is_empty() {
            return Err(Verdict::Fail(Error::HeaderNotFound {
                name: name.to_string(),
            }));
        }
        Ok(values)
    }

    fn apply(mut self, verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => {}
            Verdict::Fail(err) => self.record_error(err),
            Verdict::Fatal(err) => self.record_fatal(err),
        }
        self
    }

    /// Record a non-fatal error, first-wins. Only the first is handed to
    /// the reporter; later comparisons still run.
    pub(crate) fn record_error(&mut self, err: Error) {
        if self.err.is_some() {
            return;
        }
        debug!("assertion failed: {err}");
        self.reporter.error(err.clone());
        self.err = Some(err);
    }

    /// Record a fatal error, first-wins, and latch the chain shut.
    pub(crate) fn record_fatal(&mut self, err: Error) {
        if self.fatal.is_some() {
            return;
        }
        debug!("fatal assertion failure: {err}");
        self.reporter.fatal(err.clone());
        self.fatal = Some(err);
    }
}
