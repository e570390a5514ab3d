//! In-process response capture.
//!
//! A [`ResponseRecorder`] stands in for the wire: handlers write status,
//! headers, and body into it, and the assertion chain reads them back out.
//! The write side is instrumented — setting an out-of-range status code or
//! setting the status more than once is recorded as a protocol violation
//! and surfaced on the dispatching chain instead of being swallowed.

use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;

/// Captures what a handler writes for one request.
///
/// Status defaults to 200 when the handler never sets one, matching what a
/// real server would send for a handler that only writes a body.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: Option<u16>,
    status_calls: u32,
    headers: HeaderMap,
    body: Vec<u8>,
    violations: Vec<Error>,
}

impl ResponseRecorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the response status code. Valid codes are 100..=599.
    ///
    /// An invalid code, or a second call, is recorded as a protocol
    /// violation; the first valid code wins.
    pub fn set_status(&mut self, code: u16) {
        self.status_calls += 1;
        if !(100..=599).contains(&code) {
            self.violations.push(Error::InvalidStatusCode(code));
            return;
        }
        if self.status.is_none() {
            self.status = Some(code);
        }
    }

    /// Append a header value, preserving any earlier values of the same
    /// name.
    pub fn header(&mut self, name: &str, value: &str) {
        let parsed_name: HeaderName = match name.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                self.violations.push(Error::HeaderName {
                    name: name.to_string(),
                });
                return;
            }
        };
        let parsed_value = match HeaderValue::from_str(value) {
            Ok(parsed) => parsed,
            Err(_) => {
                self.violations.push(Error::HeaderValue {
                    name: name.to_string(),
                    value: value.to_string(),
                });
                return;
            }
        };
        self.headers.append(parsed_name, parsed_value);
    }

    /// Append bytes to the response body.
    pub fn write(&mut self, data: &[u8]) {
        self.body.extend_from_slice(data);
    }

    /// Append text to the response body.
    pub fn write_str(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    /// Captured status code; 200 unless the handler set one.
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(200)
    }

    /// Captured headers, in insertion order per name.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Captured body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Seal the capture and take the recorded protocol violations. Called
    /// once by the dispatcher after the handler returns.
    pub(crate) fn finish(&mut self) -> Vec<Error> {
        if self.status_calls > 1 {
            self.violations
                .push(Error::StatusSetTimes(self.status_calls));
        }
        std::mem::take(&mut self.violations)
    }
}
