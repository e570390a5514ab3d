//! Failures reported through a [`Reporter`](crate::Reporter).
//!
//! Every failure the crate can surface is a variant of [`Error`]. Severity
//! is not encoded in the type: the assertion chain decides whether a given
//! variant travels the non-fatal or the fatal reporter path.

/// A failed assertion or a structurally invalid input.
///
/// All variants carry owned, clonable data so the chain can retain the
/// exact error handed to the reporter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Captured status code differed from the expected one.
    #[error("expecting status code {expected}, got {actual}")]
    Status { expected: i64, actual: u16 },

    /// Captured body differed from the expected value.
    #[error("expecting body {expected}, got {actual}")]
    Body { expected: String, actual: String },

    /// Captured body does not contain the expected substring.
    #[error("body {body} does not contain {needle}")]
    Contains { needle: String, body: String },

    /// Captured body does not match the expected pattern.
    #[error("body {body} does not match pattern {pattern:?}")]
    Match { pattern: String, body: String },

    /// The expectation pattern failed to compile.
    #[error("error compiling regular expression {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    /// The named header is absent from the response.
    #[error("header {name:?} not present in response")]
    HeaderNotFound { name: String },

    /// The header name is not a valid HTTP header name.
    #[error("invalid header name {name:?}")]
    HeaderName { name: String },

    /// A handler supplied a header value that is not valid on the wire.
    #[error("invalid value {value:?} for header {name:?}")]
    HeaderValue { name: String, value: String },

    /// No value of the named header equals the expectation.
    #[error("expecting header {name:?} = {expected}, got {actual}")]
    Header {
        name: String,
        expected: String,
        actual: String,
    },

    /// No value of the named header contains the expected substring.
    #[error("no value of header {name:?} contains {needle}")]
    HeaderContains { name: String, needle: String },

    /// No value of the named header matches the expected pattern.
    #[error("no value of header {name:?} matches pattern {pattern:?}")]
    HeaderMatch { name: String, pattern: String },

    /// A numeric expectation was declared but the header value is not a
    /// number.
    #[error("can't parse header {name:?} value {value:?} as a number")]
    HeaderNumber { name: String, value: String },

    /// A value kind that cannot become a request body, e.g. a float.
    #[error("unsupported {kind} value for request body")]
    BodyKind { kind: &'static str },

    /// A value kind that cannot serve as this comparison's expectation.
    #[error("unsupported {kind} expectation for {operation}")]
    ExpectationKind {
        kind: &'static str,
        operation: &'static str,
    },

    /// Draining a readable stream failed.
    #[error("error reading body stream: {0}")]
    Stream(String),

    /// The request path did not produce a valid request.
    #[error("invalid request path {path:?}: {reason}")]
    Path { path: String, reason: String },

    /// Serializing a JSON request body failed.
    #[error("error encoding JSON body: {0}")]
    JsonBody(String),

    /// The captured body is not valid JSON.
    #[error("body {body} is not valid JSON: {reason}")]
    JsonSyntax { body: String, reason: String },

    /// The captured JSON document differed from the expected one.
    #[error("expecting JSON {expected}, got {actual}")]
    Json { expected: String, actual: String },

    /// A handler set a status code outside the valid range.
    #[error("set_status() called with invalid code {0}")]
    InvalidStatusCode(u16),

    /// A handler set the status more than once.
    #[error("set_status() called {0} times")]
    StatusSetTimes(u32),
}
