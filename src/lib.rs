//! # httpexpect
//!
//! A fluent assertion harness for exercising HTTP handlers in-process.
//!
//! Requests are dispatched directly against a [`Handler`] — no sockets, no
//! timeouts — and the captured response is wrapped in a chain of
//! assertions on status, body, and headers. Failures flow through a
//! pluggable [`Reporter`], so the harness works with Rust's native
//! `#[test]` framework or with any custom failure collector.
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Request;
//! use httpexpect::{PanicReporter, ResponseRecorder, Router, Tester};
//!
//! let router = Router::new().route("/hello", |_req: &Request<Vec<u8>>, res: &mut ResponseRecorder| {
//!     res.header("X-Hello", "World");
//!     res.write_str("hello world");
//! });
//!
//! let mut tester = Tester::new(PanicReporter, router);
//! tester
//!     .get("/hello", ())
//!     .expect(200)
//!     .contains("hello")
//!     .matches(r"\w+ \w+")
//!     .expect_header("X-Hello", "World");
//! ```
//!
//! ## Inspecting Failures
//!
//! ```rust
//! use http::Request;
//! use httpexpect::{RecordingReporter, ResponseRecorder, Router, Tester};
//!
//! let reporter = RecordingReporter::new();
//! let router = Router::new().route("/empty", |_req: &Request<Vec<u8>>, _res: &mut ResponseRecorder| {});
//! let mut tester = Tester::new(reporter.clone(), router);
//!
//! tester.get("/empty", ()).expect(404);
//! assert!(reporter.first_error().is_some());
//! ```
//!
//! ## Forms
//!
//! ```rust,ignore
//! use httpexpect::form;
//!
//! // form-encoded POST body, or a GET query string
//! tester.form("/echo-form", form! {"foo" => 1, "bar" => "baz"});
//! tester.get("/echo-form", form! {"foo" => 1, "bar" => "baz"});
//! ```

pub mod error;
pub mod fluent;
pub mod handler;
pub mod recorder;
pub mod reporter;
pub mod tester;

// Core types
pub use error::Error;
pub use fluent::{Chain, Value};
pub use tester::{Form, Payload, Tester};

// Handler side
pub use handler::{Handler, Router};
pub use recorder::ResponseRecorder;

// Reporting
pub use reporter::{PanicReporter, RecordingReporter, Reporter};

// Request/response types used at the handler seam.
pub use http;
