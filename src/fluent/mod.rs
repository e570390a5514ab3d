//! Fluent assertion API over captured responses.
//!
//! Each dispatched request yields a [`Chain`], whose methods feed expected
//! values through normalization ([`Value`]) and the comparison rules, and
//! report the first failure through the tester's reporter.
//!
//! # Example
//!
//! ```rust,ignore
//! tester
//!     .get("/hello", ())
//!     .expect(200)
//!     .contains("hello")
//!     .matches(r"\w+ \w+")
//!     .expect_header("X-Number", 42);
//! ```

mod chain;
mod compare;
mod value;

pub use chain::Chain;
pub use value::Value;
