//! The tester and in-process request dispatch.
//!
//! A [`Tester`] binds a reporter and a handler for the lifetime of a test.
//! Each dispatch builds an `http::Request`, invokes the handler
//! synchronously (no socket, no timeouts), captures the response, and
//! returns a [`Chain`] for assertions. Handler protocol violations detected
//! by the recorder are attributed to the returned chain.

use http::{header, Method, Request};
use log::debug;
use serde::Serialize;
use url::form_urlencoded;

use crate::error::Error;
use crate::fluent::{Chain, Value};
use crate::handler::Handler;
use crate::recorder::ResponseRecorder;
use crate::reporter::Reporter;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// A dispatch payload: nothing, a body value, or a form.
#[derive(Debug)]
pub enum Payload {
    /// No body.
    Empty,
    /// A body built through value normalization.
    Value(Value),
    /// Form fields: a query string on GET, a form-encoded body otherwise.
    Form(Form),
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::Empty
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Value(value)
    }
}

impl From<Form> for Payload {
    fn from(form: Form) -> Self {
        Payload::Form(form)
    }
}

macro_rules! payload_from_value {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Payload {
            fn from(value: $ty) -> Self {
                Payload::Value(Value::from(value))
            }
        }
    )*};
}

payload_from_value!(&str, String, Vec<u8>, &[u8], i16, i32, i64, u16, u32, f32, f64);

impl<const N: usize> From<&[u8; N]> for Payload {
    fn from(bytes: &[u8; N]) -> Self {
        Payload::Value(Value::from(bytes))
    }
}

/// An ordered set of form fields.
///
/// Values are stored as their text form and round-trip byte-for-byte
/// through the form encoding. Build one with [`Form::field`] or the
/// [`form!`](crate::form!) macro.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    fields: Vec<(String, String)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; any displayable value is stored as its text form.
    pub fn field(mut self, name: &str, value: impl ToString) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Percent-encode the fields as `name=value` pairs.
    pub(crate) fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.fields {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

/// Build a [`Form`] from field/value pairs.
///
/// # Example
///
/// ```rust
/// use httpexpect::form;
///
/// let form = form! {"foo" => 1, "bar" => "baz"};
/// assert!(!form.is_empty());
/// ```
#[macro_export]
macro_rules! form {
    ($($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut form = $crate::Form::new();
        $(
            form = form.field($name, $value);
        )*
        form
    }};
}

/// Binds a reporter and a handler; the entry point of the crate.
///
/// Created once per test and reused sequentially across request/assertion
/// sequences. Not synchronized — concurrent use of one tester is
/// unsupported.
///
/// ```rust
/// use http::Request;
/// use httpexpect::{PanicReporter, ResponseRecorder, Router, Tester};
///
/// let router = Router::new().route("/hello", |_req: &Request<Vec<u8>>, res: &mut ResponseRecorder| {
///     res.write_str("hello world");
/// });
/// let mut tester = Tester::new(PanicReporter, router);
/// tester.get("/hello", ()).expect(200).contains("hello");
/// ```
pub struct Tester<H: Handler> {
    reporter: Box<dyn Reporter>,
    handler: H,
}

impl<H: Handler> Tester<H> {
    /// Create a tester from a reporter and a handler.
    pub fn new(reporter: impl Reporter + 'static, handler: H) -> Self {
        Self {
            reporter: Box::new(reporter),
            handler,
        }
    }

    /// Dispatch a GET request. A [`Form`] payload becomes a query string
    /// appended to the path; other payloads become the request body.
    pub fn get(&mut self, path: &str, payload: impl Into<Payload>) -> Chain<'_> {
        self.dispatch(Method::GET, path, payload.into())
    }

    /// Dispatch a POST request with a body built from the payload.
    pub fn post(&mut self, path: &str, payload: impl Into<Payload>) -> Chain<'_> {
        self.dispatch(Method::POST, path, payload.into())
    }

    /// Dispatch a POST request with a form-encoded body and the matching
    /// content type.
    pub fn form(&mut self, path: &str, form: Form) -> Chain<'_> {
        self.dispatch(Method::POST, path, Payload::Form(form))
    }

    /// Dispatch a POST request with a JSON-encoded body and the matching
    /// content type. A serialization failure is fatal.
    pub fn post_json(&mut self, path: &str, body: &impl Serialize) -> Chain<'_> {
        match serde_json::to_vec(body) {
            Ok(bytes) => self.dispatch_request(
                Method::POST,
                path.to_string(),
                bytes,
                Some(JSON_CONTENT_TYPE),
            ),
            Err(err) => self.fatal_chain(Error::JsonBody(err.to_string())),
        }
    }

    fn dispatch(&mut self, method: Method, path: &str, payload: Payload) -> Chain<'_> {
        let mut path = path.to_string();
        let mut content_type = None;
        let body = match payload {
            Payload::Empty => Vec::new(),
            Payload::Form(form) if method == Method::GET => {
                let separator = if path.contains('?') { '&' } else { '?' };
                path = format!("{path}{separator}{}", form.encode());
                Vec::new()
            }
            Payload::Form(form) => {
                content_type = Some(FORM_CONTENT_TYPE);
                form.encode().into_bytes()
            }
            Payload::Value(value) => match value.into_body() {
                Ok(bytes) => bytes,
                Err(err) => return self.fatal_chain(err),
            },
        };
        self.dispatch_request(method, path, body, content_type)
    }

    fn dispatch_request(
        &mut self,
        method: Method,
        path: String,
        body: Vec<u8>,
        content_type: Option<&'static str>,
    ) -> Chain<'_> {
        let mut builder = Request::builder().method(method).uri(path.as_str());
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = match builder.body(body) {
            Ok(request) => request,
            Err(err) => {
                return self.fatal_chain(Error::Path {
                    path,
                    reason: err.to_string(),
                })
            }
        };

        let mut recorder = ResponseRecorder::new();
        self.handler.handle(&request, &mut recorder);
        let violations = recorder.finish();
        debug!("{} {} -> {}", request.method(), path, recorder.status());

        let mut chain = Chain::new(recorder, self.reporter.as_mut());
        for violation in violations {
            chain.record_error(violation);
        }
        chain
    }

    /// A chain for a request that never reached the handler, carrying the
    /// fatal error that stopped it.
    fn fatal_chain(&mut self, err: Error) -> Chain<'_> {
        let mut chain = Chain::new(ResponseRecorder::new(), self.reporter.as_mut());
        chain.record_fatal(err);
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_encoding_round_trips_values() {
        let form = form! {"foo" => 1, "bar" => "baz qux"};
        assert_eq!(form.encode(), "foo=1&bar=baz+qux");

        let decoded: Vec<(String, String)> =
            form_urlencoded::parse(form.encode().as_bytes()).into_owned().collect();
        assert_eq!(
            decoded,
            [
                ("foo".to_string(), "1".to_string()),
                ("bar".to_string(), "baz qux".to_string()),
            ]
        );
    }

    #[test]
    fn empty_form_macro() {
        let form = form! {};
        assert!(form.is_empty());
    }

    #[test]
    fn payload_conversions_cover_the_value_kinds() {
        assert!(matches!(Payload::from(()), Payload::Empty));
        assert!(matches!(Payload::from("text"), Payload::Value(Value::Text(_))));
        assert!(matches!(
            Payload::from(vec![1u8, 2]),
            Payload::Value(Value::Bytes(_))
        ));
        assert!(matches!(Payload::from(7), Payload::Value(Value::Int(7))));
        assert!(matches!(
            Payload::from(form! {"a" => 1}),
            Payload::Form(_)
        ));
    }
}
