//! Handler abstraction and a minimal exact-path router.

use std::collections::HashMap;
use std::fmt;

use http::Request;

use crate::recorder::ResponseRecorder;

/// Serves one in-process request by writing into the recorder.
///
/// Implemented for any matching closure, so tests can use inline handlers:
///
/// ```rust
/// use http::Request;
/// use httpexpect::{Handler, ResponseRecorder, Router};
///
/// let router = Router::new().route("/hello", |_req: &Request<Vec<u8>>, res: &mut ResponseRecorder| {
///     res.write_str("hello world");
/// });
/// ```
pub trait Handler {
    fn handle(&self, request: &Request<Vec<u8>>, response: &mut ResponseRecorder);
}

impl<F> Handler for F
where
    F: Fn(&Request<Vec<u8>>, &mut ResponseRecorder),
{
    fn handle(&self, request: &Request<Vec<u8>>, response: &mut ResponseRecorder) {
        self(request, response)
    }
}

/// Exact-path router with a 404 fallback.
///
/// Paths match exactly, query strings excluded. Anything unregistered gets
/// a `404` with a plain-text body.
#[derive(Default)]
pub struct Router {
    routes: HashMap<String, Box<dyn Handler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an exact path.
    pub fn route(mut self, path: &str, handler: impl Handler + 'static) -> Self {
        self.routes.insert(path.to_string(), Box::new(handler));
        self
    }
}

impl Handler for Router {
    fn handle(&self, request: &Request<Vec<u8>>, response: &mut ResponseRecorder) {
        match self.routes.get(request.uri().path()) {
            Some(handler) => handler.handle(request, response),
            None => {
                response.set_status(404);
                response.write_str("404 page not found\n");
            }
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<_> = self.routes.keys().collect();
        paths.sort();
        f.debug_struct("Router").field("routes", &paths).finish()
    }
}
