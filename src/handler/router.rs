//! Request dispatch module
//!
//! Single entry point for HTTP request processing. Every response, success
//! or error, passes through here exactly once, which is where the no-cache
//! header contract is enforced.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
///
/// Generic over the body type so tests can drive it with a plain request
/// instead of a live hyper connection. Only GET and HEAD are served; the
/// body is never read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    let mut response = if matches!(*method, Method::GET | Method::HEAD) {
        static_files::serve(&state.root, path, is_head).await
    } else {
        http::build_405_response()
    };

    // Last step on every path: no response leaves without the override set.
    http::apply_no_cache(response.headers_mut());

    Ok(response)
}
