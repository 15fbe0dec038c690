//! Cache-busting header module
//!
//! Every response leaving this server must tell clients and intermediaries
//! to never store or reuse it. Local development edits files constantly; a
//! stale cached copy is worse than no server at all.

use hyper::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};

/// `Cache-Control` value emitted on every response
pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// `Pragma` value emitted on every response (HTTP/1.0 intermediaries)
pub const PRAGMA_VALUE: &str = "no-cache";

/// `Expires` value emitted on every response
pub const EXPIRES_VALUE: &str = "0";

/// Force the no-cache header set onto a response header map.
///
/// Uses `insert`, not `append`: any value a builder may have set earlier is
/// overwritten so the contract holds on every response path.
pub fn apply_no_cache(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.insert(PRAGMA, HeaderValue::from_static(PRAGMA_VALUE));
    headers.insert(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
}
