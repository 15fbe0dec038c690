//! HTTP protocol layer module
//!
//! Protocol-level building blocks shared by the request handlers: the
//! no-cache header contract, MIME detection, and response builders.

pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used functions
pub use headers::apply_no_cache;
pub use response::{
    build_403_response, build_404_response, build_405_response, build_file_response,
    build_html_response, build_redirect_response,
};
