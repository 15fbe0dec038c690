//! Console output policy
//!
//! This server is intentionally quiet: the startup line below and fatal
//! startup diagnostics are the only console output it ever produces.
//! There are no access-log or per-request logging functions on purpose;
//! request handling stays off stdout and stderr entirely.

/// Print the single startup line announcing the serving address.
pub fn log_startup(port: u16) {
    println!("Serving on http://localhost:{port}");
}

/// Report a fatal startup error before the process exits non-zero.
pub fn log_fatal(message: &str) {
    eprintln!("[FATAL] {message}");
}
