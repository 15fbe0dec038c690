// Connection handling module
// Serves a single accepted TCP connection

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler;

/// Hand an accepted connection off to its own task.
pub fn accept_connection(stream: tokio::net::TcpStream, state: &Arc<AppState>) {
    handle_connection(stream, Arc::clone(state));
}

/// Handle a single connection in a spawned task.
///
/// Wraps the stream in `TokioIo`, configures HTTP/1.1 keep-alive from the
/// performance settings, and serves requests through the single dispatch
/// chokepoint. The whole connection runs under a timeout so a stalled peer
/// cannot pin a task forever.
///
/// Connection-level errors (resets, malformed requests hyper rejects,
/// timeouts) are swallowed: each request is independent and nothing about
/// request handling reaches the console.
fn handle_connection(stream: tokio::net::TcpStream, state: Arc<AppState>) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let keep_alive_timeout = state.config.performance.keep_alive_timeout;
        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            state.config.performance.read_timeout,
            state.config.performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        if keep_alive_timeout > 0 {
            builder.keep_alive(true);
        }

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, state).await }
            }),
        );

        let _ = tokio::time::timeout(timeout_duration, conn).await;
    });
}
