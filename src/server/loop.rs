// Server loop module
// Accepts connections until a termination signal arrives

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;

/// Run the accept loop until shutdown is signalled.
///
/// Each accepted connection is handed off to its own task; the loop itself
/// holds no per-request state. Accept errors are transient (e.g. the peer
/// reset before we picked the connection up) and are intentionally not
/// reported: request handling produces no console output.
///
/// Returning drops the listener, releasing the port for the next process.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownSignal>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                if let Ok((stream, _peer_addr)) = accept_result {
                    accept_connection(stream, &state);
                }
            }

            () = shutdown.notified() => {
                return Ok(());
            }
        }
    }
}
