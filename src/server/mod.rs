// Server module entry point
// Listener setup, the accept loop, per-connection handling, and shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module file keeps the name but mounts as server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::run;
pub use signal::{start_signal_handler, ShutdownSignal};
