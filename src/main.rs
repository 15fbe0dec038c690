use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() {
    if let Err(e) = run() {
        logger::log_fatal(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Bind failures (port already taken, privileged port without privilege)
    // propagate out and terminate the process with a non-zero exit status.
    let listener = server::create_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg)?);
    let shutdown = Arc::new(server::ShutdownSignal::new());

    logger::log_startup(cfg.server.port);

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            server::start_signal_handler(Arc::clone(&shutdown));
            server::run(listener, state, shutdown).await
        })
        .await
}
