// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from the environment with built-in defaults.
    ///
    /// There is deliberately no configuration file. The `DEVSERVE` env
    /// layer (variables like `DEVSERVE__SERVER__PORT`) exists so tests and
    /// scripts can pick an ephemeral port without touching the source.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("DEVSERVE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.root", ".")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load().expect("defaults should deserialize");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.root, ".");
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load().expect("defaults should deserialize");
        let addr = cfg.socket_addr().expect("default address should parse");
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_unspecified());
    }
}
