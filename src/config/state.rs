// Application state module
// Immutable runtime state shared by all request handlers

use std::path::PathBuf;

use super::types::Config;

/// Application state
///
/// Built once at startup and shared read-only across connections. There is
/// no mutable cross-request state: every request resolves against the same
/// canonical root.
pub struct AppState {
    pub config: Config,
    /// Canonicalized serving root. Path containment checks compare against
    /// this, so it must come from `canonicalize` and not from the raw
    /// configured string.
    pub root: PathBuf,
}

impl AppState {
    /// Create `AppState`, canonicalizing the configured root directory.
    ///
    /// Fails if the root does not exist or is unreadable; that is a fatal
    /// startup error.
    pub fn new(config: &Config) -> std::io::Result<Self> {
        let root = PathBuf::from(&config.server.root).canonicalize()?;
        Ok(Self {
            config: config.clone(),
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PerformanceConfig, ServerConfig};

    fn test_config(root: &str) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                root: root.to_string(),
                workers: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
            },
        }
    }

    #[test]
    fn test_root_is_canonicalized() {
        let state = AppState::new(&test_config(".")).expect("cwd should canonicalize");
        assert!(state.root.is_absolute());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let missing = format!("/nonexistent-devserve-root-{}", std::process::id());
        assert!(AppState::new(&test_config(&missing)).is_err());
    }
}
