// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::Path;

// Re-export public types
pub use state::AppState;
pub use types::{
    AppConfig, Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// A missing file is not an error: built-in defaults apply, then
    /// `MARKETVIEW_*` environment variables (`__` separates sections).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("MARKETVIEW")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("app.root_path", ".")?
            .set_default("app.template", "templates/index.html")?
            .set_default("app.data_dir", "data")?
            .set_default("app.static_dir", "static")?
            .set_default("app.static_url_path", "/static")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "marketview")?
            .set_default("http.enable_cors", false)?
            .build()?;

        settings.try_deserialize()
    }

    /// Replace the application root (CLI `--root` override)
    #[must_use]
    pub fn with_root(mut self, root: &Path) -> Self {
        self.app.root_path = root.to_path_buf();
        self
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does/not/exist/config").unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.app.template, PathBuf::from("templates/index.html"));
        assert_eq!(cfg.app.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.app.static_url_path, "/static");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.health.enabled);
        assert_eq!(cfg.health.liveness_path, "/healthz");
        assert!(!cfg.http.enable_cors);
        assert!(cfg.server.workers.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090
workers = 2

[app]
data_dir = "datasets"

[health]
enabled = false
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.app.data_dir, PathBuf::from("datasets"));
        assert_eq!(cfg.app.template, PathBuf::from("templates/index.html"));
        assert!(!cfg.health.enabled);
        assert_eq!(cfg.health.readiness_path, "/readyz");
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.toml");
        std::fs::write(&path, "[performance]\nwrite_timeout = 10\n").unwrap();

        // No other test reads this key, so setting it process-wide is safe
        std::env::set_var("MARKETVIEW_PERFORMANCE__WRITE_TIMEOUT", "45");
        let cfg = Config::load_from(path.to_str().unwrap());
        std::env::remove_var("MARKETVIEW_PERFORMANCE__WRITE_TIMEOUT");

        let cfg = cfg.unwrap();
        assert_eq!(cfg.performance.write_timeout, 45);
        assert_eq!(cfg.performance.read_timeout, 30);
    }

    #[test]
    fn test_shipped_config_is_valid_toml() {
        let raw = include_str!("../../config.toml");
        let parsed: toml::Value = toml::from_str(raw).unwrap();
        assert_eq!(parsed["server"]["port"].as_integer(), Some(5000));
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let cfg = Config::load_from("does/not/exist/config")
            .unwrap()
            .with_root(Path::new("/srv/app"));
        assert_eq!(
            cfg.app.template_path(),
            PathBuf::from("/srv/app/templates/index.html")
        );
        assert_eq!(cfg.app.data_path(), PathBuf::from("/srv/app/data"));
        assert_eq!(cfg.app.static_path(), PathBuf::from("/srv/app/static"));
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("does/not/exist/config").unwrap();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 5000);

        let mut bad = cfg;
        bad.server.host = "not an ip".to_string();
        assert!(bad.get_socket_addr().is_err());
    }
}
