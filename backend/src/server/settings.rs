//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `--flags`, `BACKRUB_*` environment variables or a config
//! file, in that order of precedence.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backrub::outbound::persistence::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, PoolConfig};

use super::ServerConfig;

/// Settings for the HTTP listener and the user store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BACKRUB")]
pub struct AppSettings {
    /// Host name or address to bind.
    #[ortho_config(default = "localhost".to_owned())]
    pub host: String,
    /// TCP port to bind.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Listener configuration without a database pool attached.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.host.as_str(), self.port)
    }

    /// Database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool configuration for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url()?;
        let timeout = self
            .pool_timeout_secs
            .map_or(DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs);
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
                .with_connection_timeout(timeout),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "BACKRUB_HOST",
        "BACKRUB_PORT",
        "BACKRUB_DATABASE_URL",
        "BACKRUB_POOL_MAX_SIZE",
        "BACKRUB_POOL_TIMEOUT_SECS",
    ];

    fn load(args: &[&str]) -> AppSettings {
        let argv = std::iter::once(OsString::from("backrub")).chain(args.iter().map(OsString::from));
        AppSettings::load_from_iter(argv).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load(&[]);
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 5000);
        assert!(settings.database_url().is_none());
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn default_settings_build_an_in_memory_server_config() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let config = load(&[]).server_config();
        assert_eq!(config.bind_addr(), ("localhost", 5000));
        assert!(config.db_pool.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BACKRUB_HOST", Some("0.0.0.0".to_owned())),
            ("BACKRUB_PORT", Some("8080".to_owned())),
            (
                "BACKRUB_DATABASE_URL",
                Some("postgres://app@db/users".to_owned()),
            ),
            ("BACKRUB_POOL_MAX_SIZE", Some("4".to_owned())),
            ("BACKRUB_POOL_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let settings = load(&[]);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        let pool = settings.pool_config().expect("pool configured");
        assert_eq!(pool.database_url(), "postgres://app@db/users");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn command_line_overrides_environment() {
        let _guard = lock_env([
            ("BACKRUB_HOST", None::<String>),
            ("BACKRUB_PORT", Some("8080".to_owned())),
            ("BACKRUB_DATABASE_URL", None),
            ("BACKRUB_POOL_MAX_SIZE", None),
            ("BACKRUB_POOL_TIMEOUT_SECS", None),
        ]);

        let settings = load(&["--port", "9090"]);
        assert_eq!(settings.port, 9090);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env([
            ("BACKRUB_HOST", None::<String>),
            ("BACKRUB_PORT", None),
            ("BACKRUB_DATABASE_URL", Some("  ".to_owned())),
            ("BACKRUB_POOL_MAX_SIZE", None),
            ("BACKRUB_POOL_TIMEOUT_SECS", None),
        ]);

        assert!(load(&[]).pool_config().is_none());
    }
}
