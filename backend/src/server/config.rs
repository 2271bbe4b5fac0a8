//! HTTP server settings and the configuration object handed to
//! [`super::create_server`].

use std::net::{AddrParseError, SocketAddr};

use expense_backend::domain::TokenSettings;
use expense_backend::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Start-up settings loaded via OrthoConfig from `EXPENSE_*` variables,
/// configuration files and CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXPENSE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Parse the configured bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool configuration for `url`, applying the connection limit when set.
    pub fn pool_config(&self, url: &str) -> PoolConfig {
        PoolConfig::new(url).max_connections(self.db_max_connections.unwrap_or_default())
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_settings: TokenSettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_settings: TokenSettings) -> Self {
        Self {
            bind_addr,
            token_settings,
            db_pool: None,
        }
    }

    /// Attach a database connection pool; repositories then use PostgreSQL
    /// instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("expense-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_bind_all_interfaces_without_a_database() {
        let _guard = lock_env([
            ("EXPENSE_BIND_ADDR", None::<String>),
            ("EXPENSE_DATABASE_URL", None::<String>),
            ("EXPENSE_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EXPENSE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "EXPENSE_DATABASE_URL",
                Some("postgres://localhost/expenses".to_owned()),
            ),
            ("EXPENSE_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9000
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/expenses")
        );
        assert_eq!(settings.db_max_connections, Some(4));
        assert_eq!(
            settings
                .pool_config("postgres://localhost/expenses")
                .max_connections,
            4
        );
    }

    #[rstest]
    fn blank_database_urls_are_ignored() {
        let settings = ServerSettings {
            bind_addr: Some("nonsense".to_owned()),
            database_url: Some("   ".to_owned()),
            db_max_connections: None,
        };
        assert!(settings.database_url().is_none());
        assert!(settings.bind_addr().is_err());
    }
}
