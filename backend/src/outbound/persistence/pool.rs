//! bb8 pool of `diesel-async` PostgreSQL connections.
//!
//! A failed checkout becomes [`PoolError::Checkout`]; repositories report it
//! as a connection error, which handlers answer with `500`.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("could not create the connection pool: {0}")]
    Build(String),
    #[error("no database connection available: {0}")]
    Checkout(String),
}

/// Where to connect and how many connections to keep.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use expense_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/expenses")
///     .max_connections(4)
///     .checkout_timeout(Duration::from_secs(2));
/// assert_eq!(config.max_connections, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub checkout_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Cap the pool size. Zero keeps the current limit.
    #[must_use]
    pub fn max_connections(self, limit: u32) -> Self {
        if limit == 0 {
            return self;
        }
        Self {
            max_connections: limit,
            ..self
        }
    }

    #[must_use]
    pub fn checkout_timeout(self, timeout: Duration) -> Self {
        Self {
            checkout_timeout: timeout,
            ..self
        }
    }
}

/// Cloneable handle to the shared pool.
#[derive(Clone)]
pub struct DbPool(Pool<AsyncPgConnection>);

impl DbPool {
    /// Create the pool. Connections open on first checkout.
    pub async fn connect(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_connections,
            checkout_timeout,
        } = config;
        Pool::builder()
            .max_size(max_connections)
            .connection_timeout(checkout_timeout)
            .build(AsyncDieselConnectionManager::new(database_url))
            .await
            .map(Self)
            .map_err(|err| PoolError::Build(err.to_string()))
    }

    pub async fn checkout(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.0
            .get()
            .await
            .map_err(|err| PoolError::Checkout(err.to_string()))
    }
}
