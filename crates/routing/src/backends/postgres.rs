//! PostgreSQL connection targets over deadpool-postgres.
//!
//! [`PostgresTarget`] wraps a `deadpool_postgres::Pool` as a
//! [`ConnectionSource`]; the sessions it produces map the [`Session`]
//! boundary onto `BEGIN`/`COMMIT`/`ROLLBACK` on the pooled client. Dropping
//! a session returns the client to the pool.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use switchyard_routing::TenantRouter;
//! use switchyard_routing::backends::postgres::{PostgresConfig, PostgresTarget};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let default_target = PostgresTarget::new(&PostgresConfig::default())?;
//! let acme_target = PostgresTarget::new(&PostgresConfig {
//!     dbname: "acme".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let router = Arc::new(TenantRouter::new(default_target));
//! router.add("acme", acme_target)?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use deadpool_postgres::{Client, Config, Pool, Runtime};
use serde::{Deserialize, Serialize};
use tokio_postgres::NoTls;

use crate::error::BoxError;
use crate::source::{ConnectionSource, Session};

/// Configuration for a PostgreSQL connection target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    /// PostgreSQL host.
    #[serde(default = "default_host")]
    pub host: String,

    /// PostgreSQL port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name.
    #[serde(default = "default_dbname")]
    pub dbname: String,

    /// Database user.
    #[serde(default = "default_user")]
    pub user: String,

    /// Database password.
    #[serde(default)]
    pub password: Option<String>,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_dbname() -> String {
    "postgres".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_max_connections() -> usize {
    10
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dbname: default_dbname(),
            user: default_user(),
            password: None,
            max_connections: default_max_connections(),
        }
    }
}

/// A PostgreSQL connection target backed by a deadpool pool.
///
/// The target owns only its pool handle; the embedding application decides
/// how many targets exist and when they are dropped.
pub struct PostgresTarget {
    pool: Pool,
}

impl std::fmt::Debug for PostgresTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresTarget").finish_non_exhaustive()
    }
}

impl PostgresTarget {
    /// Creates a target with a freshly built pool.
    ///
    /// The pool is lazy; no connection is opened until a session is
    /// acquired.
    pub fn new(config: &PostgresConfig) -> Result<Self, BoxError> {
        let mut cfg = Config::new();
        cfg.host = Some(config.host.clone());
        cfg.port = Some(config.port);
        cfg.dbname = Some(config.dbname.clone());
        cfg.user = Some(config.user.clone());
        cfg.password = config.password.clone();

        let pool = cfg
            .builder(NoTls)?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

/// A pooled PostgreSQL session.
///
/// `commit` and `rollback` are no-ops once the transaction has ended, so
/// the executor's cleanup path can always run them safely.
pub struct PostgresSession {
    client: Client,
    in_transaction: bool,
}

impl PostgresSession {
    /// Returns the underlying client, for running statements inside the
    /// unit of work.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Drop for PostgresSession {
    fn drop(&mut self) {
        // Can't run async in Drop; the pool recycles the connection and
        // PostgreSQL auto-rolls-back the uncommitted transaction.
        if self.in_transaction {
            tracing::warn!("PostgreSQL session dropped without explicit commit or rollback");
        }
    }
}

#[async_trait]
impl Session for PostgresSession {
    async fn begin(&mut self) -> Result<(), BoxError> {
        self.client.batch_execute("BEGIN").await?;
        self.in_transaction = true;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BoxError> {
        if self.in_transaction {
            self.client.batch_execute("COMMIT").await?;
            self.in_transaction = false;
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), BoxError> {
        if self.in_transaction {
            self.client.batch_execute("ROLLBACK").await?;
            self.in_transaction = false;
        }
        Ok(())
    }
}

#[async_trait]
impl ConnectionSource for PostgresTarget {
    type Session = PostgresSession;

    async fn acquire(&self) -> Result<Self::Session, BoxError> {
        let client = self.pool.get().await?;
        Ok(PostgresSession {
            client,
            in_transaction: false,
        })
    }
}
