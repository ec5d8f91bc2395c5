use std::str::FromStr;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info};

use crate::config::DbCredentials;
use crate::db::schema::{EXPECTED_TABLES, SQLITE_INIT};
use crate::error::StoreError;

pub type SqlitePool = Pool<Sqlite>;

/// Maximum connections for the pool. Kept low for single-process tooling.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Reusable connection source backed by a bounded sqlx pool.
///
/// Provisioned once from resolved credentials and passed explicitly to the
/// repositories that need it; cloning shares the same underlying pool.
#[derive(Clone)]
pub struct ConnectionSource {
    pool: SqlitePool,
}

impl ConnectionSource {
    /// Build a connection source from resolved credentials.
    ///
    /// Configuration only: the pool connects lazily, so no connection is
    /// opened here and endpoint problems surface as [`StoreError::Connection`]
    /// on first use. Malformed credentials fail immediately with
    /// [`StoreError::Configuration`]. Never retries.
    pub fn init(credentials: &DbCredentials) -> Result<Self, StoreError> {
        let url = credentials.connection_url()?;
        let options = SqliteConnectOptions::from_str(url.as_str())
            .map_err(|e| StoreError::Configuration(figment::Error::from(e.to_string())))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open one connection, logging which of the expected tables are
    /// visible. The table check is purely diagnostic: absent tables are
    /// never an error here, they only go unmentioned in the log.
    pub async fn connect(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(StoreError::Connection)?;

        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table'")
            .fetch_all(&mut *conn)
            .await
            .map_err(StoreError::Connection)?;

        for row in rows {
            let name: String = row.try_get("name").map_err(StoreError::Connection)?;
            if EXPECTED_TABLES.contains(&name.as_str()) {
                info!(table = %name, "expected table present");
            }
        }

        Ok(conn)
    }

    /// Provision the schema by executing the bundled DDL. Idempotent.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        // execute statement by statement; sqlx::query takes one command
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::statement("init schema", e))?;
        }
        debug!("schema provisioned");
        Ok(())
    }

    /// Close the pool. Individual borrowed connections are released by
    /// scope; this is for graceful shutdown of the whole source.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
