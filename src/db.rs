use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::DbConfig;
use crate::error::DataError;

/// Holds the one database handle shared by every repository for the lifetime
/// of the session. The handle is opened lazily on first use and rebuilt when
/// it stops answering pings or the configuration changes.
pub struct ConnectionProvider {
    config: RwLock<DbConfig>,
    handle: Mutex<Option<DatabaseConnection>>,
}

impl ConnectionProvider {
    pub fn new(config: DbConfig) -> Self {
        Self {
            config: RwLock::new(config),
            handle: Mutex::new(None),
        }
    }

    /// Returns a usable handle, opening or reopening one as needed.
    pub async fn acquire(&self) -> Result<DatabaseConnection, DataError> {
        let mut guard = self.handle.lock().await;

        if let Some(db) = guard.as_ref() {
            if db.ping().await.is_ok() {
                return Ok(db.clone());
            }
            warn!("database handle stopped responding, reconnecting");
            *guard = None;
        }

        let url = self.config.read().await.url();
        let mut options = ConnectOptions::new(url);
        // exactly one live connection, the back office has a single caller
        options
            .max_connections(1)
            .min_connections(0)
            .connect_timeout(Duration::from_secs(5))
            .sqlx_logging(false);

        match Database::connect(options).await {
            Ok(db) => {
                info!("database connection established");
                *guard = Some(db.clone());
                Ok(db)
            }
            Err(err) => {
                error!(%err, "failed to open database connection");
                Err(DataError::Connection(err.to_string()))
            }
        }
    }

    /// Closes the held handle if there is one. Safe to call repeatedly; close
    /// errors are logged and swallowed.
    pub async fn close(&self) {
        if let Some(db) = self.handle.lock().await.take() {
            match db.close().await {
                Ok(()) => info!("database connection closed"),
                Err(err) => warn!(%err, "error while closing database connection"),
            }
        }
    }

    /// Acquires a handle and pings it. Connectivity failures come back as
    /// `false`, never as an error.
    pub async fn test_connection(&self) -> bool {
        match self.acquire().await {
            Ok(db) => db.ping().await.is_ok(),
            Err(err) => {
                error!(%err, "connectivity check failed");
                false
            }
        }
    }

    /// Replaces the connection parameters and discards the current handle so
    /// the next `acquire` connects with the new ones.
    pub async fn reconfigure(&self, config: DbConfig) {
        info!(config = %config.connection_info(), "database reconfigured");
        *self.config.write().await = config;
        self.close().await;
    }

    /// Runs `test_connection` off the caller's task so a dead or slow server
    /// never blocks the foreground. Single shot, no retry.
    pub fn probe(self: Arc<Self>) -> JoinHandle<bool> {
        tokio::spawn(async move { self.test_connection().await })
    }

    pub async fn connection_info(&self) -> String {
        self.config.read().await.connection_info()
    }
}
