//! Connection lifecycle for the PostgreSQL catalog reader.

use super::PostgresCatalog;
use crate::Result;
use crate::error::SchemaMapError;
use crate::validation::ConnectionTarget;
use sqlx::{Connection, Executor, PgConnection};

impl PostgresCatalog {
    /// Opens a connection to the validated target and prepares the session.
    ///
    /// The session is switched to read-only before any catalog query runs.
    /// No connect or statement timeout is applied.
    ///
    /// # Errors
    /// Returns [`SchemaMapError::Connection`] if the connection cannot be
    /// opened or the session settings are rejected. The message carries the
    /// redacted connection string only.
    pub async fn connect(target: &ConnectionTarget) -> Result<Self> {
        tracing::debug!("Connecting to {}", target.redacted());

        let conn = PgConnection::connect(target.url()).await.map_err(|e| {
            SchemaMapError::connection_failed(
                format!("Failed to connect to {}", target.redacted()),
                e,
            )
        })?;

        let mut catalog = Self {
            conn,
            database: target.database().to_string(),
        };
        catalog.setup_session().await?;

        tracing::info!("Connected to database '{}'", catalog.database);
        Ok(catalog)
    }

    /// Applies read-only and identification settings to the session
    async fn setup_session(&mut self) -> Result<()> {
        (&mut self.conn)
            .execute("SET default_transaction_read_only = on")
            .await
            .map_err(|e| {
                SchemaMapError::connection_failed("Failed to set read-only session", e)
            })?;

        let app_name = format!("schemamap-{}", env!("CARGO_PKG_VERSION"));
        (&mut self.conn)
            .execute(format!("SET application_name = '{}'", app_name).as_str())
            .await
            .map_err(|e| {
                SchemaMapError::connection_failed("Failed to set application_name", e)
            })?;

        Ok(())
    }

    /// Closes the connection gracefully.
    ///
    /// Dropping the reader also releases the socket; this variant sends the
    /// protocol terminate message first.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| SchemaMapError::connection_failed("Failed to close connection", e))
    }
}
