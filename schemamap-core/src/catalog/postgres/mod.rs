//! PostgreSQL catalog reader.
//!
//! # Module Structure
//! - `connection`: connection opening, read-only session setup and close
//! - `queries`: the three `information_schema` queries and row decoding
//!
//! Works against PostgreSQL and wire-compatible engines such as CockroachDB;
//! only `information_schema` views are queried.

mod connection;
mod queries;


use sqlx::PgConnection;

pub use queries::{COLUMNS_QUERY, FOREIGN_KEYS_QUERY, PRIMARY_KEYS_QUERY};

/// Catalog reader owning a single PostgreSQL connection for one run
pub struct PostgresCatalog {
    conn: PgConnection,
    database: String,
}

impl std::fmt::Debug for PostgresCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresCatalog")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl PostgresCatalog {
    /// Catalog (database) whose tables are read
    pub fn database(&self) -> &str {
        &self.database
    }
}
