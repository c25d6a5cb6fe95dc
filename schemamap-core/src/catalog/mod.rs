//! Catalog reading: the three row streams the schema model is built from.
//!
//! # Module Structure
//! - `helpers`: typed field extraction from driver rows
//! - `postgres`: `CatalogReader` over a single PostgreSQL connection
//!
//! A reader issues its queries strictly one after another. Any failure is
//! fatal for the run; there is no partial-result path.

#[cfg(feature = "postgresql")]
pub mod helpers;
#[cfg(feature = "postgresql")]
pub mod postgres;

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(feature = "postgresql")]
pub use postgres::PostgresCatalog;

/// Schemas that never hold user tables
pub const EXCLUDED_SCHEMAS: &[&str] = &[
    "information_schema",
    "crdb_internal",
    "pg_catalog",
    "pg_extension",
    "pg_toast",
];

/// One column of one user table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    /// Owning table
    pub table_name: String,
    /// Column name
    pub column_name: String,
    /// `information_schema.columns.data_type`
    pub data_type: String,
    /// Catalog nullability indicator, `YES` or `NO`
    pub is_nullable: String,
    /// Default expression text, if any
    pub column_default: Option<String>,
}

/// A column taking part in a primary key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColumnRow {
    /// Table owning the primary key
    pub table_name: String,
    /// Column taking part in the key
    pub column_name: String,
}

/// One column pair of a foreign-key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRow {
    /// Source (referencing) table
    pub table_name: String,
    /// Source column
    pub column_name: String,
    /// Referenced table
    pub referenced_table: String,
    /// Referenced column
    pub referenced_column: String,
}

/// All three row streams of one catalog read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRows {
    /// Column rows, in table then ordinal order
    pub columns: Vec<ColumnRow>,
    /// Primary-key column rows
    pub primary_keys: Vec<KeyColumnRow>,
    /// Foreign-key rows, ordered by source table
    pub foreign_keys: Vec<ForeignKeyRow>,
}

/// Source of catalog rows.
///
/// Implementations own their connection; each method runs one query to
/// completion before returning.
#[async_trait]
pub trait CatalogReader: Send {
    /// Column rows for every user table of the target catalog
    async fn read_columns(&mut self) -> Result<Vec<ColumnRow>>;

    /// Primary-key column rows
    async fn read_primary_keys(&mut self) -> Result<Vec<KeyColumnRow>>;

    /// Foreign-key rows, ordered by source table name
    async fn read_foreign_keys(&mut self) -> Result<Vec<ForeignKeyRow>>;

    /// Reads columns, then primary keys, then foreign keys.
    ///
    /// Stops at the first failing query; later queries are not issued.
    async fn read_all(&mut self) -> Result<CatalogRows> {
        tracing::info!("Grabbing table definitions...");
        let columns = self.read_columns().await?;
        tracing::debug!("Read {} column rows", columns.len());

        tracing::info!("Grabbing primary key definitions...");
        let primary_keys = self.read_primary_keys().await?;
        tracing::debug!("Read {} primary key rows", primary_keys.len());

        tracing::info!("Grabbing foreign key definitions...");
        let foreign_keys = self.read_foreign_keys().await?;
        tracing::debug!("Read {} foreign key rows", foreign_keys.len());

        Ok(CatalogRows {
            columns,
            primary_keys,
            foreign_keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaMapError;

    /// Records which queries ran and optionally fails one of them
    #[derive(Default)]
    struct ScriptedReader {
        fail_on: Option<&'static str>,
        issued: Vec<&'static str>,
    }

    impl ScriptedReader {
        fn step(&mut self, phase: &'static str) -> Result<()> {
            self.issued.push(phase);
            if self.fail_on == Some(phase) {
                return Err(SchemaMapError::collection_failed(
                    format!("Failed to query {}", phase),
                    std::io::Error::other("connection reset"),
                ));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogReader for ScriptedReader {
        async fn read_columns(&mut self) -> Result<Vec<ColumnRow>> {
            self.step("columns")?;
            Ok(vec![ColumnRow {
                table_name: "users".to_string(),
                column_name: "id".to_string(),
                data_type: "uuid".to_string(),
                is_nullable: "NO".to_string(),
                column_default: None,
            }])
        }

        async fn read_primary_keys(&mut self) -> Result<Vec<KeyColumnRow>> {
            self.step("primary keys")?;
            Ok(vec![KeyColumnRow {
                table_name: "users".to_string(),
                column_name: "id".to_string(),
            }])
        }

        async fn read_foreign_keys(&mut self) -> Result<Vec<ForeignKeyRow>> {
            self.step("foreign keys")?;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_read_all_runs_phases_in_order() {
        let mut reader = ScriptedReader::default();
        let rows = reader.read_all().await.unwrap();

        assert_eq!(reader.issued, ["columns", "primary keys", "foreign keys"]);
        assert_eq!(rows.columns.len(), 1);
        assert_eq!(rows.primary_keys.len(), 1);
        assert!(rows.foreign_keys.is_empty());
    }

    #[tokio::test]
    async fn test_read_all_stops_at_first_failure() {
        let mut reader = ScriptedReader {
            fail_on: Some("primary keys"),
            ..ScriptedReader::default()
        };

        let error = reader.read_all().await.unwrap_err();

        assert!(error.to_string().contains("primary keys"));
        assert_eq!(reader.issued, ["columns", "primary keys"]);
    }

    #[test]
    fn test_excluded_schemas_cover_system_catalogs() {
        for schema in ["information_schema", "pg_catalog", "crdb_internal", "pg_extension"] {
            assert!(EXCLUDED_SCHEMAS.contains(&schema));
        }
        assert!(!EXCLUDED_SCHEMAS.contains(&"public"));
    }
}
