//! Helper utilities for catalog row decoding.

use crate::{Result, error::SchemaMapError};
use sqlx::{Row, postgres::PgRow};

/// Extension trait for extracting typed values from database rows
/// with consistent error handling.
///
/// # Example
/// ```rust,ignore
/// use schemamap_core::catalog::helpers::RowExt;
///
/// let name: String = row.get_field("column_name", Some("columns"))?;
/// let default: Option<String> = row.get_field("column_default", None)?;
/// ```
pub trait RowExt {
    /// Extracts a typed field from the row with proper error context.
    ///
    /// # Arguments
    /// * `field_name` - Name of the column to extract
    /// * `phase` - Optional catalog phase for error messages
    fn get_field<'r, T>(&'r self, field_name: &str, phase: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>;
}

impl RowExt for PgRow {
    fn get_field<'r, T>(&'r self, field_name: &str, phase: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        self.try_get(field_name)
            .map_err(|e| SchemaMapError::parse_field(field_name, phase, e))
    }
}

/// Maps a failed catalog query to a collection or privilege error.
///
/// SQLSTATE `42501` (insufficient_privilege) names the catalog view that
/// could not be read.
pub fn map_query_error(error: sqlx::Error, resource: &str) -> SchemaMapError {
    match &error {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("42501") => {
            SchemaMapError::insufficient_privileges(format!(
                "Cannot access {} - insufficient privileges",
                resource
            ))
        }
        _ => SchemaMapError::collection_failed(format!("Failed to query {}", resource), error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_query_error_names_resource() {
        let error = map_query_error(sqlx::Error::RowNotFound, "information_schema.columns");
        assert!(matches!(error, SchemaMapError::Collection { .. }));
        assert!(error.to_string().contains("information_schema.columns"));
    }
}
