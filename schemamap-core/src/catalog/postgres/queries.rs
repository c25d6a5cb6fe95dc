//! `information_schema` queries for the three catalog row streams.
//!
//! Every identifier column is cast to `text`; the catalog reports them as
//! `sql_identifier` / `character_data` domains.

use super::PostgresCatalog;
use crate::Result;
use crate::catalog::helpers::{RowExt, map_query_error};
use crate::catalog::{CatalogReader, ColumnRow, EXCLUDED_SCHEMAS, ForeignKeyRow, KeyColumnRow};
use async_trait::async_trait;

/// Columns of every user table in the catalog bound to `$1`.
///
/// `$2` is the list of excluded schemas.
pub const COLUMNS_QUERY: &str = r#"
    SELECT
        c.table_name::text AS table_name,
        c.column_name::text AS column_name,
        c.data_type::text AS data_type,
        c.is_nullable::text AS is_nullable,
        c.column_default::text AS column_default
    FROM information_schema.columns c
    WHERE c.table_catalog::text = $1
    AND NOT (c.table_schema::text = ANY($2))
    ORDER BY c.table_name, c.ordinal_position
"#;

/// Key-column usage of `PRIMARY KEY` constraints
pub const PRIMARY_KEYS_QUERY: &str = r#"
    SELECT
        kcu.table_name::text AS table_name,
        kcu.column_name::text AS column_name
    FROM information_schema.table_constraints AS tc
        JOIN information_schema.key_column_usage AS kcu
            USING (constraint_catalog, constraint_schema, constraint_name)
    WHERE tc.constraint_type = 'PRIMARY KEY'
    AND kcu.table_catalog::text = $1
    AND NOT (kcu.table_schema::text = ANY($2))
    ORDER BY kcu.table_name, kcu.ordinal_position
"#;

/// Foreign-key column pairs, joined on constraint identity
pub const FOREIGN_KEYS_QUERY: &str = r#"
    SELECT
        tc.table_name::text AS table_name,
        kcu.column_name::text AS column_name,
        ccu.table_name::text AS referenced_table,
        ccu.column_name::text AS referenced_column
    FROM information_schema.table_constraints AS tc
        JOIN information_schema.key_column_usage AS kcu
            USING (constraint_catalog, constraint_schema, constraint_name)
        JOIN information_schema.constraint_column_usage AS ccu
            USING (constraint_catalog, constraint_schema, constraint_name)
    WHERE tc.constraint_type = 'FOREIGN KEY'
    AND tc.table_catalog::text = $1
    AND NOT (tc.table_schema::text = ANY($2))
    ORDER BY tc.table_name, kcu.ordinal_position
"#;

fn excluded_schemas() -> Vec<String> {
    EXCLUDED_SCHEMAS.iter().map(|s| (*s).to_string()).collect()
}

#[async_trait]
impl CatalogReader for PostgresCatalog {
    async fn read_columns(&mut self) -> Result<Vec<ColumnRow>> {
        let rows = sqlx::query(COLUMNS_QUERY)
            .bind(self.database.as_str())
            .bind(excluded_schemas())
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| map_query_error(e, "information_schema.columns"))?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            columns.push(ColumnRow {
                table_name: row.get_field("table_name", Some("column"))?,
                column_name: row.get_field("column_name", Some("column"))?,
                data_type: row.get_field("data_type", Some("column"))?,
                is_nullable: row.get_field("is_nullable", Some("column"))?,
                column_default: row.get_field("column_default", Some("column"))?,
            });
        }

        Ok(columns)
    }

    async fn read_primary_keys(&mut self) -> Result<Vec<KeyColumnRow>> {
        let rows = sqlx::query(PRIMARY_KEYS_QUERY)
            .bind(self.database.as_str())
            .bind(excluded_schemas())
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| map_query_error(e, "information_schema.key_column_usage"))?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in &rows {
            keys.push(KeyColumnRow {
                table_name: row.get_field("table_name", Some("primary key"))?,
                column_name: row.get_field("column_name", Some("primary key"))?,
            });
        }

        Ok(keys)
    }

    async fn read_foreign_keys(&mut self) -> Result<Vec<ForeignKeyRow>> {
        let rows = sqlx::query(FOREIGN_KEYS_QUERY)
            .bind(self.database.as_str())
            .bind(excluded_schemas())
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| map_query_error(e, "information_schema.table_constraints"))?;

        let mut foreign_keys = Vec::with_capacity(rows.len());
        for row in &rows {
            foreign_keys.push(ForeignKeyRow {
                table_name: row.get_field("table_name", Some("foreign key"))?,
                column_name: row.get_field("column_name", Some("foreign key"))?,
                referenced_table: row.get_field("referenced_table", Some("foreign key"))?,
                referenced_column: row.get_field("referenced_column", Some("foreign key"))?,
            });
        }

        Ok(foreign_keys)
    }
}
