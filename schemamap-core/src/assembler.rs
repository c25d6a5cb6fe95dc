//! Schema assembly: merges the three catalog row streams into a [`SchemaModel`].
//!
//! The merge runs in three phases and the order matters:
//! 1. column rows create tables lazily and insert columns (last write wins),
//! 2. key-column rows set the primary-key flag on existing columns,
//! 3. foreign-key rows are appended per source table in arrival order.
//!
//! Because phase 2 runs strictly after phase 1, a column re-scanned in
//! phase 1 never loses its primary-key flag.

use crate::catalog::{CatalogRows, ColumnRow, ForeignKeyRow, KeyColumnRow};
use crate::models::{Column, ForeignKey, SchemaModel, Table};

impl From<&ColumnRow> for Column {
    fn from(row: &ColumnRow) -> Self {
        Self {
            name: row.column_name.clone(),
            data_type: row.data_type.clone(),
            is_nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            default_value: row.column_default.clone().filter(|d| !d.is_empty()),
            is_primary_key: false,
        }
    }
}

impl From<&ForeignKeyRow> for ForeignKey {
    fn from(row: &ForeignKeyRow) -> Self {
        Self {
            column: row.column_name.clone(),
            referenced_table: row.referenced_table.clone(),
            referenced_column: row.referenced_column.clone(),
        }
    }
}

/// Builds a fresh model from one catalog read
pub fn assemble(rows: &CatalogRows) -> SchemaModel {
    let mut model = SchemaModel::new();
    model.merge_columns(&rows.columns);
    model.mark_primary_keys(&rows.primary_keys);
    model.append_foreign_keys(&rows.foreign_keys);

    tracing::debug!(
        "Assembled {} tables, {} columns, {} foreign keys",
        model.table_count(),
        model.column_count(),
        model.foreign_key_count()
    );

    model
}

impl SchemaModel {
    /// Phase 1: inserts or replaces each column under its table.
    ///
    /// A table entry is created the first time one of its columns is seen.
    pub fn merge_columns(&mut self, rows: &[ColumnRow]) {
        for row in rows {
            let column = Column::from(row);
            self.tables
                .entry(row.table_name.clone())
                .or_insert_with(|| Table::new(&row.table_name))
                .columns
                .insert(column.name.clone(), column);
        }
    }

    /// Phase 2: flags key columns as primary key.
    ///
    /// A row naming an unknown table or column gets a placeholder column
    /// carrying only the flag, so the key still shows up in the rendering.
    pub fn mark_primary_keys(&mut self, rows: &[KeyColumnRow]) {
        for row in rows {
            let table = self
                .tables
                .entry(row.table_name.clone())
                .or_insert_with(|| Table::new(&row.table_name));

            match table.columns.get_mut(&row.column_name) {
                Some(column) => column.is_primary_key = true,
                None => {
                    tracing::warn!(
                        "Primary key column '{}.{}' was not in the column listing, adding placeholder",
                        row.table_name,
                        row.column_name
                    );
                    table.columns.insert(
                        row.column_name.clone(),
                        Column::primary_key_placeholder(&row.column_name),
                    );
                }
            }
        }
    }

    /// Phase 3: appends foreign keys to their source table's list
    pub fn append_foreign_keys(&mut self, rows: &[ForeignKeyRow]) {
        for row in rows {
            self.foreign_keys
                .entry(row.table_name.clone())
                .or_default()
                .push(ForeignKey::from(row));
        }
    }
}
