//! In-memory relational model assembled from catalog rows.
//!
//! Tables and columns live in ordered maps, so iteration (and therefore the
//! rendered page) is sorted by name and stable across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Database column information
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,
    /// Declared type as reported by the catalog, e.g. `character varying`
    pub data_type: String,
    /// Whether the column accepts NULL
    pub is_nullable: bool,
    /// Default expression; `None` when the catalog reports none
    pub default_value: Option<String>,
    /// Set by the key-column pass
    pub is_primary_key: bool,
}

impl Column {
    /// Creates a column with only its name and the primary-key flag set.
    ///
    /// Used when a key-column row names a column the column pass never saw.
    pub fn primary_key_placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_primary_key: true,
            ..Self::default()
        }
    }
}

/// Database table information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Unqualified table name
    pub name: String,
    /// Columns keyed by name
    pub columns: BTreeMap<String, Column>,
}

impl Table {
    /// Creates a table with an empty column map
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Columns flagged as part of the primary key, in column-name order
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values().filter(|c| c.is_primary_key)
    }

    /// Columns outside the primary key, in column-name order
    pub fn other_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values().filter(|c| !c.is_primary_key)
    }
}

/// Outgoing foreign key of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Source column in the owning table
    pub column: String,
    /// Table the key points at
    pub referenced_table: String,
    /// Column the key points at
    pub referenced_column: String,
}

/// Assembled schema: tables by name plus foreign keys by source table name.
///
/// Foreign keys are not owned by [`Table`]; a source table name may have
/// foreign keys without any columns having been collected for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaModel {
    /// Tables keyed by name
    pub tables: BTreeMap<String, Table>,
    /// Outgoing foreign keys keyed by source table name, in catalog order
    pub foreign_keys: BTreeMap<String, Vec<ForeignKey>>,
}

impl SchemaModel {
    /// Creates an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Foreign keys recorded for `table_name`, empty when there are none
    pub fn foreign_keys_of(&self, table_name: &str) -> &[ForeignKey] {
        self.foreign_keys
            .get(table_name)
            .map_or(&[], Vec::as_slice)
    }

    /// Source tables that have foreign keys but no collected columns
    pub fn orphan_foreign_key_tables(&self) -> impl Iterator<Item = &str> {
        self.foreign_keys
            .keys()
            .filter(|name| !self.tables.contains_key(name.as_str()))
            .map(String::as_str)
    }

    /// Number of tables with at least one column
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.values().map(|t| t.columns.len()).sum()
    }

    /// Number of foreign-key entries across all tables
    pub fn foreign_key_count(&self) -> usize {
        self.foreign_keys.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, pk: bool) -> Column {
        Column {
            name: name.to_string(),
            data_type: "text".to_string(),
            is_nullable: false,
            default_value: None,
            is_primary_key: pk,
        }
    }

    #[test]
    fn test_primary_key_placeholder() {
        let placeholder = Column::primary_key_placeholder("id");
        assert_eq!(placeholder.name, "id");
        assert!(placeholder.is_primary_key);
        assert!(placeholder.data_type.is_empty());
        assert!(!placeholder.is_nullable);
        assert!(placeholder.default_value.is_none());
    }

    #[test]
    fn test_table_splits_key_and_other_columns() {
        let mut table = Table::new("users");
        for c in [column("name", false), column("id", true), column("email", false)] {
            table.columns.insert(c.name.clone(), c);
        }

        let keys: Vec<_> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
        let others: Vec<_> = table.other_columns().map(|c| c.name.as_str()).collect();

        assert_eq!(keys, ["id"]);
        assert_eq!(others, ["email", "name"]);
    }

    #[test]
    fn test_foreign_keys_of_missing_table_is_empty() {
        let model = SchemaModel::new();
        assert!(model.foreign_keys_of("users").is_empty());
    }

    #[test]
    fn test_orphan_foreign_key_tables() {
        let mut model = SchemaModel::new();
        model.tables.insert("users".to_string(), Table::new("users"));
        for source in ["users", "audit"] {
            model.foreign_keys.entry(source.to_string()).or_default().push(ForeignKey {
                column: "user_id".to_string(),
                referenced_table: "users".to_string(),
                referenced_column: "id".to_string(),
            });
        }

        let orphans: Vec<_> = model.orphan_foreign_key_tables().collect();
        assert_eq!(orphans, ["audit"]);
        assert_eq!(model.foreign_key_count(), 2);
    }

    #[test]
    fn test_model_serializes_with_named_maps() {
        let mut model = SchemaModel::new();
        let mut table = Table::new("users");
        table.columns.insert("id".to_string(), column("id", true));
        model.tables.insert("users".to_string(), table);

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["tables"]["users"]["columns"]["id"]["is_primary_key"], true);
        assert!(value["foreign_keys"].as_object().unwrap().is_empty());
    }
}
