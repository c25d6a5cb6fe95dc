//! Markup rendering of an assembled [`SchemaModel`].
//!
//! Each table becomes an entity block:
//!
//! ```html
//! <div class="ent" id="orders"><h3>orders</h3>
//! <ul class="pk">..</ul><ul class="cols">..</ul><ul class="fk">..</ul></div>
//! ```
//!
//! All three lists are always present, even when empty. Blocks are sorted by
//! table name and entries by column name; foreign keys keep catalog order.
//! Every name and annotation is HTML-escaped, so the fragment can be embedded
//! verbatim.

use crate::models::{Column, ForeignKey, SchemaModel, Table};
use askama::filters::Html;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How much detail column entries carry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    /// Column names only
    #[default]
    Terse,
    /// Names plus type, nullability and default annotations
    Full,
}

impl RenderMode {
    /// Maps the CLI `--full` switch to a mode
    pub const fn from_full_flag(full: bool) -> Self {
        if full { Self::Full } else { Self::Terse }
    }
}

/// Renders every table of the model into one markup fragment.
///
/// Source tables that only appear in the foreign-key listing get a block
/// with empty key and column lists.
pub fn render_fragment(model: &SchemaModel, mode: RenderMode) -> String {
    for orphan in model.orphan_foreign_key_tables() {
        tracing::debug!(
            "Table '{}' has foreign keys but no collected columns",
            orphan
        );
    }

    let names: BTreeSet<&str> = model
        .tables
        .keys()
        .chain(model.foreign_keys.keys())
        .map(String::as_str)
        .collect();

    let mut out = String::new();
    for name in names {
        render_entity(
            &mut out,
            name,
            model.tables.get(name),
            model.foreign_keys_of(name),
            mode,
        );
    }
    out
}

fn render_entity(
    out: &mut String,
    name: &str,
    table: Option<&Table>,
    foreign_keys: &[ForeignKey],
    mode: RenderMode,
) {
    let name = escape(name);
    out.push_str(&format!(r#"<div class="ent" id="{name}"><h3>{name}</h3>"#));

    out.push_str(r#"<ul class="pk">"#);
    for column in table.into_iter().flat_map(Table::primary_key_columns) {
        push_column_entry(out, column, &key_label(column, mode));
    }
    out.push_str("</ul>");

    out.push_str(r#"<ul class="cols">"#);
    for column in table.into_iter().flat_map(Table::other_columns) {
        push_column_entry(out, column, &column_label(column, mode));
    }
    out.push_str("</ul>");

    out.push_str(r#"<ul class="fk">"#);
    for fk in foreign_keys {
        let ref_table = escape(&fk.referenced_table);
        let ref_column = escape(&fk.referenced_column);
        out.push_str(&format!(
            r#"<li data-column="{}" data-ref-table="{ref_table}" data-ref-column="{ref_column}">{ref_table}.{ref_column}</li>"#,
            escape(&fk.column)
        ));
    }
    out.push_str("</ul>");

    out.push_str("</div>\n");
}

fn push_column_entry(out: &mut String, column: &Column, label: &str) {
    out.push_str(&format!(
        r#"<li data-column="{}">{}</li>"#,
        escape(&column.name),
        escape(label)
    ));
}

/// Primary-key entry text: full mode adds type and default
fn key_label(column: &Column, mode: RenderMode) -> String {
    let mut label = column.name.clone();
    if mode == RenderMode::Full {
        push_type(&mut label, column);
        push_default(&mut label, column);
    }
    label
}

/// Non-key entry text: full mode adds type, nullability and default
fn column_label(column: &Column, mode: RenderMode) -> String {
    let mut label = column.name.clone();
    if mode == RenderMode::Full {
        push_type(&mut label, column);
        if column.is_nullable {
            label.push_str(" (Nullable)");
        }
        push_default(&mut label, column);
    }
    label
}

fn push_type(label: &mut String, column: &Column) {
    if !column.data_type.is_empty() {
        label.push(' ');
        label.push_str(&column.data_type);
    }
}

fn push_default(label: &mut String, column: &Column) {
    if let Some(default) = &column.default_value {
        label.push_str(&format!(" (Default: {})", default));
    }
}

/// Escapes text for element content and double-quoted attributes
fn escape(text: &str) -> String {
    askama::filters::escape(text, Html)
        .map(|safe| safe.to_string())
        .unwrap_or_default()
}
