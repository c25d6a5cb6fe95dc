//! Core library for schemamap.
//!
//! Reads a PostgreSQL-family catalog, assembles tables, columns and keys into
//! one relational model, and renders that model as HTML entity blocks. The
//! `schemamap` binary wraps this in a CLI and a page template.
//!
//! # Pipeline
//! The flow is strictly linear and every step is fatal on error:
//! - [`catalog`]: three catalog queries (columns, primary keys, foreign keys)
//! - [`assembler`]: three-phase merge into a [`SchemaModel`]
//! - [`render`]: deterministic markup fragment
//!
//! # Read-only Guarantees
//! - Only `information_schema` views are queried
//! - Sessions are switched to read-only before the first query
//! - Connection strings are redacted in logs and errors

pub mod assembler;
pub mod catalog;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod validation;

// Re-export commonly used types
pub use assembler::assemble;
pub use catalog::{CatalogReader, CatalogRows, ColumnRow, ForeignKeyRow, KeyColumnRow};
pub use error::{Result, SchemaMapError};
pub use logging::init_logging;
pub use models::{Column, ForeignKey, SchemaModel, Table};
pub use render::{RenderMode, render_fragment};
pub use validation::{ConnectionTarget, validate_connection_string};

#[cfg(feature = "postgresql")]
pub use catalog::PostgresCatalog;
