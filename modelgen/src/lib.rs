//! # modelgen
//!
//! Generates Rust model structs from relational table descriptions.
//!
//! For every table, modelgen maps each column to a Rust field type, encodes the
//! column's constraints as `#[serde]`/`#[orm]` attributes, renders a source file
//! through a small text template and writes it, formatted, as `<table>.rs`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use modelgen::{Column, SqlType, Table};
//!
//! let table = Table::new("users")
//!     .with_column(Column::new("id", SqlType::new("bigint")).not_null().primary_key().auto_increment())
//!     .with_column(Column::new("name", SqlType::new("varchar").with_length(64)).not_null())
//!     .with_column(Column::new("created_at", SqlType::new("datetime")));
//!
//! let path = modelgen::generate_model(&table, "./app/models".as_ref())?;
//! println!("create {}", path.display());
//! # Ok::<(), modelgen::Error>(())
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod compare;
pub mod emit;
pub mod error;
pub mod imports;
pub mod model;
pub mod render;
pub mod schema;
pub mod tag;
pub mod template;
pub mod types;

// ============================================================================
// Public API Re-exports
// ============================================================================

pub use error::{Error, Result, TemplateError};
pub use model::{ColumnInfo, Model};
pub use modelgen_derive::Model;
pub use schema::{Column, Index, IndexKind, SqlType, Table};
pub use template::{Helpers, Template, Value};

use std::path::{Path, PathBuf};

/// Renders, formats and writes the model for `table` into `dir`.
///
/// Returns the path of the written file. An existing file is overwritten.
pub fn generate_model(table: &Table, dir: &Path) -> Result<PathBuf> {
    let imports = imports::collect_imports(&table.columns);
    let raw = render::render_model(table, &imports)?;
    let path = emit::emit(&raw, dir, &table.name)?;
    log::info!("create {}", path.display());
    Ok(path)
}

/// Fails with [`Error::UnknownTable`] on the first requested name missing from `known`.
pub fn ensure_tables_exist<S: AsRef<str>>(known: &[S], requested: &[S]) -> Result<()> {
    for name in requested {
        let name = name.as_ref();
        if !known.iter().any(|k| k.as_ref() == name) {
            return Err(Error::UnknownTable(name.to_string()));
        }
    }
    Ok(())
}
