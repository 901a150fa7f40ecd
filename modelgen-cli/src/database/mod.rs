//! # Database Module
//!
//! Schema introspection: reads table structure from a live database and turns
//! it into [`modelgen::Table`] values.

mod mysql;

pub use mysql::MySqlIntrospector;

use modelgen::Table;

use crate::error::Result;

/// A source of table descriptions.
pub(crate) trait SchemaSource {
    /// Names of every table in the connected schema.
    async fn table_names(&self) -> Result<Vec<String>>;

    /// Columns and indexes of one table.
    async fn table(&self, name: &str) -> Result<Table>;
}
