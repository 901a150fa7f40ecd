//! # Model Module
//!
//! The runtime side of generated models. Every generated struct derives
//! [`Model`](macro@crate::Model), which implements this trait from the struct's
//! `#[orm(...)]` attributes.

/// Metadata for one column of a generated model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name in the database (the `serde` rename).
    pub name: &'static str,
    /// Rust field name.
    pub field: &'static str,
    /// The raw `#[orm("...")]` annotation.
    pub annotation: &'static str,
    pub is_primary_key: bool,
    pub is_nullable: bool,
    pub is_auto_increment: bool,
}

/// A struct mapped to a database table.
pub trait Model {
    /// Name of the backing table.
    fn table_name() -> &'static str;

    /// Columns in declaration order.
    fn columns() -> Vec<ColumnInfo>;

    /// The first primary key column, if any.
    fn primary_key() -> Option<ColumnInfo> {
        Self::columns().into_iter().find(|col| col.is_primary_key)
    }
}
