//! # Schema Module
//!
//! The introspected object graph the generator works from: a [`Table`] owns its
//! ordered [`Column`]s and its [`Index`]es. The graph is built once per run by the
//! introspection layer and is read-only afterwards.

use std::collections::{HashMap, HashSet};

// ============================================================================
// SQL Type Descriptor
// ============================================================================

/// SQL type names treated as temporal values.
const TIME_TYPES: &[&str] = &["DATE", "DATETIME", "SMALLDATETIME", "TIME", "TIMESTAMP", "TIMESTAMPZ"];

/// SQL type names whose default values are textual literals.
const TEXT_TYPES: &[&str] = &[
    "CHAR", "VARCHAR", "NCHAR", "NVARCHAR", "TINYTEXT", "TEXT", "NTEXT", "MEDIUMTEXT", "LONGTEXT", "ENUM",
    "SET", "JSON", "UUID",
];

/// The declared type of a column as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqlType {
    /// Upper-case base type name (e.g. "VARCHAR", "UNSIGNED BIGINT").
    pub name: String,
    /// Primary length, e.g. `64` in `VARCHAR(64)` or the precision of a `DECIMAL`.
    pub length: Option<u64>,
    /// Secondary length, e.g. the scale of a `DECIMAL(10,2)`.
    pub length2: Option<u64>,
}

impl SqlType {
    /// Creates a descriptor with no lengths. The name is upper-cased.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self { name: name.as_ref().trim().to_uppercase(), length: None, length2: None }
    }

    pub fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_lengths(mut self, length: u64, length2: u64) -> Self {
        self.length = Some(length);
        self.length2 = Some(length2);
        self
    }

    /// Whether the type stores a date, a time or both.
    pub fn is_time(&self) -> bool {
        TIME_TYPES.contains(&self.name.as_str())
    }

    /// Whether the type stores character data.
    pub fn is_text(&self) -> bool {
        TEXT_TYPES.contains(&self.name.as_str())
    }
}

// ============================================================================
// Column
// ============================================================================

/// A single column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// The column name in the database, used verbatim as the serialization key.
    pub name: String,
    /// The declared SQL type.
    pub sql_type: SqlType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is part of the primary key.
    pub is_primary_key: bool,
    /// Whether the column is filled by an auto-increment sequence.
    pub is_auto_increment: bool,
    /// Default value expression; empty when the column has none.
    pub default: String,
    /// Column comment; empty when the column has none.
    pub comment: String,
    /// Allowed values of an `ENUM` column, unordered as reported.
    pub enum_options: HashSet<String>,
    /// Allowed values of a `SET` column, unordered as reported.
    pub set_options: HashSet<String>,
    /// Names of the indexes this column participates in.
    pub indexes: HashSet<String>,
}

impl Column {
    /// Creates a nullable column with no default, comment or index membership.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            nullable: true,
            is_primary_key: false,
            is_auto_increment: false,
            default: String::new(),
            comment: String::new(),
            enum_options: HashSet::new(),
            set_options: HashSet::new(),
            indexes: HashSet::new(),
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn enum_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_options = options.into_iter().map(Into::into).collect();
        self
    }
}

// ============================================================================
// Index
// ============================================================================

/// Whether an index enforces uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Unique,
    Plain,
}

/// A named index over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    pub kind: IndexKind,
    /// Participating column names, in index order.
    pub cols: Vec<String>,
}

impl Index {
    pub fn new<I, S>(name: impl Into<String>, kind: IndexKind, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { name: name.into(), kind, cols: cols.into_iter().map(Into::into).collect() }
    }

    pub fn is_composite(&self) -> bool {
        self.cols.len() > 1
    }
}

// ============================================================================
// Table
// ============================================================================

/// A table with its columns in declaration order and its indexes by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub indexes: HashMap<String, Index>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), columns: Vec::new(), indexes: HashMap::new() }
    }

    /// Appends a column. Field order of the generated model follows insertion order.
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Registers an index and records its membership on every participating column.
    pub fn add_index(&mut self, index: Index) {
        for col_name in &index.cols {
            if let Some(col) = self.columns.iter_mut().find(|c| &c.name == col_name) {
                col.indexes.insert(index.name.clone());
            }
        }
        self.indexes.insert(index.name.clone(), index);
    }

    /// Builder-style variant of [`Table::add_column`].
    pub fn with_column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    /// Builder-style variant of [`Table::add_index`]. Columns must be added first.
    pub fn with_index(mut self, index: Index) -> Self {
        self.add_index(index);
        self
    }
}
