//! # Types Module
//!
//! Maps SQL column types to the Rust types used in generated models.

use std::fmt;

use crate::schema::{Column, SqlType};

/// Name rendered for raw byte columns instead of the generic `Vec<u8>`.
pub const BYTES_TYPE: &str = "serde_bytes::ByteBuf";

/// Rust type a SQL column resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RustType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    Vec(Box<RustType>),
}

impl RustType {
    /// Whether the type comes from the temporal package.
    pub fn is_temporal(&self) -> bool {
        matches!(self, RustType::NaiveDate | RustType::NaiveTime | RustType::NaiveDateTime)
    }

    /// The `use` path the generated file needs for this type, if any.
    pub fn import_path(&self) -> Option<&'static str> {
        match self {
            RustType::NaiveDate => Some("chrono::NaiveDate"),
            RustType::NaiveTime => Some("chrono::NaiveTime"),
            RustType::NaiveDateTime => Some("chrono::NaiveDateTime"),
            _ => None,
        }
    }

    /// Whether the type is a plain sequence of bytes.
    pub fn is_bytes(&self) -> bool {
        matches!(self, RustType::Vec(inner) if **inner == RustType::U8)
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RustType::Bool => f.write_str("bool"),
            RustType::I8 => f.write_str("i8"),
            RustType::I16 => f.write_str("i16"),
            RustType::I32 => f.write_str("i32"),
            RustType::I64 => f.write_str("i64"),
            RustType::U8 => f.write_str("u8"),
            RustType::U16 => f.write_str("u16"),
            RustType::U32 => f.write_str("u32"),
            RustType::U64 => f.write_str("u64"),
            RustType::F32 => f.write_str("f32"),
            RustType::F64 => f.write_str("f64"),
            RustType::String => f.write_str("String"),
            RustType::NaiveDate => f.write_str("NaiveDate"),
            RustType::NaiveTime => f.write_str("NaiveTime"),
            RustType::NaiveDateTime => f.write_str("NaiveDateTime"),
            RustType::Vec(inner) => write!(f, "Vec<{inner}>"),
        }
    }
}

/// Maps a SQL type to its Rust counterpart.
///
/// Unknown types fall back to `String`.
pub fn sql_type_to_rust(sql_type: &SqlType) -> RustType {
    match sql_type.name.as_str() {
        "BIT" | "BOOL" | "BOOLEAN" => RustType::Bool,
        "TINYINT" => RustType::I8,
        "SMALLINT" | "YEAR" => RustType::I16,
        "MEDIUMINT" | "INT" | "INTEGER" | "SERIAL" => RustType::I32,
        "BIGINT" | "BIGSERIAL" => RustType::I64,
        "UNSIGNED TINYINT" => RustType::U8,
        "UNSIGNED SMALLINT" => RustType::U16,
        "UNSIGNED MEDIUMINT" | "UNSIGNED INT" | "UNSIGNED INTEGER" => RustType::U32,
        "UNSIGNED BIGINT" => RustType::U64,
        "FLOAT" | "REAL" | "UNSIGNED FLOAT" | "UNSIGNED REAL" => RustType::F32,
        "DOUBLE" | "DOUBLE PRECISION" | "UNSIGNED DOUBLE" => RustType::F64,
        "DATE" => RustType::NaiveDate,
        "TIME" => RustType::NaiveTime,
        "DATETIME" | "SMALLDATETIME" | "TIMESTAMP" | "TIMESTAMPZ" => RustType::NaiveDateTime,
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BYTEA" => {
            RustType::Vec(Box::new(RustType::U8))
        }
        // DECIMAL and NUMERIC stay textual.
        _ => RustType::String,
    }
}

/// Rust type name for a SQL type, rendering byte sequences as [`BYTES_TYPE`].
pub fn type_string(sql_type: &SqlType) -> String {
    let ty = sql_type_to_rust(sql_type);
    if ty.is_bytes() {
        return BYTES_TYPE.to_string();
    }
    ty.to_string()
}

/// Field type for a column: nullable non-key columns are wrapped in `Option`.
pub fn field_type(col: &Column) -> String {
    let ty = type_string(&col.sql_type);
    if col.nullable && !col.is_primary_key {
        format!("Option<{ty}>")
    } else {
        ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_types() {
        assert_eq!(type_string(&SqlType::new("bigint")), "i64");
        assert_eq!(type_string(&SqlType::new("UNSIGNED INT")), "u32");
        assert_eq!(type_string(&SqlType::new("varchar").with_length(64)), "String");
        assert_eq!(type_string(&SqlType::new("double")), "f64");
        assert_eq!(type_string(&SqlType::new("datetime")), "NaiveDateTime");
        assert_eq!(type_string(&SqlType::new("date")), "NaiveDate");
        assert_eq!(type_string(&SqlType::new("decimal").with_lengths(10, 2)), "String");
    }

    #[test]
    fn unsigned_floating_point_maps_like_signed() {
        assert_eq!(type_string(&SqlType::new("UNSIGNED DOUBLE")), "f64");
        assert_eq!(type_string(&SqlType::new("UNSIGNED FLOAT")), "f32");
        assert_eq!(type_string(&SqlType::new("UNSIGNED DECIMAL")), "String");
    }

    #[test]
    fn unknown_types_fall_back_to_string() {
        assert_eq!(sql_type_to_rust(&SqlType::new("GEOMETRY")), RustType::String);
    }

    #[test]
    fn byte_sequences_use_the_byte_buffer_type() {
        let blob = SqlType::new("blob");
        assert_eq!(sql_type_to_rust(&blob).to_string(), "Vec<u8>");
        assert_eq!(type_string(&blob), BYTES_TYPE);
    }

    #[test]
    fn nullable_columns_become_options() {
        let col = Column::new("age", SqlType::new("int"));
        assert_eq!(field_type(&col), "Option<i32>");
        assert_eq!(field_type(&col.clone().not_null()), "i32");
        assert_eq!(field_type(&col.primary_key()), "i32");
    }
}
