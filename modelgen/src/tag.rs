//! # Tag Module
//!
//! Builds the attribute string attached to every generated field: the
//! `#[serde(rename = "...")]` serialization key followed by the `#[orm("...")]`
//! persistence annotation.
//!
//! The annotation is a space-separated token list in a fixed order. Every
//! unordered input (index membership, enum and set domains) is sorted first so
//! that an unchanged schema always yields the same text.

use crate::schema::{Column, IndexKind, Table};
use crate::types::type_string;

/// Builds the complete attribute string for `col`.
pub fn tag(table: &Table, col: &Column) -> String {
    let annotation = annotation(table, col);

    let mut tags = vec![format!("#[serde(rename = \"{}\")]", col.name)];
    if !annotation.is_empty() {
        tags.push(format!("#[orm(\"{annotation}\")]"));
    }
    tags.join(" ")
}

/// Builds only the persistence annotation payload, e.g. `not null pk BIGINT(20)`.
pub fn annotation(table: &Table, col: &Column) -> String {
    let is_id_pk = col.name == "Id" && type_string(&col.sql_type) == "i64";

    let mut res: Vec<String> = Vec::new();
    if !col.nullable && !is_id_pk {
        res.push("not null".to_string());
    }
    if col.is_primary_key {
        res.push("pk".to_string());
    }
    if !col.default.is_empty() {
        res.push(format!("default {}", col.default));
    }
    if col.is_auto_increment {
        res.push("autoincr".to_string());
    }

    if col.sql_type.is_time() {
        match col.name.as_str() {
            "created_at" => res.push("created".to_string()),
            "updated_at" => res.push("updated".to_string()),
            "deleted_at" => res.push("deleted".to_string()),
            _ => {}
        }
    }

    if !col.comment.is_empty() {
        res.push(format!("comment('{}')", col.comment));
    }

    let mut names: Vec<&String> = col.indexes.iter().collect();
    names.sort();
    for name in names {
        let Some(index) = table.indexes.get(name) else {
            continue;
        };
        let mut token = match index.kind {
            IndexKind::Unique => "unique".to_string(),
            IndexKind::Plain => "index".to_string(),
        };
        if index.is_composite() {
            token.push_str(&format!("({})", index.name));
        }
        res.push(token);
    }

    let descriptor = type_descriptor(col);
    if !descriptor.is_empty() {
        res.push(descriptor);
    }

    res.join(" ")
}

/// The SQL type token: base name plus lengths or the sorted value domain.
fn type_descriptor(col: &Column) -> String {
    let mut nstr = col.sql_type.name.clone();
    match (col.sql_type.length, col.sql_type.length2) {
        (Some(len), Some(len2)) => nstr.push_str(&format!("({len},{len2})")),
        (Some(len), None) => nstr.push_str(&format!("({len})")),
        _ if !col.enum_options.is_empty() => nstr.push_str(&quoted_options(&col.enum_options)),
        _ if !col.set_options.is_empty() => nstr.push_str(&quoted_options(&col.set_options)),
        _ => {}
    }
    nstr
}

fn quoted_options<'a>(options: impl IntoIterator<Item = &'a String>) -> String {
    let mut sorted: Vec<&String> = options.into_iter().collect();
    sorted.sort();
    let quoted: Vec<String> = sorted.iter().map(|v| format!("'{v}'")).collect();
    format!("({})", quoted.join(","))
}
