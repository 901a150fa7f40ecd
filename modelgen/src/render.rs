//! # Render Module
//!
//! Binds a table to the bundled model template and produces raw (unformatted)
//! Rust source.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::schema::Table;
use crate::template::{Helpers, Template, Value};

/// The bundled model template.
pub const MODEL_TEMPLATE: &str = include_str!("../templates/model.rs.tpl");

/// Name of the module generated models are documented as belonging to.
pub const PACKAGE: &str = "models";

/// Builds the data a model template is executed against.
///
/// Dot carries `package`, `imports` (an identity map of `use` paths) and
/// `tables`, a list holding the one table being generated.
pub fn model_data<'a>(table: &'a Table, imports: &BTreeMap<String, String>) -> Value<'a> {
    let imports = imports.iter().map(|(key, path)| (key.clone(), Value::from(path.as_str()))).collect();

    let mut data = BTreeMap::new();
    data.insert("package".to_string(), Value::from(PACKAGE));
    data.insert("imports".to_string(), Value::Map(imports));
    data.insert("tables".to_string(), Value::List(vec![Value::Table(table)]));
    Value::Map(data)
}

/// Renders the model for `table` with the builtin helpers.
pub fn render_model(table: &Table, imports: &BTreeMap<String, String>) -> Result<String> {
    let template = Template::parse("model", MODEL_TEMPLATE)?;
    log::debug!("rendering template {} for table {}", template.name(), table.name);
    template.render(&model_data(table, imports), &Helpers::builtin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::collect_imports;
    use crate::schema::{Column, SqlType};

    #[test]
    fn bundled_template_parses() -> Result<()> {
        assert_eq!(Template::parse("model", MODEL_TEMPLATE)?.name(), "model");
        Ok(())
    }

    #[test]
    fn use_block_only_when_needed() -> Result<()> {
        let plain = Table::new("tags").with_column(Column::new("id", SqlType::new("bigint")).not_null().primary_key());
        let raw = render_model(&plain, &collect_imports(&plain.columns))?;
        assert!(!raw.contains("use chrono"));
        assert!(raw.contains("pub struct Tags {"));

        let dated = plain.with_column(Column::new("created_at", SqlType::new("datetime")));
        let raw = render_model(&dated, &collect_imports(&dated.columns))?;
        assert!(raw.contains("use chrono::NaiveDateTime;"));
        assert!(raw.contains("pub created_at: Option<NaiveDateTime>,"));
        Ok(())
    }
}
