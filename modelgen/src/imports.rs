//! # Imports Module
//!
//! Determines the `use` paths a generated model needs.

use std::collections::BTreeMap;

use crate::schema::Column;
use crate::types::sql_type_to_rust;

/// Collects the import paths required by `columns`, as an identity map.
///
/// Only temporal types need an import; everything else is either a primitive,
/// a prelude type or rendered fully qualified.
pub fn collect_imports(columns: &[Column]) -> BTreeMap<String, String> {
    let mut imports = BTreeMap::new();
    for col in columns {
        let ty = sql_type_to_rust(&col.sql_type);
        if let Some(path) = ty.import_path() {
            imports.insert(path.to_string(), path.to_string());
        }
    }
    imports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SqlType;

    #[test]
    fn temporal_columns_require_chrono() {
        let columns = vec![
            Column::new("id", SqlType::new("bigint")),
            Column::new("created_at", SqlType::new("datetime")),
            Column::new("updated_at", SqlType::new("datetime")),
            Column::new("birthday", SqlType::new("date")),
        ];
        let imports = collect_imports(&columns);
        let keys: Vec<&str> = imports.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["chrono::NaiveDate", "chrono::NaiveDateTime"]);
        assert_eq!(imports["chrono::NaiveDate"], "chrono::NaiveDate");
    }

    #[test]
    fn plain_columns_need_nothing() {
        let columns = vec![Column::new("payload", SqlType::new("blob")), Column::new("n", SqlType::new("int"))];
        assert!(collect_imports(&columns).is_empty());
    }
}
