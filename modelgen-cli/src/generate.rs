//! Drives one `model` run: check the requested tables, then generate each one.

use std::path::PathBuf;

use crate::config::GenerateOptions;
use crate::database::SchemaSource;
use crate::error::Result;

/// Generates a model file for every requested table, in the order given.
///
/// All tables are checked against the schema before anything is written. The
/// run stops at the first failure; files already written are kept.
pub(crate) async fn run<S: SchemaSource>(source: &S, options: &GenerateOptions) -> Result<Vec<PathBuf>> {
    let known = source.table_names().await?;
    modelgen::ensure_tables_exist(&known, &options.tables)?;

    let mut written = Vec::with_capacity(options.tables.len());
    for name in &options.tables {
        let table = source.table(name).await?;
        written.push(modelgen::generate_model(&table, &options.dir)?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use modelgen::{Column, SqlType, Table};

    use super::*;
    use crate::error::AppError;

    struct StaticSchema {
        tables: BTreeMap<String, Table>,
    }

    impl StaticSchema {
        fn new(tables: impl IntoIterator<Item = Table>) -> Self {
            Self { tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect() }
        }
    }

    impl SchemaSource for StaticSchema {
        async fn table_names(&self) -> Result<Vec<String>> {
            Ok(self.tables.keys().cloned().collect())
        }

        async fn table(&self, name: &str) -> Result<Table> {
            self.tables.get(name).cloned().ok_or_else(|| AppError::Config(format!("no table {name}")))
        }
    }

    fn schema() -> StaticSchema {
        StaticSchema::new([
            Table::new("users")
                .with_column(Column::new("id", SqlType::new("bigint")).not_null().primary_key())
                .with_column(Column::new("email", SqlType::new("varchar").with_length(128)).not_null()),
            Table::new("posts")
                .with_column(Column::new("id", SqlType::new("bigint")).not_null().primary_key())
                .with_column(Column::new("published_at", SqlType::new("datetime"))),
        ])
    }

    #[tokio::test]
    async fn writes_one_file_per_table() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let options = GenerateOptions::new("posts,users", dir.path())?;

        let written = run(&schema(), &options).await?;
        assert_eq!(written, vec![dir.path().join("posts.rs"), dir.path().join("users.rs")]);
        assert!(std::fs::read_to_string(&written[0])?.contains("pub struct Posts {"));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_tables_fail_before_writing() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let options = GenerateOptions::new("users,ghosts", dir.path())?;

        let result = run(&schema(), &options).await;
        assert!(matches!(result, Err(AppError::Generate(modelgen::Error::UnknownTable(ref t))) if t == "ghosts"));
        assert!(!dir.path().join("users.rs").exists());
        Ok(())
    }
}
