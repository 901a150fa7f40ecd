use std::fs;

use modelgen::{Column, Index, IndexKind, SqlType, Table, generate_model};

const MAIN: &str = r#"
use modelgen::Model;

fn main() {
    assert_eq!(users::Users::table_name(), "users");
    assert_eq!(users::Users::columns().len(), 3);
    assert_eq!(users::Users::primary_key().map(|col| col.name), Some("id"));
    assert_eq!(users::users_fields::CREATED_AT, "created_at");

    let user = users::Users { id: 1, name: "ada".to_string(), created_at: None };
    assert_eq!(user.clone(), user);

    let columns = posts::Posts::columns();
    let kind = columns.iter().find(|col| col.field == "type").map(|col| col.name);
    assert_eq!(kind, Some("type"));
    assert!(columns.iter().all(|col| col.annotation.len() > 0));

    assert_eq!(keyword::Self_::table_name(), "self");
}
"#;

fn users() -> Table {
    Table::new("users")
        .with_column(
            Column::new("id", SqlType::new("bigint").with_length(20)).not_null().primary_key().auto_increment(),
        )
        .with_column(Column::new("name", SqlType::new("varchar").with_length(64)).not_null())
        .with_column(Column::new("created_at", SqlType::new("datetime")))
}

fn posts() -> Table {
    Table::new("posts")
        .with_column(
            Column::new("id", SqlType::new("UNSIGNED INT").with_length(10)).not_null().primary_key().auto_increment(),
        )
        .with_column(Column::new("user_id", SqlType::new("bigint")).not_null())
        .with_column(Column::new("type", SqlType::new("varchar").with_length(16)).not_null().comment("it's a kind"))
        .with_column(Column::new("status", SqlType::new("enum")).not_null().enum_options(["draft", "live"]))
        .with_column(Column::new("price", SqlType::new("decimal").with_lengths(10, 2)).default_value("0.00"))
        .with_column(Column::new("score", SqlType::new("double")))
        .with_column(Column::new("published_on", SqlType::new("date")))
        .with_column(Column::new("updated_at", SqlType::new("timestamp")).not_null())
        .with_index(Index::new("uq_user_type", IndexKind::Unique, ["user_id", "type"]))
}

#[test]
fn test_generated_models_compile() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let keyword = Table::new("self").with_column(Column::new("id", SqlType::new("int")).not_null().primary_key());

    let mut modules = String::new();
    for (module, table) in [("users", users()), ("posts", posts()), ("keyword", keyword)] {
        let path = generate_model(&table, dir.path())?;
        modules.push_str(&format!("#[path = {:?}]\nmod {module};\n", path.display().to_string()));
    }
    let main = dir.path().join("main.rs");
    fs::write(&main, format!("{modules}{MAIN}"))?;

    let cases = trybuild::TestCases::new();
    cases.pass(&main);
    // Builds and runs the cases while the generated files still exist.
    drop(cases);
    Ok(())
}
