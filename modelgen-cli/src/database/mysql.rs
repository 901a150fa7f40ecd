//! MySQL introspection through `information_schema`.

// ============================================================================
// External Crate Imports
// ============================================================================

use modelgen::{Column, Index, IndexKind, SqlType, Table};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row;

// ============================================================================
// Internal Crate Imports
// ============================================================================

use super::SchemaSource;
use crate::config::MysqlConfig;
use crate::error::{AppError, Result};

const DEFAULT_PORT: u16 = 3306;

/// Base types whose `unsigned` attribute changes the mapped Rust type.
const INTEGER_TYPES: &[&str] = &["TINYINT", "SMALLINT", "MEDIUMINT", "INT", "INTEGER", "BIGINT"];

const TABLES_QUERY: &str = "SELECT CAST(TABLE_NAME AS CHAR) FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = DATABASE() ORDER BY TABLE_NAME";

const COLUMNS_QUERY: &str = "SELECT CAST(COLUMN_NAME AS CHAR), CAST(COLUMN_TYPE AS CHAR), \
     CAST(IS_NULLABLE AS CHAR), CAST(COLUMN_KEY AS CHAR), CAST(EXTRA AS CHAR), \
     CAST(COLUMN_DEFAULT AS CHAR), CAST(COLUMN_COMMENT AS CHAR) \
     FROM information_schema.COLUMNS WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

const INDEXES_QUERY: &str = "SELECT CAST(INDEX_NAME AS CHAR), CAST(NON_UNIQUE AS SIGNED), \
     CAST(COLUMN_NAME AS CHAR) FROM information_schema.STATISTICS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? AND INDEX_NAME <> 'PRIMARY' \
     ORDER BY INDEX_NAME, SEQ_IN_INDEX";

/// Reads table structure from a MySQL schema.
#[derive(Debug, Clone)]
pub struct MySqlIntrospector {
    pool: MySqlPool,
}

impl MySqlIntrospector {
    /// Connects to the first reachable host in `config.hosts`.
    pub async fn connect(config: &MysqlConfig) -> Result<Self> {
        let mut last_error = None;

        for host in &config.hosts {
            let (addr, port) = split_host(host)?;
            let options = MySqlConnectOptions::new()
                .host(addr)
                .port(port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.database);

            match MySqlPoolOptions::new().max_connections(1).connect_with(options).await {
                Ok(pool) => {
                    log::debug!("connected to mysql at {host}");
                    return Ok(Self { pool });
                }
                Err(err) => {
                    log::warn!("mysql host {host} is unreachable: {err}");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(source) => Err(AppError::Connectivity { hosts: config.hosts.join(","), source }),
            None => Err(AppError::Config("mysql.host is not found".to_string())),
        }
    }
}

impl SchemaSource for MySqlIntrospector {
    async fn table_names(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(TABLES_QUERY).fetch_all(&self.pool).await?;

        let mut names = Vec::with_capacity(rows.len());
        for row in rows {
            names.push(row.try_get(0)?);
        }
        Ok(names)
    }

    async fn table(&self, name: &str) -> Result<Table> {
        let mut table = Table::new(name);

        let rows = sqlx::query(COLUMNS_QUERY).bind(name).fetch_all(&self.pool).await?;
        for row in rows {
            let col_name: String = row.try_get(0)?;
            let column_type: String = row.try_get(1)?;
            let is_nullable: String = row.try_get(2)?;
            let column_key: String = row.try_get(3)?;
            let extra: String = row.try_get(4)?;
            let default: Option<String> = row.try_get(5)?;
            let comment: String = row.try_get(6)?;

            let parsed = parse_column_type(&column_type);
            let default = normalize_default(default.as_deref(), &parsed.sql_type);
            let mut col = Column::new(col_name, parsed.sql_type)
                .default_value(default)
                .comment(comment)
                .enum_options(parsed.enum_options)
                .set_options(parsed.set_options);
            if !is_nullable.eq_ignore_ascii_case("YES") {
                col = col.not_null();
            }
            if column_key == "PRI" {
                col = col.primary_key();
            }
            if extra.to_ascii_lowercase().contains("auto_increment") {
                col = col.auto_increment();
            }
            table.add_column(col);
        }

        let rows = sqlx::query(INDEXES_QUERY).bind(name).fetch_all(&self.pool).await?;
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push((row.try_get(0)?, row.try_get(1)?, row.try_get(2)?));
        }
        for index in group_indexes(entries) {
            table.add_index(index);
        }

        log::debug!("introspected table {name}: {} columns, {} indexes", table.columns.len(), table.indexes.len());
        Ok(table)
    }
}

// ============================================================================
// Parsing Helpers
// ============================================================================

/// Splits `host[:port]`, defaulting the port to 3306.
fn split_host(host: &str) -> Result<(&str, u16)> {
    match host.rsplit_once(':') {
        None => Ok((host, DEFAULT_PORT)),
        Some((addr, port)) => {
            let port = port.parse().map_err(|_| AppError::Config(format!("invalid port in mysql.host: {host}")))?;
            Ok((addr, port))
        }
    }
}

/// A `COLUMN_TYPE` value broken into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedType {
    pub sql_type: SqlType,
    pub enum_options: Vec<String>,
    pub set_options: Vec<String>,
}

/// Parses MySQL's `COLUMN_TYPE`, e.g. `int(10) unsigned`, `decimal(10,2)` or
/// `enum('a','b')`.
pub(crate) fn parse_column_type(column_type: &str) -> ParsedType {
    let column_type = column_type.trim();
    let (base, args, rest) = match (column_type.find('('), column_type.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            (&column_type[..open], &column_type[open + 1..close], &column_type[close + 1..])
        }
        _ => match column_type.split_once(' ') {
            Some((base, rest)) => (base, "", rest),
            None => (column_type, "", ""),
        },
    };

    let base = base.trim().to_ascii_uppercase();
    let unsigned = rest.split_whitespace().any(|word| word.eq_ignore_ascii_case("unsigned"));
    let name = if unsigned && INTEGER_TYPES.contains(&base.as_str()) {
        format!("UNSIGNED {base}")
    } else {
        base.clone()
    };

    let mut parsed = ParsedType { sql_type: SqlType::new(name), enum_options: Vec::new(), set_options: Vec::new() };
    match base.as_str() {
        "ENUM" => parsed.enum_options = split_quoted(args),
        "SET" => parsed.set_options = split_quoted(args),
        _ => {
            let lengths: Vec<u64> = args.split(',').filter_map(|n| n.trim().parse().ok()).collect();
            parsed.sql_type = match lengths.as_slice() {
                [len] => parsed.sql_type.with_length(*len),
                [len, len2] => parsed.sql_type.with_lengths(*len, *len2),
                _ => parsed.sql_type,
            };
        }
    }
    parsed
}

/// Splits a list of single-quoted values; `''` inside a value is a literal quote.
fn split_quoted(list: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut chars = list.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\'' {
            continue;
        }
        let mut value = String::new();
        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    value.push('\'');
                    continue;
                }
                break;
            }
            value.push(c);
        }
        values.push(value);
    }
    values
}

/// Renders a column default the way it appears in the `default` tag token.
///
/// Text defaults and literal temporal defaults are quoted; `CURRENT_TIMESTAMP`
/// and numeric defaults are kept as-is.
pub(crate) fn normalize_default(default: Option<&str>, sql_type: &SqlType) -> String {
    let Some(default) = default else {
        return String::new();
    };
    let is_now = default.to_ascii_uppercase().starts_with("CURRENT_TIMESTAMP");
    if sql_type.is_text() || (sql_type.is_time() && !is_now) {
        format!("'{default}'")
    } else {
        default.to_string()
    }
}

/// Builds indexes from `(index name, non unique, column name)` rows ordered by
/// index name and position. Rows without a column (functional key parts) are
/// skipped.
pub(crate) fn group_indexes(rows: Vec<(String, i64, Option<String>)>) -> Vec<Index> {
    let mut indexes: Vec<Index> = Vec::new();

    for (name, non_unique, column) in rows {
        let Some(column) = column else {
            continue;
        };
        match indexes.last_mut() {
            Some(index) if index.name == name => index.cols.push(column),
            _ => {
                let kind = if non_unique == 0 { IndexKind::Unique } else { IndexKind::Plain };
                indexes.push(Index::new(name, kind, [column]));
            }
        }
    }
    indexes
}
