//! # Config Module
//!
//! Loads the `[mysql]` section of the application config file and turns the
//! command line flags into [`GenerateOptions`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};

// ============================================================================
// Raw File Layout
// ============================================================================

/// The config file as written on disk. Every value is optional so that missing
/// keys can be reported one by one.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    pub mysql: Option<MysqlSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MysqlSection {
    pub host: Option<toml::Value>,
    pub user: Option<toml::Value>,
    pub password: Option<toml::Value>,
    pub database: Option<toml::Value>,
}

// ============================================================================
// Validated Settings
// ============================================================================

/// Connection settings for the schema to introspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MysqlConfig {
    /// `host[:port]` entries, tried in order.
    pub hosts: Vec<String>,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl MysqlConfig {
    fn from_section(section: MysqlSection) -> Result<Self> {
        let host = required("host", section.host)?;
        let hosts: Vec<String> =
            host.split(',').map(str::trim).filter(|h| !h.is_empty()).map(str::to_string).collect();
        if hosts.is_empty() {
            return Err(AppError::Config("mysql.host is not found".to_string()));
        }

        Ok(Self {
            hosts,
            user: required("user", section.user)?,
            password: required("password", section.password)?,
            database: required("database", section.database)?,
        })
    }
}

/// Stringifies a scalar config value; tables and arrays are rejected.
fn required(key: &str, value: Option<toml::Value>) -> Result<String> {
    match value {
        None => Err(AppError::Config(format!("mysql.{key} is not found"))),
        Some(toml::Value::String(s)) => Ok(s),
        Some(toml::Value::Integer(n)) => Ok(n.to_string()),
        Some(toml::Value::Float(f)) => Ok(f.to_string()),
        Some(toml::Value::Boolean(b)) => Ok(b.to_string()),
        Some(_) => Err(AppError::Config(format!("mysql.{key} must be a scalar value"))),
    }
}

/// Reads and validates the mysql settings from the TOML file at `path`.
pub fn load(path: &Path) -> Result<MysqlConfig> {
    if !path.exists() {
        return Err(AppError::Config(format!("config file {} does not exist", path.display())));
    }
    if !path.is_file() {
        return Err(AppError::Config(format!("config path {} is not a file", path.display())));
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    let section = config.mysql.ok_or_else(|| AppError::Config("mysql item not found in config".to_string()))?;
    MysqlConfig::from_section(section)
}

// ============================================================================
// Generate Options
// ============================================================================

/// What to generate and where, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Requested tables, deduplicated, in the order given.
    pub tables: Vec<String>,
    pub dir: PathBuf,
}

impl GenerateOptions {
    pub fn new(table: &str, dir: impl Into<PathBuf>) -> Result<Self> {
        let mut tables: Vec<String> = Vec::new();
        for name in table.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !tables.iter().any(|t| t == name) {
                tables.push(name.to_string());
            }
        }
        if tables.is_empty() {
            return Err(AppError::Config("table name cannot be blank".to_string()));
        }
        Ok(Self { tables, dir: dir.into() })
    }
}
