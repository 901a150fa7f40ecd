//! # Emit Module
//!
//! Formats rendered source and writes it to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extension of generated model files.
pub const EXTENSION: &str = "rs";

/// Parses `raw` as a Rust file and pretty-prints it.
pub fn format_source(raw: &str) -> Result<String> {
    let file = syn::parse_file(raw).map_err(Error::Format)?;
    Ok(prettyplease::unparse(&file))
}

/// Writes the formatted form of `raw` to `<dir>/<table_name>.rs`.
///
/// The directory is created if missing. An existing file is replaced.
/// Nothing is written when `raw` does not parse.
pub fn emit(raw: &str, dir: &Path, table_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let formatted = format_source(raw)?;
    let path = dir.join(format!("{table_name}.{EXTENSION}"));
    fs::write(&path, formatted)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_valid_source() -> Result<()> {
        let formatted = format_source("pub struct A{pub x:i32,}")?;
        assert_eq!(formatted, "pub struct A {\n    pub x: i32,\n}\n");
        Ok(())
    }

    #[test]
    fn rejects_invalid_source() {
        assert!(matches!(format_source("pub struct {"), Err(Error::Format(_))));
    }
}
