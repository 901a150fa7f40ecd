//! # Error Module
//!
//! Error types shared by every stage of model generation.

use thiserror::Error;

use crate::compare::Kind;

/// Errors raised while parsing or executing a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template source is malformed.
    #[error("{name}:{line}: {message}")]
    Parse { name: String, line: usize, message: String },

    /// The template could not be evaluated against its data.
    #[error("{name}:{line}: {message}")]
    Exec { name: String, line: usize, message: String },

    /// A helper function returned an error.
    #[error("{name}:{line}: error calling {helper}: {source}")]
    Helper {
        name: String,
        line: usize,
        helper: String,
        #[source]
        source: Box<Error>,
    },
}

/// The main error type for modelgen.
#[derive(Debug, Error)]
pub enum Error {
    /// A value has no comparable kind (lists, maps, schema handles, null).
    #[error("invalid type for comparison: {0}")]
    UnsupportedKind(String),

    /// Two values of different kinds were compared.
    #[error("incompatible types for comparison: {left} and {right}")]
    IncompatibleKinds { left: Kind, right: Kind },

    /// An equality test was given nothing to compare against.
    #[error("missing argument for comparison")]
    MissingOperand,

    /// A helper received an argument it cannot work with.
    #[error("wrong argument for {helper}: {message}")]
    BadArgument { helper: &'static str, message: String },

    /// A requested table does not exist in the introspected schema.
    #[error("{0} table not found in the database")]
    UnknownTable(String),

    #[error("template: {0}")]
    Template(#[from] TemplateError),

    /// The rendered text is not valid Rust source.
    #[error("generated source does not parse: {0}")]
    Format(#[source] syn::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
