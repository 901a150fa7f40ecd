//! # modelgen-derive
//!
//! The `Model` derive used by generated model files. It reads the
//! `#[orm(table = "...")]` struct attribute and the `#[orm("...")]` column
//! annotation on every field, and implements `modelgen::Model`.

use proc_macro::TokenStream;

mod derive_model;

#[proc_macro_derive(Model, attributes(orm))]
pub fn model_derive(input: TokenStream) -> TokenStream {
    derive_model::expand(input)
}
