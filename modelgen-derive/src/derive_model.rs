//! Expansion of `#[derive(Model)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Field, Fields, Lit, LitStr, Meta, Token, parse_macro_input};

pub fn expand(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match expand_model(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_model(ast: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &ast.ident;
    let table_name = table_name(ast)?;
    let columns = named_fields(ast)?.iter().map(column_info).collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl ::modelgen::Model for #struct_name {
            fn table_name() -> &'static str {
                #table_name
            }

            fn columns() -> ::std::vec::Vec<::modelgen::ColumnInfo> {
                ::std::vec![#(#columns),*]
            }
        }
    })
}

fn named_fields(ast: &DeriveInput) -> syn::Result<&Punctuated<Field, Token![,]>> {
    match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(ast, "Model derive only supports structs with named fields")),
        },
        _ => Err(syn::Error::new_spanned(ast, "Model derive only supports structs")),
    }
}

/// `#[orm(table = "...")]` on the struct; the struct name otherwise.
fn table_name(ast: &DeriveInput) -> syn::Result<String> {
    let mut table = None;
    for attr in ast.attrs.iter().filter(|attr| attr.path().is_ident("orm")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value: LitStr = meta.value()?.parse()?;
                table = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported model attribute, expected `table = \"...\"`"))
            }
        })?;
    }
    Ok(table.unwrap_or_else(|| ast.ident.to_string()))
}

fn column_info(field: &Field) -> syn::Result<TokenStream2> {
    let ident = field.ident.as_ref().ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let field_name = ident.unraw().to_string();

    let mut column = None;
    let mut annotation = String::new();
    for attr in &field.attrs {
        if attr.path().is_ident("orm") {
            let value: LitStr = attr.parse_args()?;
            annotation = value.value();
        } else if attr.path().is_ident("serde") {
            if let Some(rename) = serde_rename(attr) {
                column = Some(rename);
            }
        }
    }
    let column = column.unwrap_or_else(|| field_name.clone());

    let tokens = annotation_tokens(&annotation);
    let is_primary_key = tokens.iter().any(|t| t == "pk");
    let is_auto_increment = tokens.iter().any(|t| t == "autoincr");
    let not_null = tokens.windows(2).any(|pair| pair[0] == "not" && pair[1] == "null");
    let is_nullable = !(not_null || is_primary_key);

    Ok(quote! {
        ::modelgen::ColumnInfo {
            name: #column,
            field: #field_name,
            annotation: #annotation,
            is_primary_key: #is_primary_key,
            is_nullable: #is_nullable,
            is_auto_increment: #is_auto_increment,
        }
    })
}

/// The `rename = "..."` value of a `#[serde(...)]` attribute, if it has one.
fn serde_rename(attr: &Attribute) -> Option<String> {
    let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated).ok()?;
    for meta in metas {
        let Meta::NameValue(pair) = meta else {
            continue;
        };
        if !pair.path.is_ident("rename") {
            continue;
        }
        if let Expr::Lit(ExprLit { lit: Lit::Str(value), .. }) = pair.value {
            return Some(value.value());
        }
    }
    None
}

/// Splits an annotation on whitespace, keeping single-quoted text together.
fn annotation_tokens(annotation: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in annotation.chars() {
        match c {
            '\'' => {
                quoted = !quoted;
                current.push(c);
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_text_stays_in_one_token() {
        assert_eq!(
            annotation_tokens("not null default 'a b' comment('pk here') VARCHAR(8)"),
            vec!["not", "null", "default", "'a b'", "comment('pk here')", "VARCHAR(8)"]
        );
        assert!(annotation_tokens("  ").is_empty());
    }

    #[test]
    fn expands_table_and_columns() -> syn::Result<()> {
        let ast: DeriveInput = syn::parse_quote! {
            #[orm(table = "users")]
            pub struct Users {
                #[serde(rename = "Id")]
                #[orm("pk autoincr BIGINT")]
                pub id: i64,
                #[serde(rename = "type")]
                #[orm("comment('pk or not') VARCHAR(16)")]
                pub r#type: Option<String>,
            }
        };
        let expanded = expand_model(&ast)?.to_string();
        assert!(expanded.contains("\"users\""));
        assert!(expanded.contains("name : \"Id\""));
        assert!(expanded.contains("field : \"type\""));
        assert!(expanded.contains("is_primary_key : true"));
        assert!(expanded.contains("is_primary_key : false"));
        Ok(())
    }

    #[test]
    fn rejects_unknown_struct_attributes() {
        let ast: DeriveInput = syn::parse_quote! {
            #[orm(schema = "x")]
            pub struct T { pub a: i32 }
        };
        assert!(expand_model(&ast).is_err());
    }
}
