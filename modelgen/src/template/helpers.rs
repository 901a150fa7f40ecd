//! Helper functions callable from templates.

use std::collections::HashMap;
use std::fmt;

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

use super::value::Value;
use crate::compare;
use crate::error::{Error, Result};
use crate::tag::tag;
use crate::types::field_type;

/// A template-callable function over dynamically typed arguments.
pub type Helper = for<'a> fn(&[Value<'a>]) -> Result<Value<'a>>;

/// Words that cannot be used as plain Rust identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false", "fn", "for",
    "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static",
    "struct", "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers either.
const RESERVED_PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Registry of helpers available to a template, looked up by name at call time.
#[derive(Clone)]
pub struct Helpers {
    funcs: HashMap<&'static str, Helper>,
}

impl Helpers {
    fn empty() -> Self {
        Self { funcs: HashMap::new() }
    }

    /// The helpers used by the model template.
    pub fn builtin() -> Self {
        let mut helpers = Self::empty();
        helpers
            .register("camel", camel)
            .register("snake", snake)
            .register("field", field)
            .register("upper", upper)
            .register("type", column_type)
            .register("tag", column_tag)
            .register("len", len)
            .register("eq", eq)
            .register("lt", lt)
            .register("le", le)
            .register("gt", gt);
        helpers
    }

    /// Adds or replaces a helper.
    pub fn register(&mut self, name: &'static str, helper: Helper) -> &mut Self {
        log::trace!("registering template helper {name}");
        self.funcs.insert(name, helper);
        self
    }

    pub fn get(&self, name: &str) -> Option<Helper> {
        self.funcs.get(name).copied()
    }
}

impl Default for Helpers {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Helpers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&&str> = self.funcs.keys().collect();
        names.sort();
        f.debug_struct("Helpers").field("funcs", &names).finish()
    }
}

/// Turns a column or table name into a valid Rust identifier.
pub fn rust_ident(name: &str) -> String {
    let mut ident = digit_safe(name.to_snake_case());
    if ident.is_empty() {
        ident.push('_');
    }
    if RESERVED_PATH_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    } else if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}

fn arity(helper: &'static str, args: &[Value<'_>], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::BadArgument {
            helper,
            message: format!("expected {expected} arguments, got {}", args.len()),
        });
    }
    Ok(())
}

fn string_arg<'v>(helper: &'static str, args: &'v [Value<'_>]) -> Result<&'v str> {
    arity(helper, args, 1)?;
    match &args[0] {
        Value::Str(s) => Ok(s),
        other => Err(Error::BadArgument { helper, message: format!("expected string, got {}", other.type_name()) }),
    }
}

/// Identifiers cannot start with a digit.
fn digit_safe(mut ident: String) -> String {
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

fn camel<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    let mut ident = digit_safe(string_arg("camel", args)?.to_upper_camel_case());
    if RESERVED_PATH_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    Ok(Value::Str(ident))
}

fn snake<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    Ok(Value::Str(digit_safe(string_arg("snake", args)?.to_snake_case())))
}

fn field<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    Ok(Value::Str(rust_ident(string_arg("field", args)?)))
}

fn upper<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    Ok(Value::Str(digit_safe(string_arg("upper", args)?.to_shouty_snake_case())))
}

fn column_type<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    arity("type", args, 1)?;
    match &args[0] {
        Value::Column(col) => Ok(Value::Str(field_type(col))),
        other => {
            Err(Error::BadArgument { helper: "type", message: format!("expected column, got {}", other.type_name()) })
        }
    }
}

fn column_tag<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    arity("tag", args, 2)?;
    match (&args[0], &args[1]) {
        (Value::Table(table), Value::Column(col)) => Ok(Value::Str(tag(table, col))),
        (a, b) => Err(Error::BadArgument {
            helper: "tag",
            message: format!("expected table and column, got {} and {}", a.type_name(), b.type_name()),
        }),
    }
}

fn len<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    arity("len", args, 1)?;
    let n = match &args[0] {
        Value::Str(s) => s.len(),
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        Value::Table(table) => table.columns.len(),
        other => {
            return Err(Error::BadArgument { helper: "len", message: format!("len of {}", other.type_name()) });
        }
    };
    Ok(Value::Int(i64::try_from(n).unwrap_or(i64::MAX)))
}

fn eq<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    let Some((first, rest)) = args.split_first() else {
        return Err(Error::MissingOperand);
    };
    compare::eq(first, rest).map(Value::Bool)
}

fn lt<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    arity("lt", args, 2)?;
    compare::lt(&args[0], &args[1]).map(Value::Bool)
}

fn le<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    arity("le", args, 2)?;
    compare::le(&args[0], &args[1]).map(Value::Bool)
}

fn gt<'a>(args: &[Value<'a>]) -> Result<Value<'a>> {
    arity("gt", args, 2)?;
    compare::gt(&args[0], &args[1]).map(Value::Bool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_escaped() {
        assert_eq!(rust_ident("UserName"), "user_name");
        assert_eq!(rust_ident("type"), "r#type");
        assert_eq!(rust_ident("self"), "self_");
        assert_eq!(rust_ident("2fa_secret"), "_2fa_secret");
    }

    #[test]
    fn builtin_registry_has_every_helper() {
        let helpers = Helpers::builtin();
        for name in ["camel", "snake", "field", "upper", "type", "tag", "len", "eq", "lt", "le", "gt"] {
            assert!(helpers.get(name).is_some(), "missing helper {name}");
        }
        assert!(Helpers::empty().get("gt").is_none());
    }

    #[test]
    fn naming_helpers() -> Result<()> {
        assert_eq!(camel(&[Value::from("user_accounts")])?, Value::from("UserAccounts"));
        assert_eq!(upper(&[Value::from("created_at")])?, Value::from("CREATED_AT"));
        assert_eq!(field(&[Value::from("Id")])?, Value::from("id"));
        assert_eq!(camel(&[Value::from("2024_logs")])?, Value::from("_2024Logs"));
        assert_eq!(camel(&[Value::from("self")])?, Value::from("Self_"));
        assert_eq!(camel(&[Value::from("type")])?, Value::from("Type"));
        assert!(matches!(camel(&[Value::Int(1)]), Err(Error::BadArgument { helper: "camel", .. })));
        Ok(())
    }

    #[test]
    fn comparison_helpers_check_arity() {
        assert!(matches!(gt(&[Value::Int(1)]), Err(Error::BadArgument { helper: "gt", .. })));
        assert!(matches!(eq(&[]), Err(Error::MissingOperand)));
        assert!(matches!(eq(&[Value::Int(1)]), Err(Error::MissingOperand)));
    }
}
