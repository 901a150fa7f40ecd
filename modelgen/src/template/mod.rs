//! # Template Module
//!
//! A small text-template engine in the spirit of Go's `text/template`, used to
//! lay out generated model files.
//!
//! Templates mix literal text with `{{ ... }}` actions:
//!
//! - `{{ expr }}` prints a value, `{{ $v := expr }}` binds a variable;
//! - `{{ if expr }} ... {{ else }} ... {{ end }}`;
//! - `{{ range $v := expr }} ... {{ end }}` over lists and maps;
//! - expressions are `.field.path`, `$var.path`, literals, or helper calls
//!   such as `gt (len .imports) 0`.
//!
//! Helpers are not global: every render receives a [`Helpers`] registry.

mod exec;
mod helpers;
mod lexer;
mod parser;
mod value;

pub use helpers::{Helper, Helpers, rust_ident};
pub use value::Value;

use crate::error::Result;
use exec::State;
use parser::Node;

/// A parsed template, ready to be rendered any number of times.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    root: Vec<Node>,
}

impl Template {
    /// Parses `source`. `name` is used in error messages.
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        let root = parser::parse(name, source)?;
        Ok(Self { name: name.to_string(), root })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Executes the template with `data` as dot.
    pub fn render(&self, data: &Value<'_>, helpers: &Helpers) -> Result<String> {
        let mut state = State::new(&self.name, helpers);
        state.walk(&self.root, data)?;
        Ok(state.finish())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::error::{Error, TemplateError};

    fn data() -> Value<'static> {
        let mut map = BTreeMap::new();
        map.insert("name".to_string(), Value::from("users"));
        map.insert("count".to_string(), Value::Int(2));
        map.insert("items".to_string(), Value::List(vec![Value::from("a"), Value::from("b")]));
        Value::Map(map)
    }

    fn render(source: &str) -> Result<String> {
        Template::parse("test", source)?.render(&data(), &Helpers::builtin())
    }

    #[test]
    fn prints_fields_and_variables() -> Result<()> {
        assert_eq!(render("{{ $n := camel .name }}type {{ $n }};")?, "type Users;");
        Ok(())
    }

    #[test]
    fn conditionals_use_comparison_helpers() -> Result<()> {
        assert_eq!(render("{{ if gt .count 1 }}many{{ else }}few{{ end }}")?, "many");
        assert_eq!(render("{{ if eq .name \"posts\" \"users\" }}yes{{ end }}")?, "yes");
        assert_eq!(render("{{ if lt .count 1 }}none{{ end }}")?, "");
        Ok(())
    }

    #[test]
    fn ranges_bind_the_element() -> Result<()> {
        assert_eq!(render("{{ range $i := .items }}[{{ $i }}{{ . }}]{{ end }}")?, "[aa][bb]");
        Ok(())
    }

    #[test]
    fn variables_are_scoped_to_their_block() {
        let err = render("{{ if true }}{{ $x := 1 }}{{ end }}{{ $x }}");
        assert!(matches!(err, Err(Error::Template(TemplateError::Exec { .. }))));
    }

    #[test]
    fn comparator_errors_surface_through_rendering() {
        let err = render("{{ if gt .name 1 }}x{{ end }}");
        let Err(Error::Template(TemplateError::Helper { helper, source, .. })) = err else {
            panic!("expected a helper error, got {err:?}");
        };
        assert_eq!(helper, "gt");
        assert!(matches!(*source, Error::IncompatibleKinds { .. }));
    }

    #[test]
    fn unknown_helpers_and_fields_fail() {
        assert!(matches!(render("{{ nope 1 }}"), Err(Error::Template(TemplateError::Exec { .. }))));
        assert!(matches!(render("{{ .missing }}"), Err(Error::Template(TemplateError::Exec { .. }))));
    }

    #[test]
    fn parse_errors_are_template_errors() {
        assert!(matches!(Template::parse("bad", "{{ if .x }}"), Err(Error::Template(TemplateError::Parse { .. }))));
    }
}
