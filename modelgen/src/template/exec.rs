//! Evaluates a parsed template against a data value.

use super::Helpers;
use super::parser::{Expr, Literal, Node};
use super::value::Value;
use crate::error::{Error, Result, TemplateError};

pub(crate) struct State<'t, 'a> {
    name: &'t str,
    helpers: &'t Helpers,
    vars: Vec<(String, Value<'a>)>,
    out: String,
}

impl<'t, 'a> State<'t, 'a> {
    pub(crate) fn new(name: &'t str, helpers: &'t Helpers) -> Self {
        Self { name, helpers, vars: Vec::new(), out: String::new() }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn error(&self, line: usize, message: impl Into<String>) -> TemplateError {
        TemplateError::Exec { name: self.name.to_string(), line, message: message.into() }
    }

    /// Executes `nodes`; variables declared inside go out of scope afterwards.
    pub(crate) fn walk(&mut self, nodes: &[Node], dot: &Value<'a>) -> Result<()> {
        let mark = self.vars.len();
        for node in nodes {
            self.walk_node(node, dot)?;
        }
        self.vars.truncate(mark);
        Ok(())
    }

    fn walk_node(&mut self, node: &Node, dot: &Value<'a>) -> Result<()> {
        match node {
            Node::Text(text) => self.out.push_str(text),
            Node::Print { expr, line } => {
                let value = self.eval(expr, dot, *line)?;
                self.out.push_str(&value.to_string());
            }
            Node::Declare { var, expr, line } => {
                let value = self.eval(expr, dot, *line)?;
                self.vars.push((var.clone(), value));
            }
            Node::If { cond, then, otherwise, line } => {
                if self.eval(cond, dot, *line)?.is_truthy() {
                    self.walk(then, dot)?;
                } else {
                    self.walk(otherwise, dot)?;
                }
            }
            Node::Range { var, expr, body, line } => {
                let items = match self.eval(expr, dot, *line)? {
                    Value::List(items) => items,
                    Value::Map(map) => map.into_values().collect(),
                    Value::Null => Vec::new(),
                    other => {
                        return Err(self.error(*line, format!("range can't iterate over {}", other.type_name())).into());
                    }
                };
                for item in items {
                    let mark = self.vars.len();
                    if let Some(var) = var {
                        self.vars.push((var.clone(), item.clone()));
                    }
                    self.walk(body, &item)?;
                    self.vars.truncate(mark);
                }
            }
        }
        Ok(())
    }

    fn eval(&self, expr: &Expr, dot: &Value<'a>, line: usize) -> Result<Value<'a>> {
        match expr {
            Expr::Literal(Literal::Bool(b)) => Ok(Value::Bool(*b)),
            Expr::Literal(Literal::Int(n)) => Ok(Value::Int(*n)),
            Expr::Literal(Literal::Float(f)) => Ok(Value::Float(*f)),
            Expr::Literal(Literal::Str(s)) => Ok(Value::Str(s.clone())),
            Expr::Dot(path) => self.resolve(dot.clone(), path, line),
            Expr::Var(name, path) => {
                let value = self
                    .vars
                    .iter()
                    .rev()
                    .find(|(var, _)| var == name)
                    .map(|(_, value)| value.clone())
                    .ok_or_else(|| self.error(line, format!("undefined variable: ${name}")))?;
                self.resolve(value, path, line)
            }
            Expr::Call { name, args } => {
                let helper = self
                    .helpers
                    .get(name)
                    .ok_or_else(|| self.error(line, format!("function \"{name}\" not defined")))?;
                let args = args.iter().map(|arg| self.eval(arg, dot, line)).collect::<Result<Vec<_>>>()?;
                helper(&args).map_err(|source| {
                    Error::from(TemplateError::Helper {
                        name: self.name.to_string(),
                        line,
                        helper: name.clone(),
                        source: Box::new(source),
                    })
                })
            }
        }
    }

    fn resolve(&self, mut value: Value<'a>, path: &[String], line: usize) -> Result<Value<'a>> {
        for field in path {
            value = value.field(field).ok_or_else(|| {
                self.error(line, format!("can't evaluate field {field} in type {}", value.type_name()))
            })?;
        }
        Ok(value)
    }
}
