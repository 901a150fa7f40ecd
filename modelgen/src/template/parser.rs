//! Turns template source into a tree of [`Node`]s.

use std::vec::IntoIter;

use super::lexer::{Token, lex_action};
use crate::error::TemplateError;

/// A literal operand.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// An expression inside an action.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Literal),
    /// `.` followed by an optional field path.
    Dot(Vec<String>),
    /// `$name` followed by an optional field path.
    Var(String, Vec<String>),
    /// `helper arg...`
    Call { name: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Print { expr: Expr, line: usize },
    Declare { var: String, expr: Expr, line: usize },
    If { cond: Expr, then: Vec<Node>, otherwise: Vec<Node>, line: usize },
    Range { var: Option<String>, expr: Expr, body: Vec<Node>, line: usize },
}

enum Segment {
    Text(String),
    Action { tokens: Vec<Token>, line: usize },
}

enum Action {
    Node(Node),
    If(Expr, usize),
    Range(Option<String>, Expr, usize),
    Else(usize),
    End(usize),
}

/// Where a node list stopped.
enum Stop {
    Eof,
    Else(usize),
    End(usize),
}

pub(crate) fn parse(name: &str, source: &str) -> Result<Vec<Node>, TemplateError> {
    let mut parser = Parser { name, segments: split(name, source)?.into_iter() };
    let (nodes, stop) = parser.parse_list()?;
    match stop {
        Stop::Eof => Ok(nodes),
        Stop::Else(line) => Err(parser.error(line, "unexpected {{else}}")),
        Stop::End(line) => Err(parser.error(line, "unexpected {{end}}")),
    }
}

/// Splits the source into literal text and lexed actions.
fn split(name: &str, source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while let Some(offset) = source[pos..].find("{{") {
        let start = pos + offset;
        if start > pos {
            segments.push(Segment::Text(source[pos..start].to_string()));
        }
        let line = source[..start].matches('\n').count() + 1;
        let (tokens, consumed) = lex_action(&source[start + 2..])
            .map_err(|message| TemplateError::Parse { name: name.to_string(), line, message })?;
        segments.push(Segment::Action { tokens, line });
        pos = start + 2 + consumed;
    }

    if pos < source.len() {
        segments.push(Segment::Text(source[pos..].to_string()));
    }
    Ok(segments)
}

struct Parser<'s> {
    name: &'s str,
    segments: IntoIter<Segment>,
}

impl Parser<'_> {
    fn error(&self, line: usize, message: impl Into<String>) -> TemplateError {
        TemplateError::Parse { name: self.name.to_string(), line, message: message.into() }
    }

    fn parse_list(&mut self) -> Result<(Vec<Node>, Stop), TemplateError> {
        let mut nodes = Vec::new();

        while let Some(segment) = self.segments.next() {
            let (tokens, line) = match segment {
                Segment::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Segment::Action { tokens, line } => (tokens, line),
            };

            match self.parse_action(tokens, line)? {
                Action::Node(node) => nodes.push(node),
                Action::Else(line) => return Ok((nodes, Stop::Else(line))),
                Action::End(line) => return Ok((nodes, Stop::End(line))),
                Action::If(cond, line) => {
                    let (then, stop) = self.parse_list()?;
                    let otherwise = match stop {
                        Stop::End(_) => Vec::new(),
                        Stop::Else(_) => match self.parse_list()? {
                            (otherwise, Stop::End(_)) => otherwise,
                            (_, Stop::Else(else_line)) => return Err(self.error(else_line, "unexpected {{else}}")),
                            (_, Stop::Eof) => return Err(self.error(line, "unclosed {{if}}")),
                        },
                        Stop::Eof => return Err(self.error(line, "unclosed {{if}}")),
                    };
                    nodes.push(Node::If { cond, then, otherwise, line });
                }
                Action::Range(var, expr, line) => match self.parse_list()? {
                    (body, Stop::End(_)) => nodes.push(Node::Range { var, expr, body, line }),
                    (_, Stop::Else(else_line)) => return Err(self.error(else_line, "unexpected {{else}} in range")),
                    (_, Stop::Eof) => return Err(self.error(line, "unclosed {{range}}")),
                },
            }
        }

        Ok((nodes, Stop::Eof))
    }

    fn parse_action(&self, tokens: Vec<Token>, line: usize) -> Result<Action, TemplateError> {
        let mut cursor = Cursor { tokens: tokens.into_iter().peekable() };

        let head = cursor.peek().cloned();
        let action = match head {
            None => return Err(self.error(line, "missing value for command")),
            Some(Token::Else) => {
                cursor.next();
                Action::Else(line)
            }
            Some(Token::End) => {
                cursor.next();
                Action::End(line)
            }
            Some(Token::If) => {
                cursor.next();
                Action::If(self.parse_command(&mut cursor, line)?, line)
            }
            Some(Token::Range) => {
                cursor.next();
                let var = cursor.declaration();
                Action::Range(var, self.parse_command(&mut cursor, line)?, line)
            }
            Some(_) => match cursor.declaration() {
                Some(var) => Action::Node(Node::Declare { var, expr: self.parse_command(&mut cursor, line)?, line }),
                None => Action::Node(Node::Print { expr: self.parse_command(&mut cursor, line)?, line }),
            },
        };

        match cursor.next() {
            None => Ok(action),
            Some(token) => Err(self.error(line, format!("unexpected {token:?} in action"))),
        }
    }

    /// Parses `helper arg...` or a single operand.
    fn parse_command(&self, cursor: &mut Cursor, line: usize) -> Result<Expr, TemplateError> {
        if matches!(cursor.peek(), Some(Token::Ident(_))) {
            let Some(Token::Ident(name)) = cursor.next() else {
                return Err(self.error(line, "expected helper name"));
            };
            let mut args = Vec::new();
            while !matches!(cursor.peek(), None | Some(Token::RParen)) {
                args.push(self.parse_operand(cursor, line)?);
            }
            return Ok(Expr::Call { name, args });
        }

        let operand = self.parse_operand(cursor, line)?;
        if !matches!(cursor.peek(), None | Some(Token::RParen)) {
            return Err(self.error(line, "can't give argument to non-function"));
        }
        Ok(operand)
    }

    fn parse_operand(&self, cursor: &mut Cursor, line: usize) -> Result<Expr, TemplateError> {
        match cursor.next() {
            Some(Token::LParen) => {
                let inner = self.parse_command(cursor, line)?;
                match cursor.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error(line, "unclosed left paren")),
                }
            }
            Some(Token::True) => Ok(Expr::Literal(Literal::Bool(true))),
            Some(Token::False) => Ok(Expr::Literal(Literal::Bool(false))),
            Some(Token::Int(n)) => Ok(Expr::Literal(Literal::Int(n))),
            Some(Token::Float(f)) => Ok(Expr::Literal(Literal::Float(f))),
            Some(Token::Str(s)) => Ok(Expr::Literal(Literal::Str(s))),
            Some(Token::Dot) => Ok(Expr::Dot(Vec::new())),
            Some(Token::Field(path)) => Ok(Expr::Dot(path)),
            Some(Token::Variable(mut path)) => {
                let var = path.remove(0);
                Ok(Expr::Var(var, path))
            }
            Some(Token::Ident(name)) => Ok(Expr::Call { name, args: Vec::new() }),
            Some(token) => Err(self.error(line, format!("unexpected {token:?} in operand"))),
            None => Err(self.error(line, "missing operand")),
        }
    }
}

struct Cursor {
    tokens: std::iter::Peekable<IntoIter<Token>>,
}

impl Cursor {
    fn peek(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    fn next(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    /// Consumes `$name :=` if the action starts with a declaration.
    fn declaration(&mut self) -> Option<String> {
        let Some(Token::Variable(path)) = self.tokens.peek() else {
            return None;
        };
        if path.len() != 1 {
            return None;
        }
        let mut lookahead = self.tokens.clone();
        let var = match lookahead.next() {
            Some(Token::Variable(mut path)) => path.remove(0),
            _ => return None,
        };
        if lookahead.next() != Some(Token::Declare) {
            return None;
        }
        self.tokens = lookahead;
        Some(var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_blocks() -> Result<(), TemplateError> {
        let nodes = parse("t", "{{ range $c := .cols }}{{ if $c.pk }}*{{ else }}-{{ end }}{{ end }}")?;
        let [Node::Range { var, body, .. }] = nodes.as_slice() else {
            panic!("expected a single range node, got {nodes:?}");
        };
        assert_eq!(var.as_deref(), Some("c"));
        assert!(matches!(body.as_slice(), [Node::If { .. }]));
        Ok(())
    }

    #[test]
    fn parses_parenthesised_calls() -> Result<(), TemplateError> {
        let nodes = parse("t", "{{ if gt (len .imports) 0 }}x{{ end }}")?;
        let [Node::If { cond, .. }] = nodes.as_slice() else {
            panic!("expected an if node, got {nodes:?}");
        };
        assert_eq!(
            cond,
            &Expr::Call {
                name: "gt".into(),
                args: vec![
                    Expr::Call { name: "len".into(), args: vec![Expr::Dot(vec!["imports".into()])] },
                    Expr::Literal(Literal::Int(0)),
                ],
            }
        );
        Ok(())
    }

    #[test]
    fn rejects_unbalanced_blocks() {
        assert!(matches!(parse("t", "{{ if .x }}open"), Err(TemplateError::Parse { line: 1, .. })));
        assert!(matches!(parse("t", "a\n{{ end }}"), Err(TemplateError::Parse { line: 2, .. })));
        assert!(parse("t", "{{ range .x }}{{ else }}{{ end }}").is_err());
    }

    #[test]
    fn rejects_malformed_actions() {
        assert!(parse("t", "{{ }}").is_err());
        assert!(parse("t", "{{ .name 1 }}").is_err());
        assert!(parse("t", "{{ (len .x }}").is_err());
        assert!(parse("t", "{{ len .x) }}").is_err());
    }
}
