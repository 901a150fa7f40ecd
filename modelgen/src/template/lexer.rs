//! Tokenizer for the contents of `{{ ... }}` actions.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token {
    #[token("}}")]
    Close,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":=")]
    Declare,

    // === Keywords ===
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("end")]
    End,
    #[token("range")]
    Range,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // === Operands ===
    /// `$name` or `$name.field.path`; the first element is the variable name.
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*", |lex| split_path(&lex.slice()[1..]))]
    Variable(Vec<String>),

    /// `.field.path` relative to dot.
    #[regex(r"(\.[A-Za-z_][A-Za-z0-9_]*)+", |lex| split_path(&lex.slice()[1..]))]
    Field(Vec<String>),

    #[token(".")]
    Dot,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"-?[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    Str(String),
}

fn split_path(path: &str) -> Vec<String> {
    path.split('.').map(str::to_owned).collect()
}

/// Strips the quotes of a string literal and resolves its escapes.
fn unescape(literal: &str) -> Option<String> {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            _ => return None,
        }
    }
    Some(out)
}

/// Lexes an action body that starts right after `{{`.
///
/// Returns the tokens before the closing `}}` and the byte length consumed,
/// closing delimiter included.
pub(crate) fn lex_action(rest: &str) -> Result<(Vec<Token>, usize), String> {
    let mut lex = Token::lexer(rest);
    let mut tokens = Vec::new();

    while let Some(result) = lex.next() {
        match result {
            Ok(Token::Close) => return Ok((tokens, lex.span().end)),
            Ok(token) => tokens.push(token),
            Err(()) => return Err(format!("unexpected {:?} in action", lex.slice())),
        }
    }

    Err("unclosed action".to_string())
}
