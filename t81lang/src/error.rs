//! Result and errors.
use crate::tokens::{Span, TokenKind};
use smol_str::SmolStr;
use std::{fmt, io};

pub type T81Result<T> = std::result::Result<T, T81Error>;

#[derive(Debug, thiserror::Error)]
pub enum T81Error {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Fmt(#[from] fmt::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl T81Error {
    /// Render the error, pointing at the offending source line when
    /// the error originates in the front end.
    pub fn report(&self, source: &str) -> String {
        match self {
            Self::Lex(err) => err.report(source),
            Self::Parse(err) => err.report(source),
            err => err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    /// Input that matches none of the token classes.
    #[error("unrecognized input {lexeme:?}")]
    Unrecognized { lexeme: SmolStr, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            Self::Unrecognized { span, .. } => *span,
        }
    }

    pub fn report(&self, source: &str) -> String {
        render(source, self.span(), self)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Location of the token the error refers to.
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn report(&self, source: &str) -> String {
        render(source, self.span, self)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("statement is missing its terminating ';'")]
    UnterminatedStatement,
    #[error("unbalanced braces, function body is never closed")]
    UnbalancedBraces,
    #[error("expected a literal or a binary expression, found {len} tokens")]
    UnrecognizedExpressionShape { len: usize },
    #[error("function header is missing '{expected}'")]
    MissingHeaderToken { expected: TokenKind },
    #[error("unexpected {encountered} token, {msg}")]
    UnexpectedToken { encountered: TokenKind, msg: String },
    #[error("unexpected end of input, {msg}")]
    UnexpectedEnd { msg: String },
    #[error("malformed annotation '{name}', expected '{name}(<value>)'")]
    MalformedAnnotation { name: SmolStr },
    #[error("unknown annotation '{name}'")]
    UnknownAnnotation { name: SmolStr },
    #[error("invalid number literal '{lexeme}'")]
    InvalidNumber { lexeme: SmolStr },
}

/// Error message followed by the source line and a marker under the span.
///
/// ```text
/// 2:13: statement is missing its terminating ';'
///     let c = a + b
///     ^^^
/// ```
fn render(source: &str, span: Span, message: impl fmt::Display) -> String {
    let (line, column) = span.line_column(source);
    let (text, _) = span.surrounding_line(source);

    let width = source
        .get(span.index as usize..span.end() as usize)
        .map(|fragment| fragment.chars().count())
        .unwrap_or(0)
        .max(1);

    format!(
        "{line}:{column}: {message}\n{}\n{}{}",
        text.trim_end(),
        " ".repeat(column - 1),
        "^".repeat(width)
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_report_points_at_span() {
        const CODE: &str = "fn f() -> T81Int {\n    let c = a + b\n}";

        let err = ParseError::new(ParseErrorKind::UnterminatedStatement, Span::new(23, 3));
        assert_eq!(
            err.report(CODE),
            "2:5: statement is missing its terminating ';'\n    let c = a + b\n    ^^^"
        );
    }

    #[test]
    fn test_lex_report() {
        let err = T81Error::from(LexError::Unrecognized {
            lexeme: "#".into(),
            span: Span::new(2, 1),
        });
        assert_eq!(err.report("a #"), "1:3: unrecognized input \"#\"\na #\n  ^");
    }
}
