use super::{Parse, ParseContext, ParseResult};
use crate::{
    error::{ParseError, ParseErrorKind},
    token_stream::TokenStream,
    tokens::TokenKind,
};
use log::trace;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Expression.
///
/// Only two shapes are understood: a single token, and three tokens
/// with an operator in the middle. There is no precedence, nesting or
/// grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum Expr {
    #[serde(rename = "BinaryExpr")]
    Binary(BinaryExpr),
    Literal(Literal),
    /// Window of tokens with a shape that isn't supported.
    Unknown,
}

/// Binary operation on two operands, kept as raw lexemes.
///
/// # Example
///
/// ```text
/// a + b
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: SmolStr,
    pub op: SmolStr,
    pub right: SmolStr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: SmolStr,
}

/// Classify the stream's whole remaining window as one expression.
impl Parse for Expr {
    type Output = Self;

    fn parse(input: &mut TokenStream, ctx: &mut ParseContext) -> ParseResult<Self> {
        let window = input.remaining();

        let expr = match window {
            [value] => Expr::Literal(Literal {
                value: value.lexeme.clone(),
            }),
            [left, op, right] if op.kind == TokenKind::Op => Expr::Binary(BinaryExpr {
                left: left.lexeme.clone(),
                op: op.lexeme.clone(),
                right: right.lexeme.clone(),
            }),
            _ => {
                if ctx.is_strict() {
                    let span = match (window.first(), window.last()) {
                        (Some(first), Some(last)) => first.span + last.span,
                        _ => input.current_span(),
                    };
                    return Err(ParseError::new(
                        ParseErrorKind::UnrecognizedExpressionShape { len: window.len() },
                        span,
                    ));
                }
                trace!("unrecognized expression shape of {} tokens", window.len());
                Expr::Unknown
            }
        };

        input.seek(input.tokens().len());
        Ok(expr)
    }
}
