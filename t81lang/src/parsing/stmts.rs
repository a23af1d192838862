//! Statement parsing.
use super::{
    expr::Expr,
    marker::{parse_markers, Markers},
    Parse, ParseContext, ParseResult,
};
use crate::{
    error::{ParseError, ParseErrorKind},
    token_stream::TokenStream,
    tokens::{Keyword, Span, Token, TokenKind},
};
use log::debug;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum Stmt {
    /// Variable binding
    Let(Let),
    Return(Return),
}

/// Variable binding, with optional type hint and annotations.
///
/// # Example
///
/// ```text
/// let mut x: T81Int = 5t @entropy(0.42) @tag("seed");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Let {
    pub name: SmolStr,
    #[serde(default)]
    pub mutable: bool,
    #[serde(rename = "type")]
    pub ty: Option<SmolStr>,
    pub expr: Expr,
    pub entropy: Option<f64>,
    pub tag: Option<SmolStr>,
}

/// # Example
///
/// ```text
/// return c;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Return {
    pub expr: Expr,
}

/// Parse a `let` statement window, from the keyword to the semicolon.
///
/// Annotations found on the binding are recorded in the context's log.
impl Parse for Let {
    type Output = Self;

    fn parse(input: &mut TokenStream, ctx: &mut ParseContext) -> ParseResult<Self> {
        let semicolon = terminator(input)?;

        input.consume(TokenKind::Keyword(Keyword::Let), "expected 'let'")?;
        let mutable = input.match_token(TokenKind::Keyword(Keyword::Mut));
        let name = input
            .consume(TokenKind::Ident, "expected binding name")?
            .lexeme
            .clone();

        let ty = if input.match_token(TokenKind::Colon) {
            let ty = input.consume(TokenKind::Ident, "expected type name after ':'")?;
            Some(ty.lexeme.clone())
        } else {
            None
        };

        let eq = input.consume(TokenKind::Eq, "expected '=' after binding name")?;

        // Expression ends where the annotations start.
        let expr_start = input.position();
        let expr_end = match input.find(TokenKind::At) {
            Some(at) => at.min(semicolon),
            None => semicolon,
        };
        let expr = parse_expr(input.slice(expr_start, expr_end), eq.span, ctx)?;

        input.seek(expr_end);
        let Markers { entropy, tag } = parse_markers(input, ctx)?;
        input.consume(TokenKind::Semicolon, "expected ';'")?;

        if ctx.annotations.record(name.clone(), entropy, tag.clone()) {
            debug!("annotated '{name}': entropy={entropy:?} tag={tag:?}");
        }

        Ok(Let {
            name,
            mutable,
            ty,
            expr,
            entropy,
            tag,
        })
    }
}

/// Parse a `return` statement window, from the keyword to the semicolon.
impl Parse for Return {
    type Output = Self;

    fn parse(input: &mut TokenStream, ctx: &mut ParseContext) -> ParseResult<Self> {
        let semicolon = terminator(input)?;

        let keyword = input.consume(TokenKind::Keyword(Keyword::Return), "expected 'return'")?;
        let expr = parse_expr(input.slice(input.position(), semicolon), keyword.span, ctx)?;

        input.seek(semicolon);
        input.consume(TokenKind::Semicolon, "expected ';'")?;

        Ok(Return { expr })
    }
}

/// Position of the semicolon ending the statement window.
fn terminator(input: &TokenStream) -> ParseResult<usize> {
    match input.tokens().last() {
        Some(Token {
            kind: TokenKind::Semicolon,
            ..
        }) => Ok(input.tokens().len() - 1),
        _ => Err(ParseError::new(
            ParseErrorKind::UnterminatedStatement,
            input.current_span(),
        )),
    }
}

/// Parse an expression window. Errors on an empty window point at `anchor`,
/// the token just before it.
fn parse_expr(window: &[Token], anchor: Span, ctx: &mut ParseContext) -> ParseResult<Expr> {
    Expr::parse(&mut TokenStream::new(window), ctx).map_err(|err| {
        if window.is_empty() {
            ParseError::new(err.kind, anchor)
        } else {
            err
        }
    })
}
