use super::{func::Function, Parse, ParseContext, ParseResult};
use crate::{
    error::{ParseError, ParseErrorKind},
    token_stream::TokenStream,
    tokens::{Keyword, TokenKind},
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Root of the tree, the functions of one source in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Parse for Program {
    type Output = Self;

    fn parse(input: &mut TokenStream, ctx: &mut ParseContext) -> ParseResult<Self> {
        use TokenKind as T;

        let mut functions = vec![];

        while let Some(token) = input.peek() {
            if !token.is_keyword(Keyword::Fn) {
                if ctx.is_strict() {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken {
                            encountered: token.kind,
                            msg: "expected 'fn'".to_owned(),
                        },
                        token.span,
                    ));
                }
                warn!("skipping top level token {:?}", token.lexeme);
                input.next_token();
                continue;
            }

            let start = input.position();
            let open = input.find(T::LeftBrace).ok_or_else(|| {
                let kind = ParseErrorKind::MissingHeaderToken {
                    expected: T::LeftBrace,
                };
                ParseError::new(kind, token.span)
            })?;
            let close = input
                .find_closing(open, T::LeftBrace, T::RightBrace)
                .ok_or_else(|| {
                    let end = input.tokens().last().map(|t| t.span).unwrap_or(token.span);
                    ParseError::new(ParseErrorKind::UnbalancedBraces, token.span + end)
                })?;

            let mut fn_tokens = TokenStream::new(input.slice(start, close + 1));
            let function = Function::parse(&mut fn_tokens, ctx)?;
            debug!(
                "parsed function '{}' with {} parameters and {} statements",
                function.name,
                function.params.len(),
                function.body.len()
            );
            functions.push(function);

            input.seek(close + 1);
        }

        Ok(Program { functions })
    }
}
