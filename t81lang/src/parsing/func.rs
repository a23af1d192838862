use super::{block::Block, stmts::Stmt, Parse, ParseContext, ParseResult};
use crate::{
    error::{ParseError, ParseErrorKind},
    token_stream::TokenStream,
    tokens::{Keyword, Token, TokenKind},
};
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Function definition.
///
/// # Example
///
/// ```text
/// fn add(a: T81Int, b: T81Int) -> T81Int {
///     let c = a + b;
///     return c;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub struct Function {
    pub name: SmolStr,
    pub params: Vec<Param>,
    pub returns: SmolStr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: SmolStr,
    #[serde(rename = "type")]
    pub ty: SmolStr,
}

/// Parse a function window, from `fn` to its closing brace.
impl Parse for Function {
    type Output = Self;

    fn parse(input: &mut TokenStream, ctx: &mut ParseContext) -> ParseResult<Self> {
        use TokenKind as T;

        input.consume(T::Keyword(Keyword::Fn), "expected 'fn'")?;
        let name = input
            .consume(T::Ident, "expected function name")?
            .lexeme
            .clone();
        trace!("function header '{}'", name);

        let left_paren = input.position();
        expect_header(input, T::LeftParen)?;
        let right_paren = input
            .find_closing(left_paren, T::LeftParen, T::RightParen)
            .ok_or_else(|| missing(input, T::RightParen))?;
        let mut param_tokens = TokenStream::new(input.slice(left_paren + 1, right_paren));
        let params = parse_params(&mut param_tokens, ctx)?;
        input.seek(right_paren + 1);

        expect_header(input, T::Arrow)?;
        let returns = expect_header(input, T::Ident)?.lexeme.clone();

        let left_brace = input.position();
        let open = expect_header(input, T::LeftBrace)?;
        let right_brace = input
            .find_closing(left_brace, T::LeftBrace, T::RightBrace)
            .ok_or_else(|| {
                let end = input.tokens().last().map(|t| t.span).unwrap_or(open.span);
                ParseError::new(ParseErrorKind::UnbalancedBraces, open.span + end)
            })?;
        let mut body_tokens = TokenStream::new(input.slice(left_brace + 1, right_brace));
        let body = Block::parse(&mut body_tokens, ctx)?;
        input.seek(right_brace + 1);

        Ok(Function {
            name,
            params,
            returns,
            body,
        })
    }
}

/// Consume one of the fixed tokens of the function header.
fn expect_header<'a>(input: &mut TokenStream<'a>, kind: TokenKind) -> ParseResult<&'a Token> {
    match input.peek() {
        Some(token) if token.kind == kind => {
            input.next_token();
            Ok(token)
        }
        _ => Err(missing(input, kind)),
    }
}

fn missing(input: &TokenStream, expected: TokenKind) -> ParseError {
    ParseError::new(
        ParseErrorKind::MissingHeaderToken { expected },
        input.current_span(),
    )
}

/// Decode the parameter list as repeating `name : type` triples.
fn parse_params(input: &mut TokenStream, ctx: &mut ParseContext) -> ParseResult<Vec<Param>> {
    let mut params = vec![];

    while let Some(token) = input.peek() {
        match (token.kind, input.peek_nth(1), input.peek_nth(2)) {
            (TokenKind::Ident, Some(colon), Some(ty))
                if colon.kind == TokenKind::Colon && ty.kind == TokenKind::Ident =>
            {
                params.push(Param {
                    name: token.lexeme.clone(),
                    ty: ty.lexeme.clone(),
                });
                input.seek(input.position() + 3);
            }
            (TokenKind::Comma, _, _) => {
                input.next_token();
            }
            _ => {
                if ctx.is_strict() {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken {
                            encountered: token.kind,
                            msg: "expected parameter 'name: type'".to_owned(),
                        },
                        token.span,
                    ));
                }
                warn!("skipping parameter token {:?}", token.lexeme);
                input.next_token();
            }
        }
    }

    Ok(params)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{annotation::AnnotationLog, config::Strictness, lex::tokenize};

    fn parse_fn(source: &str, strictness: Strictness) -> ParseResult<Function> {
        let tokens = tokenize(source, Strictness::Strict).unwrap();
        let mut log = AnnotationLog::new();
        let mut ctx = ParseContext::new(strictness, &mut log);
        Function::parse(&mut TokenStream::new(&tokens), &mut ctx)
    }

    #[test]
    fn test_function() {
        let func = parse_fn(
            "fn add(a: T81Int, b: T81Int) -> T81Int { let c = a + b; return c; }",
            Strictness::Strict,
        )
        .unwrap();

        assert_eq!(func.name, "add");
        assert_eq!(
            func.params,
            vec![
                Param {
                    name: "a".into(),
                    ty: "T81Int".into(),
                },
                Param {
                    name: "b".into(),
                    ty: "T81Int".into(),
                },
            ]
        );
        assert_eq!(func.returns, "T81Int");
        assert_eq!(func.body.len(), 2);
    }

    #[test]
    fn test_no_params() {
        let func = parse_fn("fn main() -> T81Int { return 0t; }", Strictness::Strict).unwrap();
        assert!(func.params.is_empty());
        assert_eq!(func.body.len(), 1);
    }

    #[test]
    fn test_missing_arrow() {
        let err = parse_fn("fn main() T81Int { return 0t; }", Strictness::Lenient).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingHeaderToken {
                expected: TokenKind::Arrow,
            }
        );
    }

    #[test]
    fn test_missing_right_paren() {
        let err = parse_fn("fn main( -> T81Int { return 0t; }", Strictness::Lenient).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingHeaderToken {
                expected: TokenKind::RightParen,
            }
        );
    }

    #[test]
    fn test_unbalanced_body() {
        let err = parse_fn("fn main() -> T81Int { return 0t;", Strictness::Lenient).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnbalancedBraces);
    }

    #[test]
    fn test_malformed_params() {
        let source = "fn f(a: T81Int, ; b: T81Int) -> T81Int { return a; }";
        let func = parse_fn(source, Strictness::Lenient).unwrap();
        assert_eq!(func.params.len(), 2);

        let source = "fn f(a T81Int) -> T81Int { return a; }";
        match parse_fn(source, Strictness::Strict).unwrap_err().kind {
            ParseErrorKind::UnexpectedToken { encountered, .. } => {
                assert_eq!(encountered, TokenKind::Ident)
            }
            other => panic!("expected unexpected token error, got {:?}", other),
        }
    }
}
