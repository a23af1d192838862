use super::{
    stmts::{Let, Return, Stmt},
    Parse, ParseContext, ParseResult,
};
use crate::{
    error::{ParseError, ParseErrorKind},
    token_stream::TokenStream,
    tokens::{Keyword, TokenKind},
};
use log::warn;

/// Function body, the tokens between the braces.
#[derive(Debug)]
pub struct Block;

/// Cut the body into statement windows, each running from its keyword
/// to the next semicolon inclusive, and parse them in order.
impl Parse for Block {
    type Output = Vec<Stmt>;

    fn parse(input: &mut TokenStream, ctx: &mut ParseContext) -> ParseResult<Vec<Stmt>> {
        use TokenKind as T;

        let mut stmts = vec![];

        while let Some(token) = input.peek() {
            let keyword = match token.kind {
                T::Keyword(keyword @ (Keyword::Let | Keyword::Return)) => keyword,
                _ => {
                    if ctx.is_strict() {
                        return Err(ParseError::new(
                            ParseErrorKind::UnexpectedToken {
                                encountered: token.kind,
                                msg: "expected 'let' or 'return'".to_owned(),
                            },
                            token.span,
                        ));
                    }
                    warn!("skipping unrecognized statement token {:?}", token.lexeme);
                    input.next_token();
                    continue;
                }
            };

            let start = input.position();
            let end = input.find(T::Semicolon).unwrap_or(input.tokens().len());

            // Another statement starting before the semicolon means this one
            // was never terminated.
            let intruder = input
                .slice(start + 1, end)
                .iter()
                .position(|t| starts_statement(t.kind))
                .map(|offset| start + 1 + offset);

            if intruder.is_some() || end == input.tokens().len() {
                let last = input
                    .slice(start, intruder.unwrap_or(end))
                    .last()
                    .map(|t| t.span);
                let span = token.span + last.unwrap_or(token.span);
                return Err(ParseError::new(ParseErrorKind::UnterminatedStatement, span));
            }

            let mut window = TokenStream::new(input.slice(start, end + 1));
            let stmt = match keyword {
                Keyword::Let => Let::parse(&mut window, ctx).map(Stmt::Let)?,
                _ => Return::parse(&mut window, ctx).map(Stmt::Return)?,
            };
            stmts.push(stmt);

            input.seek(end + 1);
        }

        Ok(stmts)
    }
}

fn starts_statement(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Keyword(Keyword::Let | Keyword::Return | Keyword::Fn)
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{annotation::AnnotationLog, config::Strictness, lex::tokenize, tokens::Span};

    fn parse_block(source: &str, strictness: Strictness) -> ParseResult<Vec<Stmt>> {
        let tokens = tokenize(source, Strictness::Strict).unwrap();
        let mut log = AnnotationLog::new();
        let mut ctx = ParseContext::new(strictness, &mut log);
        Block::parse(&mut TokenStream::new(&tokens), &mut ctx)
    }

    #[test]
    fn test_statements_in_order() {
        let source = "let c = a + b; let d = 1t; return c;";
        let stmts = parse_block(source, Strictness::Strict).unwrap();
        assert_eq!(stmts.len(), 3);
        assert!(matches!(stmts[0], Stmt::Let(ref stmt) if stmt.name == "c"));
        assert!(matches!(stmts[1], Stmt::Let(ref stmt) if stmt.name == "d"));
        assert!(matches!(stmts[2], Stmt::Return(_)));
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_block("", Strictness::Strict).unwrap().is_empty());
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_block("let c = a + b", Strictness::Lenient).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedStatement);
        assert_eq!(err.span, Span::new(0, 13));

        let err = parse_block("let c = a + b return c;", Strictness::Lenient).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedStatement);
        assert_eq!(err.span, Span::new(0, 13));
    }

    #[test]
    fn test_stray_tokens() {
        let stmts = parse_block("x let y = 2t; ; return y;", Strictness::Lenient).unwrap();
        assert_eq!(stmts.len(), 2);

        let err = parse_block("x let y = 2t;", Strictness::Strict).unwrap_err();
        match err.kind {
            ParseErrorKind::UnexpectedToken { encountered, .. } => {
                assert_eq!(encountered, TokenKind::Ident)
            }
            other => panic!("expected unexpected token error, got {:?}", other),
        }
    }
}
