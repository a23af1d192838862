//! Cursor over a window of tokens.
use crate::{
    error::{ParseError, ParseErrorKind},
    tokens::{Span, Token, TokenKind},
};

/// Stream over a window of already lexed tokens.
///
/// The parser works on windows: a function is handed the tokens from
/// `fn` to its closing brace, a statement the tokens from its keyword to
/// its semicolon, and so on. Positions returned by the search methods are
/// absolute indices into the window, so they can be used with
/// [`TokenStream::slice`].
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> TokenStream<'a> {
    #[inline]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// The whole window, regardless of the cursor.
    #[inline]
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Tokens from the cursor to the end of the window.
    #[inline]
    pub fn remaining(&self) -> &'a [Token] {
        self.tokens.get(self.cursor..).unwrap_or(&[])
    }

    /// Tokens in the absolute range `start..end`, clamped to the window.
    pub fn slice(&self, start: usize, end: usize) -> &'a [Token] {
        let end = end.min(self.tokens.len());
        self.tokens.get(start.min(end)..end).unwrap_or(&[])
    }

    /// Span of the token under the cursor, or of the last token when the
    /// cursor is at the end. Used to point errors at something.
    pub fn current_span(&self) -> Span {
        self.tokens
            .get(self.cursor)
            .or_else(|| self.tokens.last())
            .map(|token| token.span)
            .unwrap_or_default()
    }

    /// Return the current token without advancing the cursor.
    #[inline]
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    #[inline]
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Look ahead `n` tokens past the cursor without advancing.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.cursor + n)
    }

    /// Consumes the current token regardless of kind.
    ///
    /// Returns `None` when the cursor is at the end of the window.
    #[inline]
    pub fn next_token(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    /// Consumes the current token if it matches the given token kind.
    ///
    /// Returns true when matched. Does not consume the token if the
    /// kinds do not match.
    pub fn match_token(&mut self, token_kind: TokenKind) -> bool {
        let is_match = self.peek_kind() == Some(token_kind);
        if is_match {
            self.cursor += 1;
        }
        is_match
    }

    /// Return the current token and advance the cursor.
    ///
    /// The cursor is not advanced if the token kind does not match.
    pub fn consume(&mut self, token_kind: TokenKind, msg: &str) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == token_kind => {
                self.cursor += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    encountered: token.kind,
                    msg: msg.to_owned(),
                },
                token.span,
            )),
            None => Err(ParseError::new(
                ParseErrorKind::UnexpectedEnd {
                    msg: msg.to_owned(),
                },
                self.current_span(),
            )),
        }
    }

    /// Move the cursor to an absolute position in the window.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.cursor = position.min(self.tokens.len());
    }

    /// Absolute position of the first token of the given kind,
    /// searching from the cursor.
    pub fn find(&self, token_kind: TokenKind) -> Option<usize> {
        self.remaining()
            .iter()
            .position(|token| token.kind == token_kind)
            .map(|offset| self.cursor + offset)
    }

    /// Find the delimiter closing the one at `open_at`.
    ///
    /// Tracks nesting depth, incrementing on the opening kind and
    /// decrementing on the closing kind, until the depth returns to zero.
    /// Returns the absolute position of the closing delimiter, or `None`
    /// when the window ends first.
    pub fn find_closing(&self, open_at: usize, open: TokenKind, close: TokenKind) -> Option<usize> {
        debug_assert_eq!(self.tokens.get(open_at).map(|t| t.kind), Some(open));

        let mut depth = 0_usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open_at) {
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{config::Strictness, lex::tokenize, tokens::Keyword};

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source, Strictness::Strict).unwrap()
    }

    #[test]
    fn test_match_and_consume() {
        let tokens = tokens("let x = 1t;");
        let mut stream = TokenStream::new(&tokens);

        assert!(!stream.match_token(TokenKind::Ident));
        assert!(stream.match_token(TokenKind::Keyword(Keyword::Let)));
        let name = stream.consume(TokenKind::Ident, "expected name").unwrap();
        assert_eq!(name.lexeme, "x");

        let err = stream
            .consume(TokenKind::Colon, "expected ':'")
            .unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                encountered: TokenKind::Eq,
                msg: "expected ':'".to_owned(),
            }
        );
        // Cursor stays put on mismatch.
        assert_eq!(stream.peek_kind(), Some(TokenKind::Eq));
    }

    #[test]
    fn test_find_from_cursor() {
        let tokens = tokens("a ; b ; c");
        let mut stream = TokenStream::new(&tokens);

        assert_eq!(stream.find(TokenKind::Semicolon), Some(1));
        stream.seek(2);
        assert_eq!(stream.find(TokenKind::Semicolon), Some(3));
        stream.seek(4);
        assert_eq!(stream.find(TokenKind::Semicolon), None);
    }

    #[test]
    fn test_find_closing_nested() {
        let tokens = tokens("{ a { b } { { c } } } d }");
        // Last brace is a stray.
        let stream = TokenStream::new(&tokens);

        assert_eq!(
            stream.find_closing(0, TokenKind::LeftBrace, TokenKind::RightBrace),
            Some(10)
        );
        assert_eq!(
            stream.find_closing(2, TokenKind::LeftBrace, TokenKind::RightBrace),
            Some(4)
        );
    }

    #[test]
    fn test_find_closing_unbalanced() {
        let tokens = tokens("( a ( b )");
        let stream = TokenStream::new(&tokens);

        assert_eq!(
            stream.find_closing(0, TokenKind::LeftParen, TokenKind::RightParen),
            None
        );
    }

    #[test]
    fn test_slice_clamps() {
        let tokens = tokens("a b c");
        let stream = TokenStream::new(&tokens);

        assert_eq!(stream.slice(1, 2).len(), 1);
        assert_eq!(stream.slice(2, 10).len(), 1);
        assert!(stream.slice(5, 10).is_empty());
    }
}
