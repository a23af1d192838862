//! Lexical analysis (tokenizer)
use crate::{
    config::Strictness,
    error::LexError,
    tokens::{Keyword, Span, Token, TokenKind},
};

use itertools::{multipeek, MultiPeek};
use log::warn;
use std::{fmt, str::CharIndices};

/// Tokenize the whole source text.
///
/// Characters that don't belong to any token class are dropped under
/// [`Strictness::Lenient`], and fail tokenization under [`Strictness::Strict`].
pub fn tokenize(source: &str, strictness: Strictness) -> Result<Vec<Token>, LexError> {
    let mut tokens = vec![];

    for token in Lexer::new(source) {
        if token.kind == TokenKind::Unknown {
            match strictness {
                Strictness::Strict => {
                    return Err(LexError::Unrecognized {
                        lexeme: token.lexeme,
                        span: token.span,
                    })
                }
                Strictness::Lenient => {
                    warn!(
                        "dropping unrecognized input {:?} at byte {}",
                        token.lexeme, token.span.index
                    );
                    continue;
                }
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}

/// Write a table of tokens, one per line.
pub fn dump_tokens(tokens: &[Token], out: &mut impl fmt::Write) -> fmt::Result {
    writeln!(out, " offset | len | token       | fragment")?;
    for token in tokens {
        let offset = token.span.index;
        let len = token.span.size;
        let kind = format!("{:?}", token.kind); // cannot format debug print {:?} into columns
        let lexeme = &token.lexeme;
        writeln!(out, "{offset:7}:{len: <3} {kind: <20} \"{lexeme}\"")?;
    }
    Ok(())
}

/// Lexical analyzer.
pub struct Lexer<'a> {
    source: SourceText<'a>,
    /// Start absolute byte position of the current token
    /// in the source.
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source_code: &'a str) -> Self {
        Self {
            source: SourceText::new(source_code),
            token_start: 0,
        }
    }

    /// Original source code that was passed in during construction.
    pub fn source_code(&self) -> &'a str {
        self.source.original
    }

    /// Scan the source characters and construct the next token.
    ///
    /// Whitespace and line comments are consumed without producing a token.
    /// Returns `None` once the source is exhausted.
    #[rustfmt::skip]
    pub fn next_token(&mut self) -> Option<Token> {
        use TokenKind as T;

        loop {
            self.source.reset_peek();
            let (index, next_char) = self.source.next_char()?;
            self.token_start = index;

            let kind = match next_char {
                '('       => T::LeftParen,
                ')'       => T::RightParen,
                '{'       => T::LeftBrace,
                '}'       => T::RightBrace,
                ':'       => T::Colon,
                ','       => T::Comma,
                ';'       => T::Semicolon,
                '='       => T::Eq,
                '-'       => {
                    if let Some('>') = self.source.peek_char() {
                        self.source.next_char();
                        T::Arrow
                    } else {
                        T::Op
                    }
                }
                '/'       => {
                    if let Some('/') = self.source.peek_char() {
                        self.consume_until_newline();
                        continue;
                    } else {
                        T::Op
                    }
                }
                '+' | '*' | '<' | '>' | '!' => T::Op,
                '@'       => self.consume_annotation(),
                '"'       => self.consume_string(),
                '0'..='9' => self.consume_number(),
                '_' | 'a'..='z' | 'A'..='Z' => self.consume_ident(),
                c if is_symbol(c)     => self.consume_symbol(),
                c if c.is_whitespace() => {
                    self.consume_whitespace();
                    continue;
                }
                _ => T::Unknown,
            };

            return Some(self.make_token(kind));
        }
    }

    /// Build a token, using the source text from the position
    /// stored at the start of the iteration to the current
    /// cursor position.
    fn make_token(&mut self, kind: TokenKind) -> Token {
        let end = self.source.offset();
        let span = Span::new(self.token_start as u32, (end - self.token_start) as u32);
        Token::new(kind, span, span.fragment(self.source.original))
    }

    fn fragment(&mut self) -> &'a str {
        let end = self.source.offset();
        &self.source.original[self.token_start..end]
    }

    /// Consume whitespace characters until a non-whitespace character is encountered.
    fn consume_whitespace(&mut self) {
        self.source.reset_peek();
        while let Some(c) = self.source.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            self.source.next_char();
        }
    }

    fn consume_until_newline(&mut self) {
        self.source.reset_peek();
        while let Some(c) = self.source.peek_char() {
            if matches!(c, '\n' | '\r') {
                break;
            }
            self.source.next_char();
        }
    }

    /// Ternary number literal `12t`, or a float `1.25`.
    ///
    /// Digits without the ternary marker or a fraction don't
    /// belong to any token class.
    fn consume_number(&mut self) -> TokenKind {
        self.consume_digits();

        self.source.reset_peek();
        match self.source.peek_char2() {
            (Some('t'), _) => {
                self.source.next_char();
                TokenKind::Number
            }
            (Some('.'), Some('0'..='9')) => {
                self.source.next_char();
                self.consume_digits();
                TokenKind::Float
            }
            _ => TokenKind::Unknown,
        }
    }

    fn consume_digits(&mut self) {
        self.source.reset_peek();
        while let Some('0'..='9') = self.source.peek_char() {
            self.source.next_char();
        }
    }

    fn consume_ident(&mut self) -> TokenKind {
        self.source.reset_peek();
        while let Some(c) = self.source.peek_char() {
            match c {
                '_' | 'a'..='z' | 'A'..='Z' | '0'..='9' => {
                    self.source.next_char();
                }
                _ => break,
            }
        }

        // If a valid keyword can be parsed from the source fragment, then
        // the token is a reserved keyword instead of a user defined identifier.
        self.fragment()
            .parse::<Keyword>()
            .map(TokenKind::Keyword)
            .unwrap_or(TokenKind::Ident)
    }

    fn consume_symbol(&mut self) -> TokenKind {
        self.source.reset_peek();
        while let Some(c) = self.source.peek_char() {
            if !is_symbol(c) {
                break;
            }
            self.source.next_char();
        }
        TokenKind::Symbol
    }

    /// Annotation marker `@name`. A lone `@` is not a token.
    fn consume_annotation(&mut self) -> TokenKind {
        self.source.reset_peek();
        let mut is_marker = false;
        while let Some('_' | 'a'..='z' | 'A'..='Z') = self.source.peek_char() {
            self.source.next_char();
            is_marker = true;
        }

        if is_marker {
            TokenKind::At
        } else {
            TokenKind::Unknown
        }
    }

    /// String literal up to the closing quote on the same line.
    ///
    /// An unterminated string leaves only the opening quote as
    /// an unknown token, so the rest of the line is lexed normally.
    fn consume_string(&mut self) -> TokenKind {
        self.source.reset_peek();

        let mut length = 0;
        let terminated = loop {
            match self.source.peek_char() {
                Some('"') => break true,
                Some('\n') | None => break false,
                Some(_) => length += 1,
            }
        };

        if !terminated {
            return TokenKind::Unknown;
        }

        // Content and the closing quote.
        for _ in 0..=length {
            self.source.next_char();
        }
        TokenKind::Str
    }
}

/// Implement `Lexer` as an interator for consuming
/// tokens lazily.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Ternary symbol characters. The APL range covers `⍵` through `⍺`.
fn is_symbol(c: char) -> bool {
    matches!(
        c,
        '\u{2375}'..='\u{237A}' | 'β' | 'γ' | 'δ' | 'θ' | 'σ' | 'φ' | 'ψ' | 'Ω'
    )
}

/// Wrapper for source code that keeps a cursor position.
///
/// Allows forward lookup via peeking.
struct SourceText<'a> {
    /// Keep reference to the source so the lexer can
    /// slice fragments from it.
    original: &'a str,

    /// Iterator over UTF-8 encoded source code.
    ///
    /// The `MultiPeek` wrapper allows for arbitrary lookahead by consuming
    /// the iterator internally and buffering the result. This is required
    /// because UTF-8 characters are variable in width.
    ///
    /// Peeking advances the internal peek cursor by 1. The peek cursor
    /// offset is restored to 0 when calling `MultiPeek::next()`
    /// or `MultiPeek::reset_peek()`.
    source: MultiPeek<CharIndices<'a>>,
}

impl<'a> SourceText<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            original: source,
            source: multipeek(source.char_indices()),
        }
    }

    /// Advance the cursor and return the next position and character.
    fn next_char(&mut self) -> Option<(usize, char)> {
        self.source.next()
    }

    /// This call advances the peek cursor. Subsequent
    /// calls will look ahead by one character each call.
    fn peek_char(&mut self) -> Option<char> {
        self.source.peek().map(|(_, c)| *c)
    }

    /// Two character lookahead.
    fn peek_char2(&mut self) -> (Option<char>, Option<char>) {
        (self.peek_char(), self.peek_char())
    }

    fn reset_peek(&mut self) {
        self.source.reset_peek()
    }

    /// Byte position of the next unconsumed character.
    fn offset(&mut self) -> usize {
        self.source.reset_peek();
        let offset = self
            .source
            .peek()
            .map(|(index, _)| *index)
            .unwrap_or(self.original.len());
        self.source.reset_peek();
        offset
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|token| token.kind).collect()
    }

    fn lexemes(source: &str) -> Vec<String> {
        Lexer::new(source)
            .map(|token| token.lexeme.to_string())
            .collect()
    }

    #[test]
    #[rustfmt::skip]
    fn test_function_header() {
        use TokenKind as T;

        assert_eq!(
            kinds("fn add(a: T81Int, b: T81Int) -> T81Int {"),
            vec![
                T::Keyword(Keyword::Fn), T::Ident, T::LeftParen,
                T::Ident, T::Colon, T::Ident, T::Comma,
                T::Ident, T::Colon, T::Ident, T::RightParen,
                T::Arrow, T::Ident, T::LeftBrace,
            ]
        );
    }

    #[test]
    fn test_number_classes() {
        use TokenKind as T;

        assert_eq!(kinds("12t"), vec![T::Number]);
        assert_eq!(kinds("0.42"), vec![T::Float]);
        assert_eq!(kinds("12"), vec![T::Unknown]);
        assert_eq!(lexemes("5tx 1.5t"), vec!["5t", "x", "1.5", "t"]);
    }

    #[test]
    fn test_annotations_and_strings() {
        use TokenKind as T;

        assert_eq!(
            kinds("@entropy(0.42) @tag(\"seed\")"),
            vec![
                T::At,
                T::LeftParen,
                T::Float,
                T::RightParen,
                T::At,
                T::LeftParen,
                T::Str,
                T::RightParen,
            ]
        );
        assert_eq!(lexemes("@tag(\"a b\")")[2], "\"a b\"");
        assert_eq!(kinds("@ x"), vec![T::Unknown, T::Ident]);
    }

    #[test]
    fn test_unterminated_string() {
        use TokenKind as T;

        assert_eq!(kinds("\"seed"), vec![T::Unknown, T::Ident]);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(lexemes("⍺β x ψΩ"), vec!["⍺β", "x", "ψΩ"]);
        assert_eq!(kinds("⍺")[0], TokenKind::Symbol);
    }

    #[test]
    fn test_operators_and_arrow() {
        assert_eq!(
            lexemes("a-b->c<d"),
            vec!["a", "-", "b", "->", "c", "<", "d"]
        );
        assert_eq!(kinds("-> -")[0], TokenKind::Arrow);
        assert_eq!(kinds("-> -")[1], TokenKind::Op);
    }

    #[test]
    fn test_comments_and_whitespace() {
        assert_eq!(lexemes("a // b c\n\t d / e"), vec!["a", "d", "/", "e"]);
    }

    #[test]
    fn test_spans() {
        let source = "let ⍺ = 1t;";
        for token in Lexer::new(source) {
            assert_eq!(token.span.fragment(source), token.lexeme.as_str());
        }
    }

    #[test]
    fn test_tokenize_strictness() {
        let lenient = tokenize("let x = 1t # 2;", Strictness::Lenient).unwrap();
        assert_eq!(lenient.len(), 5);

        match tokenize("let x = 1t # 2;", Strictness::Strict) {
            Err(LexError::Unrecognized { lexeme, span }) => {
                assert_eq!(lexeme, "#");
                assert_eq!(span, Span::new(11, 1));
            }
            other => panic!("expected unrecognized input error, got {:?}", other),
        }
    }
}
