//! Tokens
use smol_str::SmolStr;
use std::{fmt, ops, str::FromStr};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Source fragment the token was scanned from.
    pub lexeme: SmolStr,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum TokenKind {
    // Simple
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }
    Colon,      // :
    Comma,      // ,
    Semicolon,  // ;
    Eq,         // =
    Arrow,      // ->
    /// Single character arithmetic or comparison operator.
    Op,

    // ------------------------------------------------------------------------
    // Complex
    Ident,
    /// Reserved identifiers
    Keyword(Keyword),
    /// Ternary number literal, digits with a trailing `t`.
    Number,
    /// Run of ternary symbol characters.
    Symbol,
    Float,
    /// Double quoted string literal, quotes included in the lexeme.
    Str,
    /// Annotation marker, `@` followed by a name.
    At,

    // ------------------------------------------------------------------------
    // Special
    /// Character that no token class matches.
    Unknown,
}

impl fmt::Display for TokenKind {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind as T;
        match self {
            T::LeftParen  => write!(f, "("),
            T::RightParen => write!(f, ")"),
            T::LeftBrace  => write!(f, "{{"),
            T::RightBrace => write!(f, "}}"),
            T::Colon      => write!(f, ":"),
            T::Comma      => write!(f, ","),
            T::Semicolon  => write!(f, ";"),
            T::Eq         => write!(f, "="),
            T::Arrow      => write!(f, "->"),
            T::Op         => write!(f, "operator"),
            T::Ident      => write!(f, "identifier"),
            T::Keyword(k) => write!(f, "{}", k),
            T::Number     => write!(f, "number"),
            T::Symbol     => write!(f, "symbol"),
            T::Float      => write!(f, "float"),
            T::Str        => write!(f, "string"),
            T::At         => write!(f, "annotation"),
            T::Unknown    => write!(f, "unknown"),
        }
    }
}

/// Reserved keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Fn,
    Let,
    Mut,
    Return,
}

impl fmt::Display for Keyword {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Keyword as K;
        match self {
            K::Fn     => write!(f, "fn"),
            K::Let    => write!(f, "let"),
            K::Mut    => write!(f, "mut"),
            K::Return => write!(f, "return"),
        }
    }
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Keyword as K;
        match s {
            "fn" => Ok(K::Fn),
            "let" => Ok(K::Let),
            "mut" => Ok(K::Mut),
            "return" => Ok(K::Return),
            _ => Err(()),
        }
    }
}

/// Chunk of source code, encoded as a starting byte position and a size.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Span {
    pub index: u32,
    pub size: u32,
}

impl Span {
    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    #[inline]
    pub fn fragment<'a>(&self, text: &'a str) -> &'a str {
        &text[(self.index as usize)..(self.end() as usize)]
    }

    /// Ending index of the span, exclusive.
    #[inline]
    pub fn end(&self) -> u32 {
        self.index + self.size
    }

    /// Slice out the full line of source code the span starts on,
    /// including its trailing newline if there is one.
    pub fn surrounding_line<'a>(&self, text: &'a str) -> (&'a str, Span) {
        let index = (self.index as usize).min(text.len());

        let start = text[..index].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let end = text[index..]
            .find('\n')
            .map(|i| index + i + 1)
            .unwrap_or_else(|| text.len());

        let line_span = Span {
            index: start as u32,
            size: (end - start) as u32,
        };

        (&text[start..end], line_span)
    }

    /// One-based line and column of the span's start.
    pub fn line_column(&self, text: &str) -> (usize, usize) {
        let index = (self.index as usize).min(text.len());
        let before = &text[..index];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rfind('\n')
            .map(|i| before[i + 1..].chars().count())
            .unwrap_or_else(|| before.chars().count())
            + 1;
        (line, column)
    }

    /// Combine two spans to produce a new span that
    /// covers both (and everything inbetween).
    ///
    /// ```
    /// use t81lang::tokens::Span;
    ///
    /// let span1 = Span::new(4, 13);
    /// let span2 = Span::new(21, 13);
    /// let span3 = span1.merge(&span2);
    /// assert_eq!(4, span3.index);
    /// assert_eq!(30, span3.size);
    /// ```
    pub fn merge(&self, other: &Span) -> Span {
        let index = u32::min(self.index, other.index);
        let size = u32::max(self.end(), other.end()) - index;
        Span { index, size }
    }
}

impl ops::Add for Span {
    type Output = Span;

    #[allow(clippy::suspicious_arithmetic_impl)] // subtract needed to merge spans
    fn add(self, rhs: Self) -> Self::Output {
        self.merge(&rhs)
    }
}
