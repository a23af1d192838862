//! Annotation markers trailing a binding.
//!
//! ```text
//! let x: T81Int = 5t @entropy(0.42) @tag("seed");
//!                    ^^^^^^^^^^^^^^^^^^^^^^^^^^^
//! ```
use super::{ParseContext, ParseResult};
use crate::{
    error::{ParseError, ParseErrorKind},
    token_stream::TokenStream,
    tokens::{Token, TokenKind},
};
use log::warn;
use smol_str::SmolStr;

/// Values collected from the markers of one statement.
#[derive(Debug, Default)]
pub(crate) struct Markers {
    pub entropy: Option<f64>,
    pub tag: Option<SmolStr>,
}

/// Scan the tokens from the cursor up to the statement's semicolon.
///
/// A marker is `@name ( value )`. When a marker occurs more than once,
/// the last occurrence wins. Anything that isn't a well formed, known
/// marker is skipped under the lenient policy and rejected under the
/// strict one.
pub(crate) fn parse_markers(
    input: &mut TokenStream,
    ctx: &mut ParseContext,
) -> ParseResult<Markers> {
    let mut markers = Markers::default();

    while let Some(token) = input.peek() {
        match token.kind {
            TokenKind::Semicolon => break,
            TokenKind::At => {
                let position = input.position();
                match marker_value(input) {
                    Some(value) => {
                        if apply_marker(&mut markers, token, value, ctx)? {
                            input.seek(position + 4);
                            continue;
                        }
                    }
                    None => {
                        if ctx.is_strict() {
                            return Err(ParseError::new(
                                ParseErrorKind::MalformedAnnotation {
                                    name: token.lexeme.clone(),
                                },
                                token.span,
                            ));
                        }
                        warn!("ignoring malformed annotation {}", token.lexeme);
                    }
                }
                input.next_token();
            }
            _ => {
                if ctx.is_strict() {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken {
                            encountered: token.kind,
                            msg: "expected an annotation or ';'".to_owned(),
                        },
                        token.span,
                    ));
                }
                warn!("ignoring {:?} after expression", token.lexeme);
                input.next_token();
            }
        }
    }

    Ok(markers)
}

/// The value token of a marker under the cursor, if the marker is
/// followed by `(`, a single token, and `)`.
fn marker_value<'a>(input: &TokenStream<'a>) -> Option<&'a Token> {
    match (input.peek_nth(1), input.peek_nth(2), input.peek_nth(3)) {
        (Some(open), Some(value), Some(close))
            if open.kind == TokenKind::LeftParen && close.kind == TokenKind::RightParen =>
        {
            Some(value)
        }
        _ => None,
    }
}

/// Store a marker's value. Returns `false` when the marker was skipped.
fn apply_marker(
    markers: &mut Markers,
    marker: &Token,
    value: &Token,
    ctx: &ParseContext,
) -> ParseResult<bool> {
    let malformed = || {
        ParseError::new(
            ParseErrorKind::MalformedAnnotation {
                name: marker.lexeme.clone(),
            },
            marker.span + value.span,
        )
    };

    let applied = match marker.lexeme.as_str() {
        "@entropy" => match entropy_value(value)? {
            Some(entropy) => {
                markers.entropy = Some(entropy);
                true
            }
            None if ctx.is_strict() => return Err(malformed()),
            None => false,
        },
        "@tag" => match value.kind {
            TokenKind::Str => {
                markers.tag = Some(value.lexeme.trim_matches('"').into());
                true
            }
            TokenKind::Ident => {
                markers.tag = Some(value.lexeme.clone());
                true
            }
            _ if ctx.is_strict() => return Err(malformed()),
            _ => false,
        },
        _ => {
            if ctx.is_strict() {
                return Err(ParseError::new(
                    ParseErrorKind::UnknownAnnotation {
                        name: marker.lexeme.clone(),
                    },
                    marker.span,
                ));
            }
            false
        }
    };

    if !applied {
        warn!("ignoring annotation {}({})", marker.lexeme, value.lexeme);
    }
    Ok(applied)
}

/// Entropy is a float, or a ternary number with its marker stripped.
///
/// Values that overflow an `f64` are invalid.
fn entropy_value(value: &Token) -> ParseResult<Option<f64>> {
    let digits = match value.kind {
        TokenKind::Float => value.lexeme.as_str(),
        TokenKind::Number => value.lexeme.trim_end_matches('t'),
        _ => return Ok(None),
    };

    match digits.parse::<f64>() {
        Ok(entropy) if entropy.is_finite() => Ok(Some(entropy)),
        _ => Err(ParseError::new(
            ParseErrorKind::InvalidNumber {
                lexeme: value.lexeme.clone(),
            },
            value.span,
        )),
    }
}
