//! Syntactic analysis.
//!
//! Each parser consumes a window of tokens. The program parser finds the
//! token span of every function, the function parser finds its parameter
//! list and body, and the body parser cuts the body into statement windows.
mod block;
mod expr;
mod func;
mod marker;
mod prog;
mod stmts;
mod visitor;

pub use block::*;
pub use expr::*;
pub use func::*;
pub use prog::*;
pub use stmts::*;
pub use visitor::*;

use crate::{
    annotation::AnnotationLog, config::Strictness, error::ParseError, token_stream::TokenStream,
    tokens::Token,
};

pub type ParseResult<T> = std::result::Result<T, ParseError>;

pub trait Parse: Sized {
    type Output;

    fn parse(input: &mut TokenStream, ctx: &mut ParseContext) -> ParseResult<Self::Output>;
}

/// State shared by the parsers during one pass.
pub struct ParseContext<'a> {
    pub strictness: Strictness,
    /// Receives a record for every annotated `let` binding.
    pub annotations: &'a mut AnnotationLog,
}

impl<'a> ParseContext<'a> {
    pub fn new(strictness: Strictness, annotations: &'a mut AnnotationLog) -> Self {
        Self {
            strictness,
            annotations,
        }
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strictness.is_strict()
    }
}

/// Parse a whole token sequence into a program.
pub fn parse_program(
    tokens: &[Token],
    strictness: Strictness,
    annotations: &mut AnnotationLog,
) -> ParseResult<Program> {
    let mut ctx = ParseContext::new(strictness, annotations);
    Program::parse(&mut TokenStream::new(tokens), &mut ctx)
}
