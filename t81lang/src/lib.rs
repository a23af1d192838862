pub mod annotation;
pub mod artifact;
pub mod compile;
pub mod config;
pub mod cweb;
pub mod error;
pub mod lex;
pub mod parsing;
pub mod token_stream;
pub mod tokens;

use annotation::AnnotationLog;
use config::CompileOptions;
use error::T81Result;
use log::info;
use parsing::Program;

/// Conventional file extension of T81Lang sources.
pub const SOURCE_EXTENSION: &str = "t81";

/// Everything produced by one compilation.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub program: Program,
    /// TISC text.
    pub ir: String,
    pub annotations: AnnotationLog,
}

/// Compile source text with a fresh annotation log.
pub fn compile_str(source: &str, options: &CompileOptions) -> T81Result<Compilation> {
    compile_with_log(source, options, AnnotationLog::new())
}

/// Compile source text, appending annotations to an existing log.
///
/// The log is handed back in the [`Compilation`], so a caller can thread it
/// through several sources to accumulate their annotations.
pub fn compile_with_log(
    source: &str,
    options: &CompileOptions,
    mut annotations: AnnotationLog,
) -> T81Result<Compilation> {
    // Lexical analysis
    let tokens = lex::tokenize(source, options.strictness)?;

    // Syntactic analysis
    let program = parsing::parse_program(&tokens, options.strictness, &mut annotations)?;

    // Code generation
    let ir = compile::CodeGen::new().compile(&program)?;

    info!(
        "compiled {} functions, {} annotations",
        program.functions.len(),
        annotations.len()
    );

    Ok(Compilation {
        program,
        ir,
        annotations,
    })
}
