//! TISC code generation.
mod codegen;
mod ir;

pub use codegen::CodeGen;
pub use ir::{assemble, IR};
