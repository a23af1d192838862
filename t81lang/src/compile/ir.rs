use smol_str::SmolStr;
use std::fmt;

/// Intermediate representation, one TISC line per instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum IR {
    /// `FUNC name RETURNS type`
    /// Start of a function block.
    Func { name: SmolStr, returns: SmolStr },
    /// `ENDFUNC`
    EndFunc,
    /// `LOAD x`
    /// Load an operand into the accumulator.
    Load(SmolStr),
    /// `+ x`
    /// Apply an operator to the accumulator and an operand. The mnemonic
    /// is the source operator, uppercased.
    Op { mnemonic: SmolStr, operand: SmolStr },
    /// `STORE x`
    /// Store the accumulator into a binding.
    Store(SmolStr),
    /// `RETURN`
    Return,
    /// `; @entropy(0.42)`
    /// Annotation comment, carries no semantics.
    Entropy(f64),
    /// `; @tag("seed")`
    Tag(SmolStr),
    /// `NOP`
    /// Stands in for an expression that could not be classified.
    Nop,
}

/// Outputs instruction as assembly.
impl fmt::Display for IR {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IR::Func { name, returns }     => write!(f, "FUNC {} RETURNS {}", name, returns),
            IR::EndFunc                    => write!(f, "ENDFUNC"),
            IR::Load(operand)              => write!(f, "LOAD {}", operand),
            IR::Op { mnemonic, operand }   => write!(f, "{} {}", mnemonic, operand),
            IR::Store(name)                => write!(f, "STORE {}", name),
            IR::Return                     => write!(f, "RETURN"),
            IR::Entropy(value)             => write!(f, "; @entropy({:?})", value),
            IR::Tag(tag)                   => write!(f, "; @tag(\"{}\")", tag),
            IR::Nop                        => write!(f, "NOP"),
        }
    }
}

/// Render instructions as TISC text.
///
/// One instruction per line, with a blank line between function blocks
/// and no trailing newline.
pub fn assemble(code: &[IR], out: &mut impl fmt::Write) -> fmt::Result {
    for (index, ir) in code.iter().enumerate() {
        if index > 0 {
            out.write_char('\n')?;
            if matches!(ir, IR::Func { .. }) {
                out.write_char('\n')?;
            }
        }
        write!(out, "{}", ir)?;
    }
    Ok(())
}
