use super::ir::{assemble, IR};
use crate::parsing::{AstVisitor, BinaryExpr, Function, Let, Literal, Program, Return};
use log::trace;
use std::fmt;

/// Code generator.
pub struct CodeGen {
    /// Resulting generated code.
    code: Vec<IR>,
}

impl CodeGen {
    #[inline]
    pub fn new() -> Self {
        Self { code: vec![] }
    }

    /// Walk the program and render it as TISC text.
    pub fn compile(&mut self, program: &Program) -> Result<String, fmt::Error> {
        self.program(program);

        let mut text = String::new();
        assemble(&self.code, &mut text)?;
        Ok(text)
    }

    /// Clear the internal state so the code generator can be reused.
    pub fn reset(&mut self) {
        self.code.clear();
    }

    /// Instructions emitted so far.
    #[inline]
    pub fn code(&self) -> &[IR] {
        &self.code
    }

    #[inline]
    fn emit(&mut self, ir: IR) {
        self.code.push(ir)
    }
}

impl Default for CodeGen {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursive visitor
impl AstVisitor for CodeGen {
    type Output = ();

    fn program(&mut self, program: &Program) {
        for function in &program.functions {
            self.function(function);
        }
    }

    fn function(&mut self, function: &Function) {
        trace!("emitting function '{}'", function.name);
        self.emit(IR::Func {
            name: function.name.clone(),
            returns: function.returns.clone(),
        });
        for stmt in &function.body {
            self.stmt(stmt);
        }
        self.emit(IR::EndFunc);
    }

    fn let_stmt(&mut self, stmt: &Let) {
        if let Some(entropy) = stmt.entropy {
            self.emit(IR::Entropy(entropy));
        }
        if let Some(tag) = &stmt.tag {
            self.emit(IR::Tag(tag.clone()));
        }
        self.expr(&stmt.expr);
        self.emit(IR::Store(stmt.name.clone()));
    }

    fn return_stmt(&mut self, stmt: &Return) {
        self.expr(&stmt.expr);
        self.emit(IR::Return);
    }

    fn binary_expr(&mut self, expr: &BinaryExpr) {
        self.emit(IR::Load(expr.left.clone()));
        self.emit(IR::Op {
            mnemonic: expr.op.to_uppercase().into(),
            operand: expr.right.clone(),
        });
    }

    fn literal(&mut self, literal: &Literal) {
        self.emit(IR::Load(literal.value.clone()));
    }

    fn unknown_expr(&mut self) {
        self.emit(IR::Nop);
    }
}
