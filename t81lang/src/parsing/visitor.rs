use super::{
    expr::{BinaryExpr, Expr, Literal},
    func::Function,
    prog::Program,
    stmts::{Let, Return, Stmt},
};

pub trait AstVisitor {
    type Output;
    fn program(&mut self, program: &Program) -> Self::Output;
    fn function(&mut self, function: &Function) -> Self::Output;
    fn let_stmt(&mut self, stmt: &Let) -> Self::Output;
    fn return_stmt(&mut self, stmt: &Return) -> Self::Output;
    fn binary_expr(&mut self, expr: &BinaryExpr) -> Self::Output;
    fn literal(&mut self, literal: &Literal) -> Self::Output;
    fn unknown_expr(&mut self) -> Self::Output;

    #[inline]
    fn stmt(&mut self, stmt: &Stmt) -> Self::Output {
        match stmt {
            Stmt::Let(stmt) => self.let_stmt(stmt),
            Stmt::Return(stmt) => self.return_stmt(stmt),
        }
    }

    #[inline]
    fn expr(&mut self, expr: &Expr) -> Self::Output {
        match expr {
            Expr::Binary(expr) => self.binary_expr(expr),
            Expr::Literal(literal) => self.literal(literal),
            Expr::Unknown => self.unknown_expr(),
        }
    }
}
