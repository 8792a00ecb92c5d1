use crate::Span;

use super::{ast::{Expr, Stmt}, types::GenericName};

/// `mut? Type []? name = initializer;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub is_mutable: bool,
    pub var_type: GenericName,
    pub is_array: bool,
    pub name: String,
    pub initializer: Expr,
    pub span: Span,
}

/// `target = value;`. Compound assignments are desugared by the parser, so
/// `a += 1;` arrives here as `a = a + 1;`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub target: Expr,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfArm {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub if_arm: IfArm,
    pub else_ifs: Vec<IfArm>,
    /// Empty when there is no `else`.
    pub else_body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WhenBody {
    Block(Vec<Stmt>),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenArm {
    pub condition: Expr,
    pub body: WhenBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenStmt {
    pub subject: Expr,
    pub arms: Vec<WhenArm>,
    pub else_arm: Option<WhenBody>,
    pub span: Span,
}
