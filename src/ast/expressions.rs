use std::fmt::Display;

use crate::Span;

use super::ast::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct StructLiteralField {
    pub name: String,
    pub value: Expr,
}

/// `mut? { .name = value, .shorthand }`
#[derive(Debug, Clone, PartialEq)]
pub struct StructLiteralExpr {
    pub is_mutable: bool,
    pub fields: Vec<StructLiteralField>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteralExpr {
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Multiply,
    Divide,
    Add,
    Subtract,
    // Relational
    Greater,
    GreaterEq,
    Smaller,
    SmallerEq,
    Equal,
    NotEqual,
    // Logical
    And,
    Or,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::Smaller => "<",
            BinaryOp::SmallerEq => "<=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        write!(f, "{}", op)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub op: BinaryOp,
    pub span: Span,
}

/// `!value`
#[derive(Debug, Clone, PartialEq)]
pub struct NegateExpr {
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostfixOperation {
    Call(Vec<Expr>),
    Index(Box<Expr>),
    Member(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpr {
    pub left: Box<Expr>,
    pub operation: PostfixOperation,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolExpr {
    pub value: bool,
    pub span: Span,
}

/// Raw text between the quotes; escapes are not processed.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntExpr {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoubleExpr {
    pub value: f64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}
