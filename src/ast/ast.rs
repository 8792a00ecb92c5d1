use std::rc::Rc;

use crate::Span;

use super::{
    declarations::{
        AliasDecl, EnumDecl, ExportDecl, FnDecl, ImportDecl, InterfaceDecl, StructDecl,
    },
    expressions::{
        ArrayLiteralExpr, BinaryExpr, BoolExpr, CharExpr, DoubleExpr, IntExpr, NegateExpr,
        PostfixExpr, StringExpr, StructLiteralExpr, SymbolExpr,
    },
    statements::{
        AssignmentStmt, BreakStmt, ContinueStmt, ExpressionStmt, IfStmt, LoopStmt, ReturnStmt,
        VarDeclStmt, WhenStmt,
    },
    types::GenericName,
};

/// Root of a parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TexelFile {
    pub file: Rc<String>,
    pub imports: Vec<ImportDecl>,
    pub declarations: Vec<Decl>,
    pub exports: Vec<ExportDecl>,
}

/// Declaration Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum DeclType {
    Struct,
    Function,
    Interface,
    Alias,
    Enum,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Struct(StructDecl),
    Function(FnDecl),
    Interface(InterfaceDecl),
    Alias(AliasDecl),
    Enum(EnumDecl),
}

impl Decl {
    pub fn get_decl_type(&self) -> DeclType {
        match self {
            Decl::Struct(_) => DeclType::Struct,
            Decl::Function(_) => DeclType::Function,
            Decl::Interface(_) => DeclType::Interface,
            Decl::Alias(_) => DeclType::Alias,
            Decl::Enum(_) => DeclType::Enum,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Decl::Struct(decl) => &decl.span,
            Decl::Function(decl) => &decl.span,
            Decl::Interface(decl) => &decl.span,
            Decl::Alias(decl) => &decl.span,
            Decl::Enum(decl) => &decl.span,
        }
    }
}

/// Statement Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum StmtType {
    VarDecl,
    Assignment,
    Expression,
    Break,
    Continue,
    Loop,
    If,
    Return,
    When,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    Expression(ExpressionStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Loop(LoopStmt),
    If(IfStmt),
    Return(ReturnStmt),
    When(WhenStmt),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::VarDecl(_) => StmtType::VarDecl,
            Stmt::Assignment(_) => StmtType::Assignment,
            Stmt::Expression(_) => StmtType::Expression,
            Stmt::Break(_) => StmtType::Break,
            Stmt::Continue(_) => StmtType::Continue,
            Stmt::Loop(_) => StmtType::Loop,
            Stmt::If(_) => StmtType::If,
            Stmt::Return(_) => StmtType::Return,
            Stmt::When(_) => StmtType::When,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Continue(stmt) => &stmt.span,
            Stmt::Loop(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::When(stmt) => &stmt.span,
        }
    }
}

/// Expression Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ExprType {
    StructLiteral,
    ArrayLiteral,
    Binary,
    Negate,
    Postfix,
    Bool,
    String,
    Char,
    Int,
    Double,
    Symbol,
    GenericName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    StructLiteral(StructLiteralExpr),
    ArrayLiteral(ArrayLiteralExpr),
    Binary(BinaryExpr),
    Negate(NegateExpr),
    Postfix(PostfixExpr),
    Bool(BoolExpr),
    String(StringExpr),
    Char(CharExpr),
    Int(IntExpr),
    Double(DoubleExpr),
    /// A single unqualified name.
    Symbol(SymbolExpr),
    /// A dotted or generic-parameterized name.
    GenericName(GenericName),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::StructLiteral(_) => ExprType::StructLiteral,
            Expr::ArrayLiteral(_) => ExprType::ArrayLiteral,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Negate(_) => ExprType::Negate,
            Expr::Postfix(_) => ExprType::Postfix,
            Expr::Bool(_) => ExprType::Bool,
            Expr::String(_) => ExprType::String,
            Expr::Char(_) => ExprType::Char,
            Expr::Int(_) => ExprType::Int,
            Expr::Double(_) => ExprType::Double,
            Expr::Symbol(_) => ExprType::Symbol,
            Expr::GenericName(_) => ExprType::GenericName,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::StructLiteral(expr) => &expr.span,
            Expr::ArrayLiteral(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Negate(expr) => &expr.span,
            Expr::Postfix(expr) => &expr.span,
            Expr::Bool(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Char(expr) => &expr.span,
            Expr::Int(expr) => &expr.span,
            Expr::Double(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::GenericName(expr) => &expr.span,
        }
    }
}
