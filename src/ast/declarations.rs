use crate::Span;

use super::{
    ast::{Expr, Stmt},
    types::{GenericDeclaration, GenericName},
};

/// `import a.b.c;` or `import a.b.*;`. A trailing `"*"` marks a wildcard.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub names: Vec<String>,
    pub span: Span,
}

/// One entry of an `export { ... }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDecl {
    pub names: Vec<String>,
    pub span: Span,
}

impl ImportDecl {
    pub fn is_wildcard(&self) -> bool {
        self.names.last().is_some_and(|name| name == "*")
    }
}

impl ExportDecl {
    pub fn is_wildcard(&self) -> bool {
        self.names.last().is_some_and(|name| name == "*")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub is_closed: bool,
    pub name: String,
    pub generics: Vec<GenericDeclaration>,
    pub extends: Vec<GenericName>,
    pub fields: Vec<StructField>,
    pub inner_structs: Vec<StructDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub is_mutable: bool,
    pub field_type: GenericName,
    pub is_array: bool,
    pub name: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    pub param_type: GenericName,
    pub is_array: bool,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnType {
    pub name: GenericName,
    pub is_array: bool,
}

/// `mut? fn <generics>? Name(.Name)* (params) : Type { body }`.
/// A multi-part name such as `Point.length` declares a method.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub is_mutable: bool,
    pub generics: Vec<GenericDeclaration>,
    pub name: GenericName,
    pub parameters: Vec<FunctionParameter>,
    pub return_type: ReturnType,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl FnDecl {
    pub fn is_method(&self) -> bool {
        self.name.parts.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceMethod {
    pub is_mutable: bool,
    pub name: String,
    pub parameters: Vec<FunctionParameter>,
    pub return_type: ReturnType,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub generics: Vec<GenericDeclaration>,
    pub methods: Vec<InterfaceMethod>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasDecl {
    pub name: String,
    pub aliased: GenericName,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<String>,
    pub span: Span,
}
