/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The file root and the closed `Decl`/`Stmt`/`Expr` enums
/// - declarations: Top-level declarations (structs, functions, interfaces, aliases, enums)
/// - statements: Statements found inside function bodies
/// - expressions: Expression nodes and binary operators
/// - types: Generic names and generic parameter declarations
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;
