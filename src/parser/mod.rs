//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a [`TexelFile`](crate::ast::ast::TexelFile). It uses a Pratt parser
//! for expressions with operator precedence and handles:
//!
//! - Top-level imports, the export block and declarations
//! - Statement parsing (variable declarations, assignments, control flow)
//! - Expression parsing (binary ops, prefix and postfix chains, literals)
//! - Generic names, with a lookahead deciding whether `<` opens a generic
//!   argument list or is a comparison
//!
//! The first grammar violation aborts the parse.

pub mod decl;
pub mod expr;
pub mod generics;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
