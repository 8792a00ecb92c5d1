//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using an ordered table of anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position (offset and line) tracking for error reporting
//! - Comments, emitted as tokens and filtered by the parser

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
