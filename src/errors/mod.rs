//! Error types and error handling for the front end.
//!
//! Every stage (lexing, parsing, symbol resolution, scope checking) reports
//! failures through the single positioned [`errors::Error`] type. There is no
//! recovery: the first error aborts the compilation unit.

pub mod errors;
