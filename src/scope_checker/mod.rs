//! Name and scope checking for function bodies.
//!
//! Runs after symbol resolution over a read-only symbol tree. Each block of a
//! function body gets its own frame on an explicit scope stack.

pub mod scope_checker;
