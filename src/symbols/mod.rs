//! Symbol tree and the resolver that fills it.
//!
//! The tree is a path-addressed namespace shared by every file of a
//! compilation. The resolver claims a node per declaration and maps each
//! generic-name part in type position to the node it names.

pub mod resolver;
pub mod tree;
