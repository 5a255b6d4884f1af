//! CST (Concrete Syntax Tree) module for position-addressable Python parsing.
//!
//! Tree-sitter produces a lossless, error-tolerant parse; it is flattened
//! into an arena ([`SyntaxTree`]) whose nodes are addressed by [`NodeId`] and
//! classified into the closed [`NodeKind`] set.
//!
//! # Design Principles
//!
//! - **Parsed per use**: a tree is built for one fixer invocation and dropped
//! - **Positions, not mutation**: edits are computed from node positions;
//!   the tree itself is never modified

mod node;
mod parser;
mod tree;

pub use node::{NodeId, NodeKind, SyntaxNode};
pub use parser::{CstError, CstParser};
pub use tree::SyntaxTree;
