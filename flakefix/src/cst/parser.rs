//! Tree-sitter based CST parser for Python source code.
//!
//! Provides precise byte-range information for import rewriting.

use super::tree::SyntaxTree;
use thiserror::Error;
use tree_sitter::Parser;

/// Error during CST parsing
#[derive(Debug, Error)]
pub enum CstError {
    /// Failed to create parser
    #[error("failed to create CST parser: {0}")]
    ParserCreation(String),
    /// Tree-sitter gave up on the source (cancelled or no language set)
    #[error("failed to parse source as Python")]
    ParseFailed,
}

/// Tree-sitter based CST parser
pub struct CstParser {
    parser: Parser,
}

impl CstParser {
    /// Create a new CST parser for Python
    ///
    /// # Errors
    /// Returns error if parser creation fails
    pub fn new() -> Result<Self, CstError> {
        let mut parser = Parser::new();

        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source code into an arena tree.
    ///
    /// Tree-sitter recovers from syntax errors; callers check
    /// [`SyntaxTree::first_error`] before trusting the result.
    ///
    /// # Errors
    /// Returns error if parsing fails
    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;

        Ok(SyntaxTree::from_tree_sitter(&tree, source))
    }
}
