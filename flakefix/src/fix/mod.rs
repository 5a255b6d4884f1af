//! Fix engine: fixers, the registry that dispatches to them, and the
//! machinery that turns computed deletions into new file text.
//!
//! Two kinds of fixer exist:
//! - **Line fixers** rewrite the single physical line a diagnostic points at
//!   (`C812`, `E222`, `E225`, `E262`, `E302`, `E502`).
//! - **File fixers** see every diagnostic of their code for a file at once and
//!   return the whole new content (`F401`, unused-import removal).
//!
//! [`fix_source`] runs both for one file and verifies the result.

mod imports;
mod line;
mod orchestrator;
mod registry;
mod span;
mod splice;

pub use imports::{remove_unused_imports, UnusedImportFixer};
pub use line::{apply_line_fixers, CodeLine, LineFixOutcome, LineShift};
pub use orchestrator::{fix_source, FixOutcome};
pub use registry::{FileFixer, FixerRegistry, FixerRegistryBuilder, LineFixer, LINE_FIXERS};
pub use span::{merge_spans, Span};
pub use splice::{LineSplicer, SpliceError};

use crate::cst::CstError;
use thiserror::Error;

/// Why a file could not be fixed. Any of these leaves the file untouched.
#[derive(Debug, Error)]
pub enum FixError {
    /// The analyzer or the syntax tree says the file does not parse.
    #[error("file does not parse: {message}")]
    FatalSyntax {
        /// What went wrong, as reported.
        message: String,
    },
    /// A diagnostic could not be matched to the code it describes.
    #[error("line {line}: cannot resolve {code} ({message:?}): {reason}")]
    UnresolvableReference {
        /// One-based line of the diagnostic.
        line: usize,
        /// Diagnostic code.
        code: String,
        /// Diagnostic message.
        message: String,
        /// Why resolution failed.
        reason: String,
    },
    /// The text at a diagnostic's position is not what the fixer expects.
    #[error("line {line}, column {column}: expected {expected}, found {found}")]
    StalePosition {
        /// One-based line.
        line: usize,
        /// Zero-based character column.
        column: usize,
        /// What the fixer expected there.
        expected: String,
        /// What is actually there.
        found: String,
    },
    /// Computed deletions could not be applied.
    #[error(transparent)]
    Splice(#[from] SpliceError),
    /// The syntax tree could not be built.
    #[error(transparent)]
    Cst(#[from] CstError),
    /// The original parsed but the fixed text does not.
    #[error("fixed output does not parse: {message}")]
    InvalidOutput {
        /// Parser message for the fixed text.
        message: String,
    },
}

impl FixError {
    /// Build an [`FixError::UnresolvableReference`] for a diagnostic.
    pub(crate) fn unresolvable(
        diagnostic: &crate::diagnostics::Diagnostic,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnresolvableReference {
            line: diagnostic.line(),
            code: diagnostic.code.clone(),
            message: diagnostic.message.clone(),
            reason: reason.into(),
        }
    }
}
