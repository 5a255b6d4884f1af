use super::imports::UnusedImportFixer;
use super::line::{
    add_trailing_comma, blank_line_before, remove_redundant_backslash, single_space_after_operator,
    space_after_comment_hash, space_around_operator, CodeLine,
};
use super::FixError;
use crate::diagnostics::Diagnostic;
use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
/// A fixer that rewrites the single line a diagnostic points at.
pub struct LineFixer {
    /// Diagnostic code handled.
    pub code: &'static str,
    /// What the fix does.
    pub description: &'static str,
    /// The edit itself.
    #[serde(skip)]
    pub fix: fn(&CodeLine<'_>) -> Result<String, FixError>,
}

/// Every line fixer, keyed by code.
pub const LINE_FIXERS: &[LineFixer] = &[
    LineFixer {
        code: "C812",
        description: "add missing trailing comma",
        fix: add_trailing_comma,
    },
    LineFixer {
        code: "E222",
        description: "collapse multiple spaces after operator",
        fix: single_space_after_operator,
    },
    LineFixer {
        code: "E225",
        description: "add missing whitespace around operator",
        fix: space_around_operator,
    },
    LineFixer {
        code: "E262",
        description: "start inline comment with '# '",
        fix: space_after_comment_hash,
    },
    LineFixer {
        code: "E302",
        description: "add blank line before definition",
        fix: blank_line_before,
    },
    LineFixer {
        code: "E502",
        description: "remove redundant backslash",
        fix: remove_redundant_backslash,
    },
];

/// A fixer that rewrites a whole file from all diagnostics of its code.
pub trait FileFixer: Send + Sync {
    /// Diagnostic code handled.
    fn code(&self) -> &'static str;
    /// What the fix does.
    fn description(&self) -> &'static str;
    /// Return the new file text.
    ///
    /// # Errors
    /// Returns error if any diagnostic cannot be applied; nothing is changed then
    fn fix(&self, diagnostics: &[Diagnostic], content: &str) -> Result<String, FixError>;
}

/// Whole-file fixers in the order they run.
fn default_file_fixers() -> Vec<Box<dyn FileFixer>> {
    vec![Box::new(UnusedImportFixer)]
}

/// Immutable code-to-fixer dispatch, shared by all worker threads.
pub struct FixerRegistry {
    line_fixers: Vec<&'static LineFixer>,
    file_fixers: Vec<Box<dyn FileFixer>>,
}

impl FixerRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> FixerRegistryBuilder {
        FixerRegistryBuilder::default()
    }

    /// The line fixer for `code`, if one is enabled.
    #[must_use]
    pub fn line_fixer(&self, code: &str) -> Option<&'static LineFixer> {
        self.line_fixers.iter().copied().find(|f| f.code == code)
    }

    /// Enabled whole-file fixers in priority order.
    #[must_use]
    pub fn file_fixers(&self) -> &[Box<dyn FileFixer>] {
        &self.file_fixers
    }

    /// Whether any enabled fixer handles `code`.
    #[must_use]
    pub fn handles(&self, code: &str) -> bool {
        self.line_fixer(code).is_some() || self.file_fixers.iter().any(|f| f.code() == code)
    }

    /// Codes of all enabled fixers, line fixers first.
    #[must_use]
    pub fn codes(&self) -> Vec<&'static str> {
        self.descriptions().into_iter().map(|(code, _)| code).collect()
    }

    /// `(code, description)` of all enabled fixers, line fixers first.
    #[must_use]
    pub fn descriptions(&self) -> Vec<(&'static str, &'static str)> {
        self.line_fixers
            .iter()
            .map(|f| (f.code, f.description))
            .chain(self.file_fixers.iter().map(|f| (f.code(), f.description())))
            .collect()
    }
}

impl Default for FixerRegistry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for FixerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixerRegistry")
            .field("codes", &self.codes())
            .finish()
    }
}

/// Filters deciding which fixers a registry enables.
///
/// Codes match by prefix, the way flake8 selects: `E2` covers `E222`.
#[derive(Debug, Clone, Default)]
pub struct FixerRegistryBuilder {
    select: FxHashSet<String>,
    ignore: FxHashSet<String>,
}

impl FixerRegistryBuilder {
    /// Only enable fixers whose code starts with one of `codes`.
    #[must_use]
    pub fn select<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.extend(codes.into_iter().map(Into::into));
        self
    }

    /// Disable fixers whose code starts with one of `codes`.
    #[must_use]
    pub fn ignore<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(codes.into_iter().map(Into::into));
        self
    }

    fn enabled(&self, code: &str) -> bool {
        let selected =
            self.select.is_empty() || self.select.iter().any(|p| code.starts_with(p.as_str()));
        selected && !self.ignore.iter().any(|p| code.starts_with(p.as_str()))
    }

    /// Build the registry.
    #[must_use]
    pub fn build(self) -> FixerRegistry {
        FixerRegistry {
            line_fixers: LINE_FIXERS.iter().filter(|f| self.enabled(f.code)).collect(),
            file_fixers: default_file_fixers()
                .into_iter()
                .filter(|f| self.enabled(f.code()))
                .collect(),
        }
    }
}
