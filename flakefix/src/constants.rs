use regex::Regex;
use std::sync::OnceLock;

/// Project-local configuration file name.
pub const CONFIG_FILENAME: &str = ".flakefix.toml";

/// Python project file that may carry a `[tool.flakefix]` table.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Default analyzer executable.
pub const DEFAULT_ANALYZER: &str = "flake8";

/// Report format requested from flake8.
///
/// Every diagnostic is emitted as `path:line:col:code:message`.
pub const FLAKE8_FORMAT: &str = "%(path)s:%(row)d:%(col)d:%(code)s:%(text)s";

/// Diagnostic codes meaning "this file could not be tokenized or parsed".
///
/// They are never dispatched to a fixer.
pub const FATAL_CODES: &[&str] = &["E902", "E999"];

/// Code of the unused-import diagnostic.
pub const UNUSED_IMPORT_CODE: &str = "F401";

/// Regex extracting the dotted import path and optional alias from an
/// unused-import message, e.g. `'os.path as osp' imported but unused`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_import_message_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"^'([\w.*]+)(?:\s+as\s+([\w.]+))?'")
            .expect("Invalid import message regex pattern")
    })
}

/// Regex matching a diagnostic code such as `F401` or `E225`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^[A-Z]+\d+$").expect("Invalid diagnostic code regex pattern"))
}

// Uppercase aliases, matching how the rest of the crate refers to them
pub use get_code_re as CODE_RE;
pub use get_import_message_re as IMPORT_MESSAGE_RE;
