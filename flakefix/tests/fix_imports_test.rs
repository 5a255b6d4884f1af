//! Unused-import removal across import shapes.
//!
//! Every case reports a single `F401` at line 1, column 1, the way flake8
//! does for a statement opening the file.
#![allow(clippy::unwrap_used)]

use flakefix::diagnostics::Diagnostic;
use flakefix::fix::{remove_unused_imports, FixError};

fn unused(name: &str) -> Diagnostic {
    Diagnostic::from_report(1, 1, "F401", format!("'{name}' imported but unused"))
}

fn assert_fixes(content: &str, names: &[&str], expected: &str) {
    let diagnostics: Vec<Diagnostic> = names.iter().map(|n| unused(n)).collect();
    let fixed = remove_unused_imports(&diagnostics, content).unwrap();
    assert_eq!(fixed, expected, "input:\n{content}");
}

// =============================================================================
// Absolute imports
// =============================================================================

#[test]
fn test_absolute_single_import() {
    assert_fixes("import os\n", &["os"], "");
}

#[test]
fn test_absolute_first_import_in_multi() {
    assert_fixes(
        "import os, sys\nsys.stdout.write('')\n",
        &["os"],
        "import sys\nsys.stdout.write('')\n",
    );
}

#[test]
fn test_absolute_middle_import_in_multi() {
    assert_fixes(
        "import io, os, sys\nio.StringIO()\nsys.stdout.write('')\n",
        &["os"],
        "import io, sys\nio.StringIO()\nsys.stdout.write('')\n",
    );
}

#[test]
fn test_absolute_middle_as_name_import_in_multi() {
    assert_fixes(
        "import io, os as _os, sys\nio.StringIO()\nsys.stdout.write('')\n",
        &["os as _os"],
        "import io, sys\nio.StringIO()\nsys.stdout.write('')\n",
    );
}

#[test]
fn test_absolute_last_import_in_multi() {
    assert_fixes(
        "import sys, os\nsys.stdout.write('')\n",
        &["os"],
        "import sys\nsys.stdout.write('')\n",
    );
}

#[test]
fn test_absolute_single_from_import() {
    assert_fixes("from os import path\n", &["os.path"], "");
}

#[test]
fn test_absolute_first_name_in_from_import() {
    assert_fixes(
        "from os.path import basename, dirname\ndirname(__file__)\n",
        &["os.path.basename"],
        "from os.path import dirname\ndirname(__file__)\n",
    );
}

#[test]
fn test_absolute_middle_name_in_from_import() {
    assert_fixes(
        "from os.path import abspath, basename, dirname\nabspath(dirname(__file__))\n",
        &["os.path.basename"],
        "from os.path import abspath, dirname\nabspath(dirname(__file__))\n",
    );
}

#[test]
fn test_absolute_last_name_in_from_import() {
    assert_fixes(
        "from os.path import dirname, basename\ndirname(__file__)\n",
        &["os.path.basename"],
        "from os.path import dirname\ndirname(__file__)\n",
    );
}

#[test]
fn test_absolute_first_name_in_wrapped_from_import() {
    assert_fixes(
        "from os.path import (\n    basename,\n    dirname,\n)\ndirname(__file__)\n",
        &["os.path.basename"],
        "from os.path import (\n    dirname,\n)\ndirname(__file__)\n",
    );
}

#[test]
fn test_absolute_middle_name_in_wrapped_from_import() {
    assert_fixes(
        "from os.path import (\n    abspath,\n    basename,\n    dirname,\n)\nabspath(dirname(__file__))\n",
        &["os.path.basename"],
        "from os.path import (\n    abspath,\n    dirname,\n)\nabspath(dirname(__file__))\n",
    );
}

#[test]
fn test_absolute_last_name_in_wrapped_from_import() {
    assert_fixes(
        "from os.path import (\n    dirname,\n    basename,\n)\ndirname(__file__)\n",
        &["os.path.basename"],
        "from os.path import (\n    dirname,\n)\ndirname(__file__)\n",
    );
}

// =============================================================================
// Relative imports
// =============================================================================

#[test]
fn test_relative_module_single_import() {
    assert_fixes("from . import os\n", &[".os"], "");
}

#[test]
fn test_relative_module_first_import_in_multi() {
    assert_fixes(
        "from . import os, sys\nsys.stdout.write('')\n",
        &[".os"],
        "from . import sys\nsys.stdout.write('')\n",
    );
}

#[test]
fn test_relative_module_middle_import_in_multi() {
    assert_fixes(
        "from . import io, os, sys\nio.StringIO()\nsys.stdout.write('')\n",
        &[".os"],
        "from . import io, sys\nio.StringIO()\nsys.stdout.write('')\n",
    );
}

#[test]
fn test_relative_module_last_import_in_multi() {
    assert_fixes(
        "from . import sys, os\nsys.stdout.write('')\n",
        &[".os"],
        "from . import sys\nsys.stdout.write('')\n",
    );
}

#[test]
fn test_relative_single_from_import() {
    assert_fixes("from .os import path\n", &[".os.path"], "");
}

#[test]
fn test_relative_first_name_in_from_import() {
    assert_fixes(
        "from .os.path import basename, dirname\ndirname(__file__)\n",
        &[".os.path.basename"],
        "from .os.path import dirname\ndirname(__file__)\n",
    );
}

#[test]
fn test_relative_middle_name_in_from_import() {
    assert_fixes(
        "from .os.path import abspath, basename, dirname\nabspath(dirname(__file__))\n",
        &[".os.path.basename"],
        "from .os.path import abspath, dirname\nabspath(dirname(__file__))\n",
    );
}

#[test]
fn test_relative_last_name_in_from_import() {
    assert_fixes(
        "from .os.path import dirname, basename\ndirname(__file__)\n",
        &[".os.path.basename"],
        "from .os.path import dirname\ndirname(__file__)\n",
    );
}

#[test]
fn test_relative_first_name_in_wrapped_from_import() {
    assert_fixes(
        "from .os.path import (\n    basename,\n    dirname,\n)\ndirname(__file__)\n",
        &[".os.path.basename"],
        "from .os.path import (\n    dirname,\n)\ndirname(__file__)\n",
    );
}

#[test]
fn test_relative_middle_name_in_wrapped_from_import() {
    assert_fixes(
        "from .os.path import (\n    abspath,\n    basename,\n    dirname,\n)\nabspath(dirname(__file__))\n",
        &[".os.path.basename"],
        "from .os.path import (\n    abspath,\n    dirname,\n)\nabspath(dirname(__file__))\n",
    );
}

#[test]
fn test_relative_middle_as_name_in_wrapped_from_import() {
    assert_fixes(
        "from .os.path import (\n    abspath,\n    basename\n    as\n    bn,\n    dirname,\n)\nabspath(dirname(__file__))\n",
        &[".os.path.basename as bn"],
        "from .os.path import (\n    abspath,\n    dirname,\n)\nabspath(dirname(__file__))\n",
    );
}

#[test]
fn test_relative_last_name_in_wrapped_from_import() {
    assert_fixes(
        "from .os.path import (\n    dirname,\n    basename,\n)\ndirname(__file__)\n",
        &[".os.path.basename"],
        "from .os.path import (\n    dirname,\n)\ndirname(__file__)\n",
    );
}

// =============================================================================
// Renamed duplicates, several names, several statements
// =============================================================================

#[test]
fn test_unaliased_duplicate_is_removed() {
    assert_fixes(
        "from foo import bar as spam, bar\nspam()\n",
        &["foo.bar"],
        "from foo import bar as spam\nspam()\n",
    );
}

#[test]
fn test_aliased_duplicate_is_removed() {
    assert_fixes(
        "from foo import bar as spam, bar\nbar()\n",
        &["foo.bar as spam"],
        "from foo import bar\nbar()\n",
    );
}

#[test]
fn test_every_name_removes_statement_without_blank_line() {
    assert_fixes(
        "from os.path import basename, dirname\nx = 1\n",
        &["os.path.basename", "os.path.dirname"],
        "x = 1\n",
    );
}

#[test]
fn test_non_adjacent_names() {
    assert_fixes(
        "import a, b, c, d\nb, d\n",
        &["a", "c"],
        "import b, d\nb, d\n",
    );
}

#[test]
fn test_statements_fixed_independently_in_any_order() {
    let content = "import a, b, c\nfrom m import (\n    d,\n    e,\n)\nimport f, g\nimport h\nb, d, f\n";
    let expected = "import b\nfrom m import (\n    d,\n)\nimport f\nb, d, f\n";
    let mut diagnostics = vec![
        Diagnostic::from_report(1, 1, "F401", "'a' imported but unused"),
        Diagnostic::from_report(1, 1, "F401", "'c' imported but unused"),
        Diagnostic::from_report(2, 1, "F401", "'m.e' imported but unused"),
        Diagnostic::from_report(6, 1, "F401", "'g' imported but unused"),
        Diagnostic::from_report(7, 1, "F401", "'h' imported but unused"),
    ];

    let forward = remove_unused_imports(&diagnostics, content).unwrap();
    diagnostics.reverse();
    let backward = remove_unused_imports(&diagnostics, content).unwrap();

    assert_eq!(forward, expected);
    assert_eq!(backward, expected);
}

#[test]
fn test_single_blank_line_after_removed_first_statement_is_kept() {
    assert_fixes("import os\n\nx = 1\n", &["os"], "\nx = 1\n");
}

#[test]
fn test_only_one_doubled_blank_line_is_dropped() {
    assert_fixes("import os\n\n\n\nx = 1\n", &["os"], "\n\nx = 1\n");
}

#[test]
fn test_backslash_continued_import_last_name() {
    assert_fixes("import a, \\\n    b\na\n", &["b"], "import a\na\n");
}

#[test]
fn test_backslash_continued_import_first_name() {
    assert_fixes(
        "import a, \\\n    b\nb\n",
        &["a"],
        "import \\\n    b\nb\n",
    );
}

#[test]
fn test_backslash_continued_import_whole_statement() {
    assert_fixes("import a, \\\n    b\nx = 1\n", &["a", "b"], "x = 1\n");
}

#[test]
fn test_duplicate_diagnostics_count_once() {
    assert_fixes(
        "import os, sys\nsys.exit()\n",
        &["os", "os"],
        "import sys\nsys.exit()\n",
    );
}

#[test]
fn test_statement_after_code_keeps_surroundings() {
    let diagnostic = Diagnostic::from_report(3, 1, "F401", "'os' imported but unused");
    let fixed = remove_unused_imports(&[diagnostic], "x = 1\n\nimport os\n\ny = 2\n").unwrap();
    assert_eq!(fixed, "x = 1\n\n\ny = 2\n");
}

// =============================================================================
// Unresolvable diagnostics
// =============================================================================

#[test]
fn test_name_not_imported() {
    let err = remove_unused_imports(&[unused("json")], "import os\n").unwrap_err();
    assert!(matches!(err, FixError::UnresolvableReference { line: 1, .. }));
}

#[test]
fn test_no_import_on_line() {
    let err = remove_unused_imports(&[unused("os")], "x = 1\n").unwrap_err();
    assert!(matches!(err, FixError::UnresolvableReference { .. }));
}

#[test]
fn test_unresolvable_leaves_whole_file_untouched() {
    let diagnostics = [
        unused("os"),
        Diagnostic::from_report(2, 1, "F401", "'json' imported but unused"),
    ];
    let result = remove_unused_imports(&diagnostics, "import os, sys\nimport re\n");
    assert!(result.is_err());
}
