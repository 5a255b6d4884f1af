use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.flakefix.toml, or [tool.flakefix] in pyproject.toml):
  Looked up from the current directory upwards.

  [flakefix]
  analyzer = \"flake8\"                  # Program producing the report
  analyzer_args = [\"--isolated\"]       # Always passed to the analyzer
  select = [\"E2\", \"F401\"]              # Only fix these code prefixes
  ignore = [\"E302\"]                    # Never fix these code prefixes
  verbose = false                      # List fixed/remaining diagnostics

EXIT STATUS:
  0  every file was processed
  1  at least one file could not be fixed
  2  the analyzer could not be run or the report could not be read
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct OutputOptions {
    /// Output a JSON summary.
    #[arg(long)]
    pub json: bool,

    /// List fixed and remaining diagnostics for every file.
    #[arg(short, long)]
    pub verbose: bool,

    /// Compute fixes and report them without writing any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Options choosing which fixers run.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterOptions {
    /// Only fix diagnostics whose code starts with one of these prefixes.
    #[arg(long, value_delimiter = ',', value_name = "CODE")]
    pub select: Vec<String>,

    /// Never fix diagnostics whose code starts with one of these prefixes.
    #[arg(long, value_delimiter = ',', value_name = "CODE")]
    pub ignore: Vec<String>,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    name = "flakefix",
    author,
    version,
    about = "flakefix - Automatically fix flake8 diagnostics: spacing, punctuation and unused imports",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Read a saved `path:line:col:code:message` report instead of running
    /// the analyzer (`-` reads stdin).
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Analyzer command to run (overrides config, default `flake8`).
    #[arg(long, value_name = "PROGRAM", conflicts_with = "report")]
    pub analyzer: Option<String>,

    /// Fixer selection.
    #[command(flatten)]
    pub filters: FilterOptions,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Arguments forwarded to the analyzer (paths, flake8 options).
    ///
    /// Everything from the first positional argument on is forwarded as is.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FLAKE8_ARGS")]
    pub analyzer_args: Vec<String>,
}
