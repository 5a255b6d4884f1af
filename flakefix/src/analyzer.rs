//! Running the analyzer and obtaining its report.

use crate::constants::{DEFAULT_ANALYZER, FLAKE8_FORMAT};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// The analyzer could not produce a report.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The program could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The program ran but exited with a status other than 0 or 1.
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        /// Program that was invoked.
        program: String,
        /// Exit status description.
        status: String,
        /// What it printed on stderr.
        stderr: String,
    },
    /// A saved report could not be read.
    #[error("failed to read report {}: {source}", path.display())]
    ReadReport {
        /// Report path (`-` for stdin).
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A flake8-compatible analyzer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flake8 {
    /// Executable to run.
    pub program: String,
    /// Arguments placed before the caller's arguments.
    pub extra_args: Vec<String>,
}

impl Default for Flake8 {
    fn default() -> Self {
        Self {
            program: DEFAULT_ANALYZER.to_owned(),
            extra_args: Vec::new(),
        }
    }
}

impl Flake8 {
    /// Build an invocation from a command string such as `python3 -m flake8`.
    ///
    /// Words after the first become leading arguments.
    #[must_use]
    pub fn from_command(command: &str, extra_args: Vec<String>) -> Self {
        let mut words = command.split_whitespace().map(str::to_owned);
        let program = words.next().unwrap_or_else(|| DEFAULT_ANALYZER.to_owned());
        let mut args: Vec<String> = words.collect();
        args.extend(extra_args);
        Self {
            program,
            extra_args: args,
        }
    }

    /// The full argument list passed to the program.
    #[must_use]
    pub fn command_args(&self, args: &[String]) -> Vec<String> {
        let mut all = self.extra_args.clone();
        all.extend(args.iter().cloned());
        all.push("--format".to_owned());
        all.push(FLAKE8_FORMAT.to_owned());
        all
    }

    /// Run the analyzer and return its captured report.
    ///
    /// Exit status 1 only means violations were found.
    ///
    /// # Errors
    /// Returns [`AnalyzerError`] if the program cannot be started or fails
    pub fn run(&self, args: &[String]) -> Result<String, AnalyzerError> {
        let output = Command::new(&self.program)
            .args(self.command_args(args))
            .output()
            .map_err(|source| AnalyzerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        match output.status.code() {
            Some(0 | 1) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            _ => Err(AnalyzerError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            }),
        }
    }
}

/// Read a saved report from `path`, or from stdin when `path` is `-`.
///
/// # Errors
/// Returns [`AnalyzerError::ReadReport`] on I/O failure
pub fn read_report(path: &Path) -> Result<String, AnalyzerError> {
    let to_error = |source| AnalyzerError::ReadReport {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut report = String::new();
        std::io::stdin()
            .read_to_string(&mut report)
            .map_err(to_error)?;
        Ok(report)
    } else {
        std::fs::read_to_string(path).map_err(to_error)
    }
}
