use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, PYPROJECT_FILENAME};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for flakefix.
    pub flakefix: FlakefixConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
/// Configuration options for flakefix.
pub struct FlakefixConfig {
    /// Analyzer executable (defaults to `flake8`).
    pub analyzer: Option<String>,
    /// Arguments always passed to the analyzer, before the command-line ones.
    pub analyzer_args: Option<Vec<String>>,
    /// Only fix codes starting with one of these prefixes.
    pub select: Option<Vec<String>>,
    /// Never fix codes starting with one of these prefixes.
    pub ignore: Option<Vec<String>>,
    /// List fixed and remaining diagnostics per file.
    pub verbose: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
struct PyProject {
    tool: ToolConfig,
}

#[derive(Debug, Deserialize, Clone)]
struct ToolConfig {
    flakefix: FlakefixConfig,
}

impl Config {
    /// Loads configuration from the current directory or the nearest parent
    /// holding `.flakefix.toml` or a `pyproject.toml` with `[tool.flakefix]`.
    #[must_use]
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from_path(&cwd)
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Files that exist but do not parse are skipped, as are `pyproject.toml`
    /// files without a `[tool.flakefix]` table.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let flakefix_toml = current.join(CONFIG_FILENAME);
            if let Some(config) = read_config_file(&flakefix_toml) {
                return config;
            }

            let pyproject_toml = current.join(PYPROJECT_FILENAME);
            if let Some(config) = read_pyproject(&pyproject_toml) {
                return config;
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}

fn read_config_file(path: &Path) -> Option<Config> {
    let content = fs::read_to_string(path).ok()?;
    let mut config = toml::from_str::<Config>(&content).ok()?;
    config.config_file_path = Some(path.to_path_buf());
    Some(config)
}

fn read_pyproject(path: &Path) -> Option<Config> {
    let content = fs::read_to_string(path).ok()?;
    let pyproject = toml::from_str::<PyProject>(&content).ok()?;
    Some(Config {
        flakefix: pyproject.tool.flakefix,
        config_file_path: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path());
        assert_eq!(config.flakefix, FlakefixConfig::default());
    }

    #[test]
    fn test_load_from_path_flakefix_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(".flakefix.toml")).unwrap();
        writeln!(
            file,
            r#"[flakefix]
analyzer = "python3 -m flake8"
select = ["E2", "F401"]
verbose = true
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(config.flakefix.analyzer.as_deref(), Some("python3 -m flake8"));
        assert_eq!(
            config.flakefix.select,
            Some(vec!["E2".to_owned(), "F401".to_owned()])
        );
        assert_eq!(config.flakefix.verbose, Some(true));
        assert_eq!(
            config.config_file_path,
            Some(dir.path().join(".flakefix.toml"))
        );
    }

    #[test]
    fn test_load_from_path_pyproject_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join("pyproject.toml")).unwrap();
        writeln!(
            file,
            r#"[tool.flakefix]
ignore = ["E302"]
analyzer_args = ["--max-line-length", "100"]
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(config.flakefix.ignore, Some(vec!["E302".to_owned()]));
        assert_eq!(
            config.flakefix.analyzer_args,
            Some(vec!["--max-line-length".to_owned(), "100".to_owned()])
        );
    }

    #[test]
    fn test_pyproject_without_section_is_skipped() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("pkg");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("pyproject.toml"), "[project]\nname = \"x\"\n").unwrap();
        std::fs::write(
            dir.path().join(".flakefix.toml"),
            "[flakefix]\nverbose = false\n",
        )
        .unwrap();

        let config = Config::load_from_path(&nested);
        assert_eq!(config.flakefix.verbose, Some(false));
    }

    #[test]
    fn test_load_from_path_traverses_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("lib");
        std::fs::create_dir_all(&nested).unwrap();

        let mut file = std::fs::File::create(dir.path().join(".flakefix.toml")).unwrap();
        writeln!(
            file,
            r#"[flakefix]
ignore = ["C8"]
"#
        )
        .unwrap();

        let config = Config::load_from_path(&nested);
        assert_eq!(config.flakefix.ignore, Some(vec!["C8".to_owned()]));
    }

    #[test]
    fn test_load_from_file_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".flakefix.toml"),
            "[flakefix]\nanalyzer = \"flake8\"\n",
        )
        .unwrap();

        let py_file = dir.path().join("test.py");
        std::fs::write(&py_file, "x = 1").unwrap();

        let config = Config::load_from_path(&py_file);
        assert_eq!(config.flakefix.analyzer.as_deref(), Some("flake8"));
    }
}
