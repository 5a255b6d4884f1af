//! Core library for the flakefix tool.
//!
//! flakefix reads a flake8 report (`path:line:col:code:message`), and for
//! every diagnostic it has a fixer for, rewrites the diagnosed file with a
//! minimal edit: a single-line change for spacing and punctuation codes, or
//! an exact, re-punctuated removal for unused imports.

#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module running the external analyzer and reading saved reports.
pub mod analyzer;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module parsing the analyzer report into per-file diagnostics.
pub mod diagnostics;

/// Module containing the position-addressable Python syntax tree.
pub mod cst;

/// Module containing the fixers, the registry and the per-file pipeline.
pub mod fix;

/// Module defining document positions.
pub mod position;

/// Module containing utility functions.
/// This includes offset/position conversion and path display helpers.
pub mod utils;

/// Module defining the entry point logic shared by both binaries.
pub mod entry_point;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;
