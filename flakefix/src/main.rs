//! Main binary entry point for `flakefix`.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function
//! so that the `flakefix-cli` wrapper and this target behave identically.

use anyhow::Result;

fn main() -> Result<()> {
    let code = flakefix::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
