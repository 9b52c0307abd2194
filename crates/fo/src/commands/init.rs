//! `fo init` -- initialize a forma directory in the current directory.

use std::env;

use anyhow::{Context, Result};

use forma_config::ensure_forma_dir;

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `fo init` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let forma_dir = ensure_forma_dir(&cwd)
        .with_context(|| format!("failed to create .forma in {}", cwd.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "formaDir": forma_dir.display().to_string(),
        }));
    } else if !ctx.quiet {
        println!();
        println!("forma initialized!");
        println!();
        println!("  Directory: {}", forma_dir.display());
        println!();
        println!("Run `fo field add text \"My first field\"` to get started.");
        println!();
    }

    Ok(())
}
