//! `fo version` -- show version information.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `fo version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    if ctx.json {
        output_json(&serde_json::json!({ "version": version }));
    } else {
        println!("fo {}", version);
    }
    Ok(())
}
