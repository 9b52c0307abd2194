//! `fo submit` -- validate entered values and accept the submission.

use anyhow::{bail, Result};
use owo_colors::OwoColorize;

use forma_engine::{check_submission, evaluate, seed_defaults};

use crate::cli::FillArgs;
use crate::commands::preview::{apply_set_pairs, render_value_lines};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `fo submit` command.
///
/// Exits with an error (status 1) when any field fails validation.
pub fn run(ctx: &RuntimeContext, args: &FillArgs) -> Result<()> {
    let (store, _config) = ctx.open_store()?;

    if store.fields().is_empty() {
        bail!("the working form has no fields; nothing to submit");
    }

    let mut values = seed_defaults(store.fields());
    apply_set_pairs(store.fields(), &mut values, &args.set)?;

    // Derived values are recomputed before the final validation pass.
    let today = chrono::Local::now().date_naive();
    let evaluated = evaluate(store.fields(), &values, today);

    match check_submission(store.fields(), &evaluated.values) {
        Ok(submitted) => {
            if ctx.json {
                output_json(&serde_json::json!({
                    "submitted": true,
                    "values": submitted,
                }));
            } else if !ctx.quiet {
                println!("Form submitted successfully!");
                println!("{}", render_value_lines(store.fields(), &submitted));
            }
            Ok(())
        }
        Err(errors) => {
            if ctx.json {
                output_json(&serde_json::json!({
                    "submitted": false,
                    "errors": errors,
                }));
            } else {
                for field in store.fields() {
                    if let Some(message) = errors.get(&field.id) {
                        eprintln!("  {}: {}", field.label, message.red());
                    }
                }
            }
            bail!("submission rejected: {} field(s) failed validation", errors.len());
        }
    }
}
