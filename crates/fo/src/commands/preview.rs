//! `fo preview` -- evaluate the working form and render it.

use anyhow::{bail, Result};

use forma_core::field::FormField;
use forma_core::value::ValueMap;
use forma_engine::{evaluate, seed_defaults};

use crate::cli::FillArgs;
use crate::commands::field::parse_value;
use crate::context::RuntimeContext;
use crate::output::{output_json, render_preview, render_value};

/// Execute the `fo preview` command.
pub fn run(ctx: &RuntimeContext, args: &FillArgs) -> Result<()> {
    let (store, _config) = ctx.open_store()?;

    if store.fields().is_empty() {
        bail!("the working form has no fields; add some with `fo field add`");
    }

    let mut values = seed_defaults(store.fields());
    apply_set_pairs(store.fields(), &mut values, &args.set)?;

    let today = chrono::Local::now().date_naive();
    let result = evaluate(store.fields(), &values, today);

    if ctx.json {
        output_json(&serde_json::json!({
            "values": result.values,
            "errors": result.errors,
        }));
        return Ok(());
    }

    if !store.name().is_empty() {
        println!("{}", store.name());
    }
    println!("{}", render_preview(store.fields(), &result.values, &result.errors));
    if !result.errors.is_empty() && !ctx.quiet {
        println!();
        println!("{} field(s) have validation errors", result.errors.len());
    }
    Ok(())
}

/// Applies `--set id=value` pairs on top of the value map.
///
/// Values for multi-value fields are split on commas. Unknown ids and
/// attempts to set a derived field are rejected.
pub fn apply_set_pairs(
    fields: &[FormField],
    values: &mut ValueMap,
    pairs: &[String],
) -> Result<()> {
    for pair in pairs {
        let Some((id, raw)) = pair.split_once('=') else {
            bail!("invalid --set value '{}': expected id=value", pair);
        };
        let Some(field) = fields.iter().find(|f| f.id == id) else {
            bail!("unknown field id in --set: {}", id);
        };
        if field.is_derived {
            bail!("field {} is derived; its value is computed, not entered", id);
        }
        values.insert(id.to_string(), parse_value(field.field_type.is_multi_value(), raw));
    }
    Ok(())
}

/// Renders a value map as `label: value` lines in field order.
pub fn render_value_lines(fields: &[FormField], values: &ValueMap) -> String {
    fields
        .iter()
        .filter_map(|field| {
            values
                .get(&field.id)
                .map(|v| format!("  {}: {}", field.label, render_value(v)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
