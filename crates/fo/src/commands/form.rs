//! `fo form` -- save, load and manage named form definitions.

use anyhow::{bail, Result};

use crate::cli::FormCommands;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// Execute the `fo form` subcommands.
pub fn run(ctx: &RuntimeContext, command: &FormCommands) -> Result<()> {
    match command {
        FormCommands::Save { name } => run_save(ctx, name),
        FormCommands::Load { id } => run_load(ctx, id),
        FormCommands::List => run_list(ctx),
        FormCommands::Delete { id } => run_delete(ctx, id),
        FormCommands::Clear => run_clear(ctx),
    }
}

fn run_save(ctx: &RuntimeContext, name: &str) -> Result<()> {
    let (mut store, _config) = ctx.open_store()?;

    if store.fields().is_empty() {
        bail!("the working form has no fields; nothing to save");
    }
    let Some(schema) = store.save_form(name)? else {
        bail!("a form name is required to save");
    };
    store.set_form_name(name);
    store.save_draft()?;

    if ctx.json {
        output_json(&schema);
    } else if !ctx.quiet {
        println!("Saved '{}' as {} ({} fields)", schema.name, schema.id, schema.fields.len());
    }
    Ok(())
}

fn run_load(ctx: &RuntimeContext, id: &str) -> Result<()> {
    let (mut store, _config) = ctx.open_store()?;

    if !store.load_form(id) {
        bail!("saved form {} not found", id);
    }
    store.save_draft()?;

    if ctx.json {
        output_json(&serde_json::json!({
            "id": id,
            "name": store.name(),
            "fields": store.fields(),
        }));
    } else if !ctx.quiet {
        println!(
            "Loaded '{}' ({} fields) into the working form",
            store.name(),
            store.fields().len()
        );
    }
    Ok(())
}

fn run_list(ctx: &RuntimeContext) -> Result<()> {
    let (store, _config) = ctx.open_store()?;

    if ctx.json {
        output_json(&store.saved_forms());
        return Ok(());
    }

    if store.saved_forms().is_empty() {
        if !ctx.quiet {
            println!("No saved forms yet. Save one with `fo form save <name>`.");
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = store
        .saved_forms()
        .iter()
        .map(|schema| {
            vec![
                schema.id.clone(),
                schema.name.clone(),
                schema.fields.len().to_string(),
                schema.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();
    output_table(&["ID", "NAME", "FIELDS", "CREATED"], &rows);
    Ok(())
}

fn run_delete(ctx: &RuntimeContext, id: &str) -> Result<()> {
    let (mut store, _config) = ctx.open_store()?;

    if !store.delete_saved_form(id)? {
        bail!("saved form {} not found", id);
    }

    if ctx.json {
        output_json(&serde_json::json!({ "deleted": id }));
    } else if !ctx.quiet {
        println!("Deleted saved form {}", id);
    }
    Ok(())
}

fn run_clear(ctx: &RuntimeContext) -> Result<()> {
    let (mut store, _config) = ctx.open_store()?;

    store.clear_current_form();
    store.save_draft()?;

    if ctx.json {
        output_json(&serde_json::json!({ "cleared": true }));
    } else if !ctx.quiet {
        println!("Working form cleared (saved forms untouched)");
    }
    Ok(())
}
