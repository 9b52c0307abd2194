//! `fo field` -- edit the working form's fields.

use anyhow::{bail, Result};

use forma_core::field::FormField;
use forma_core::validation::validate_new_field;
use forma_core::value::Value;
use forma_storage::FieldUpdates;

use crate::cli::{FieldAddArgs, FieldCommands, FieldUpdateArgs};
use crate::context::RuntimeContext;
use crate::output::{format_field_detail, format_field_row, output_json, output_table};

/// Execute the `fo field` subcommands.
pub fn run(ctx: &RuntimeContext, command: &FieldCommands) -> Result<()> {
    match command {
        FieldCommands::Add(args) => run_add(ctx, args),
        FieldCommands::Update(args) => run_update(ctx, args),
        FieldCommands::Show { id } => run_show(ctx, id),
        FieldCommands::Delete { id } => run_delete(ctx, id),
        FieldCommands::Move { from, to } => run_move(ctx, *from, *to),
        FieldCommands::List => run_list(ctx),
    }
}

fn run_add(ctx: &RuntimeContext, args: &FieldAddArgs) -> Result<()> {
    let (mut store, _config) = ctx.open_store()?;

    let id = store.next_field_id(&args.label);
    let mut builder = FormField::builder(args.field_type, &args.label)
        .id(&id)
        .required(args.required)
        .rules(args.rules.iter().cloned())
        .options(args.options.iter().cloned());
    if let Some(ref default) = args.default {
        builder = builder.default_value(parse_value(args.field_type.is_multi_value(), default));
    }
    if args.derived {
        builder = builder.derived(
            args.parents.iter().cloned(),
            args.formula.clone().unwrap_or_default(),
        );
    }
    let field = builder.build();

    if let Err(e) = validate_new_field(&field, store.fields()) {
        bail!("cannot add field: {}", e);
    }

    store.add_field(field.clone());
    store.save_draft()?;

    if ctx.json {
        output_json(&field);
    } else if !ctx.quiet {
        println!("Added {} [{}] {}", field.id, field.field_type, field.label);
    }
    Ok(())
}

fn run_update(ctx: &RuntimeContext, args: &FieldUpdateArgs) -> Result<()> {
    let (mut store, _config) = ctx.open_store()?;

    let is_multi = store
        .fields()
        .iter()
        .find(|f| f.id == args.id)
        .map(|f| f.field_type.is_multi_value())
        .unwrap_or(false);

    let updates = FieldUpdates {
        label: args.label.clone(),
        required: args.required,
        default_value: args
            .default
            .as_ref()
            .map(|d| parse_value(is_multi, d)),
        validation_rules: if args.rules.is_empty() {
            None
        } else {
            Some(args.rules.clone())
        },
        options: if args.options.is_empty() {
            None
        } else {
            Some(args.options.clone())
        },
        derived_formula: args.formula.clone(),
        ..Default::default()
    };

    if !store.update_field(&args.id, updates) {
        bail!("field {} not found", args.id);
    }
    store.save_draft()?;

    if ctx.json {
        // The update succeeded, so the field is present.
        if let Some(field) = store.fields().iter().find(|f| f.id == args.id) {
            output_json(field);
        }
    } else if !ctx.quiet {
        println!("Updated {}", args.id);
    }
    Ok(())
}

fn run_show(ctx: &RuntimeContext, id: &str) -> Result<()> {
    let (store, _config) = ctx.open_store()?;

    let Some(field) = store.fields().iter().find(|f| f.id == id) else {
        bail!("field {} not found", id);
    };

    if ctx.json {
        output_json(field);
    } else {
        println!("{}", format_field_detail(field));
    }
    Ok(())
}

fn run_delete(ctx: &RuntimeContext, id: &str) -> Result<()> {
    let (mut store, _config) = ctx.open_store()?;

    if !store.delete_field(id) {
        bail!("field {} not found", id);
    }
    store.save_draft()?;

    if ctx.json {
        output_json(&serde_json::json!({ "deleted": id }));
    } else if !ctx.quiet {
        println!("Deleted {}", id);
    }
    Ok(())
}

fn run_move(ctx: &RuntimeContext, from: usize, to: usize) -> Result<()> {
    let (mut store, _config) = ctx.open_store()?;

    if !store.reorder_field(from, to) {
        bail!(
            "cannot move field from {} to {}: the form has {} field(s)",
            from,
            to,
            store.fields().len()
        );
    }
    store.save_draft()?;

    if ctx.json {
        let ids: Vec<&str> = store.fields().iter().map(|f| f.id.as_str()).collect();
        output_json(&ids);
    } else if !ctx.quiet {
        println!("Moved field {} -> {}", from, to);
    }
    Ok(())
}

fn run_list(ctx: &RuntimeContext) -> Result<()> {
    let (store, _config) = ctx.open_store()?;

    if ctx.json {
        output_json(&store.fields());
        return Ok(());
    }

    if store.fields().is_empty() {
        if !ctx.quiet {
            println!("No fields yet. Add one with `fo field add`.");
        }
        return Ok(());
    }

    if !store.name().is_empty() {
        println!("Form: {}", store.name());
    }
    let rows: Vec<Vec<String>> = store.fields().iter().map(format_field_row).collect();
    output_table(&["ID", "TYPE", "LABEL", "FLAGS", "RULES"], &rows);
    Ok(())
}

/// Parses a CLI-supplied value; comma-separated for multi-value fields.
pub fn parse_value(is_multi: bool, raw: &str) -> Value {
    if is_multi {
        Value::Many(
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    } else {
        Value::from(raw)
    }
}
