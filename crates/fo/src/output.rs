//! Output formatting helpers for the `fo` CLI.
//!
//! Provides JSON output, table formatting, and human-readable field and
//! preview rendering.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use serde::Serialize;

use forma_core::field::FormField;
use forma_core::value::{ErrorMap, Value, ValueMap};
use forma_engine::PLACEHOLDER_VALUE;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Each row is a `Vec<String>` with columns matching the headers.
/// Column widths are computed from the data for alignment.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // Compute column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    // Print header
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{:<width$}", header, width = widths[i]);
    }
    let _ = writeln!(handle);

    // Print separator
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{}", "-".repeat(*width));
    }
    let _ = writeln!(handle);

    // Print rows
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                let _ = write!(handle, "  ");
            }
            if i < widths.len() {
                let _ = write!(handle, "{:<width$}", cell, width = widths[i]);
            } else {
                let _ = write!(handle, "{}", cell);
            }
        }
        let _ = writeln!(handle);
    }
}

/// Format a field as a compact row for list output.
///
/// Returns a vector of column values suitable for [`output_table`].
pub fn format_field_row(field: &FormField) -> Vec<String> {
    vec![
        field.id.clone(),
        field.field_type.to_string(),
        field.label.clone(),
        format_field_flags(field),
        if field.validation_rules.is_empty() {
            String::new()
        } else {
            field
                .validation_rules
                .iter()
                .map(|r| r.kind.to_string())
                .collect::<Vec<_>>()
                .join(",")
        },
    ]
}

/// Flag column: `*` required, `=` derived.
fn format_field_flags(field: &FormField) -> String {
    let mut flags = String::new();
    if field.required {
        flags.push('*');
    }
    if field.is_derived {
        flags.push('=');
    }
    flags
}

/// Format a field in detailed multi-line view.
pub fn format_field_detail(field: &FormField) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} [{}] {}",
        field.id, field.field_type, field.label
    ));
    if field.required {
        lines.push("Required: yes".to_string());
    }
    if !field.default_value.is_empty() {
        lines.push(format!("Default: {}", render_value(&field.default_value)));
    }
    if !field.options.is_empty() {
        lines.push(format!("Options: {}", field.options.join(", ")));
    }
    for rule in &field.validation_rules {
        let spec = match rule.value {
            Some(v) => format!("{}:{}", rule.kind, v),
            None => rule.kind.to_string(),
        };
        lines.push(format!("Rule: {} ({})", spec, rule.message));
    }
    if field.is_derived {
        lines.push(format!(
            "Derived from {} ({})",
            field.parent_fields.join(", "),
            field.derived_formula
        ));
    }

    lines.join("\n")
}

/// Render a value for display; multi-values join on ", ".
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Many(items) => items.join(", "),
    }
}

/// Render the evaluated form, one field per line, errors in red below the
/// offending field.
pub fn render_preview(fields: &[FormField], values: &ValueMap, errors: &ErrorMap) -> String {
    let mut lines = Vec::new();
    for field in fields {
        let shown = match values.get(&field.id) {
            Some(v) => render_value(v),
            None if field.is_derived => PLACEHOLDER_VALUE.to_string(),
            None => String::new(),
        };

        let marker = if field.required { " *" } else { "" };
        let label = format!("{}{}", field.label, marker);
        if field.is_derived {
            lines.push(format!("  {}: {}", label, shown.dimmed()));
        } else {
            lines.push(format!("  {}: {}", label, shown));
        }

        if let Some(message) = errors.get(&field.id) {
            lines.push(format!("    {}", message.red()));
        }
    }
    lines.join("\n")
}
