//! Clap CLI definitions for the `fo` command.
//!
//! This module defines the complete CLI structure using clap 4 derive
//! macros. Field editing operates on a persisted working draft; preview
//! and submit evaluate it against values supplied with `--set`.

use clap::{Args, Parser, Subcommand};

use forma_core::enums::{FieldType, RuleKind};
use forma_core::rule::ValidationRule;

/// fo -- form builder.
///
/// Assemble a data-entry form from a palette of field types, attach
/// validation rules and derived-value computations, and save named form
/// definitions.
#[derive(Parser, Debug)]
#[command(
    name = "fo",
    about = "Form builder with validation and derived fields",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Storage directory (default: auto-discover .forma/).
    #[arg(long, global = true, env = "FORMA_DIR")]
    pub dir: Option<String>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a .forma directory in the current directory.
    Init,

    /// Edit the working form's fields.
    Field(FieldArgs),

    /// Save, load and manage named form definitions.
    Form(FormArgs),

    /// Evaluate the working form against entered values and render it.
    Preview(FillArgs),

    /// Validate entered values and accept the submission if clean.
    Submit(FillArgs),

    /// Show version information.
    Version,
}

#[derive(Args, Debug)]
pub struct FieldArgs {
    #[command(subcommand)]
    pub command: FieldCommands,
}

#[derive(Subcommand, Debug)]
pub enum FieldCommands {
    /// Add a field to the working form.
    Add(FieldAddArgs),
    /// Update attributes of an existing field.
    Update(FieldUpdateArgs),
    /// Show one field in detail.
    Show {
        /// Field id.
        id: String,
    },
    /// Delete a field (parent references to it are scrubbed).
    Delete {
        /// Field id.
        id: String,
    },
    /// Move a field from one position to another.
    Move {
        /// Current zero-based position.
        from: usize,
        /// Target zero-based position.
        to: usize,
    },
    /// List the working form's fields.
    List,
}

#[derive(Args, Debug)]
pub struct FieldAddArgs {
    /// Field type: text, number, textarea, select, radio, checkbox, date.
    #[arg(value_parser = clap::value_parser!(FieldType))]
    pub field_type: FieldType,

    /// Field label.
    pub label: String,

    /// Mark the field as required (display marker; add a `required` rule
    /// to actually enforce it).
    #[arg(long)]
    pub required: bool,

    /// Default value.
    #[arg(long)]
    pub default: Option<String>,

    /// Option for select/radio/checkbox fields (repeatable).
    #[arg(long = "option")]
    pub options: Vec<String>,

    /// Validation rule, `kind[:length]=message` (repeatable, order kept).
    /// Examples: `required=Name is required`, `minLength:5=Too short`.
    #[arg(long = "rule", value_parser = parse_rule_spec)]
    pub rules: Vec<ValidationRule>,

    /// Mark the field as derived.
    #[arg(long)]
    pub derived: bool,

    /// Parent field id for a derived field (repeatable).
    #[arg(long = "parent", requires = "derived")]
    pub parents: Vec<String>,

    /// Derivation formula text for a derived field.
    #[arg(long, requires = "derived")]
    pub formula: Option<String>,
}

#[derive(Args, Debug)]
pub struct FieldUpdateArgs {
    /// Field id.
    pub id: String,

    /// New label.
    #[arg(long)]
    pub label: Option<String>,

    /// New required marker.
    #[arg(long)]
    pub required: Option<bool>,

    /// New default value.
    #[arg(long)]
    pub default: Option<String>,

    /// Replacement options list (repeatable; replaces all options).
    #[arg(long = "option")]
    pub options: Vec<String>,

    /// Replacement rules list (repeatable; replaces all rules).
    #[arg(long = "rule", value_parser = parse_rule_spec)]
    pub rules: Vec<ValidationRule>,

    /// New derivation formula text.
    #[arg(long)]
    pub formula: Option<String>,
}

#[derive(Args, Debug)]
pub struct FormArgs {
    #[command(subcommand)]
    pub command: FormCommands,
}

#[derive(Subcommand, Debug)]
pub enum FormCommands {
    /// Snapshot the working form under a name.
    Save {
        /// Name for the saved form.
        name: String,
    },
    /// Replace the working form with a saved one.
    Load {
        /// Saved form id.
        id: String,
    },
    /// List saved forms.
    List,
    /// Delete a saved form.
    Delete {
        /// Saved form id.
        id: String,
    },
    /// Reset the working form (saved forms are untouched).
    Clear,
}

#[derive(Args, Debug)]
pub struct FillArgs {
    /// Field value, `id=value` (repeatable). Checkbox values are
    /// comma-separated.
    #[arg(short = 's', long = "set", value_name = "ID=VALUE")]
    pub set: Vec<String>,
}

/// Parses a `--rule` spec: `kind[:length]=message`.
pub fn parse_rule_spec(spec: &str) -> Result<ValidationRule, String> {
    let (head, message) = spec
        .split_once('=')
        .ok_or_else(|| format!("missing '=message' in rule spec: {}", spec))?;
    if message.is_empty() {
        return Err(format!("empty message in rule spec: {}", spec));
    }

    let (kind_str, value) = match head.split_once(':') {
        Some((k, v)) => {
            let parsed = v
                .parse::<u32>()
                .map_err(|_| format!("invalid length in rule spec: {}", v))?;
            (k, Some(parsed))
        }
        None => (head, None),
    };

    let kind: RuleKind = kind_str.parse()?;
    if kind.takes_value() && value.is_none() {
        return Err(format!("{} rules need a length, e.g. {}:5=...", kind, kind));
    }
    if !kind.takes_value() && value.is_some() {
        return Err(format!("{} rules do not take a length", kind));
    }

    Ok(ValidationRule { kind, value, message: message.to_owned() })
}
