//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what every command handler needs: the
//! resolved storage directory and the global output flags. Constructed
//! once in `main` after CLI parsing, before command dispatch.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use forma_config::{find_forma_dir, load_config, Config};
use forma_storage::{FileSlotStore, FormStore};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit storage directory from `--dir` / `FORMA_DIR`, if given.
    pub forma_dir: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            forma_dir: global.dir.as_ref().map(PathBuf::from),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Returns the `.forma/` directory, auto-discovering if needed.
    ///
    /// Priority: `--dir` flag / `FORMA_DIR` env, then the nearest `.forma/`
    /// walking up from the current directory.
    pub fn resolve_forma_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.forma_dir {
            return Ok(dir.clone());
        }
        let cwd = env::current_dir().context("failed to get current directory")?;
        find_forma_dir(&cwd).context("no .forma directory found. Run 'fo init' to create one.")
    }

    /// Opens the form store for this invocation.
    ///
    /// Loads config, attaches the file backend under the configured slots
    /// directory, and restores the saved forms and the working draft.
    pub fn open_store(&self) -> Result<(FormStore<FileSlotStore>, Config)> {
        let forma_dir = self.resolve_forma_dir()?;
        let config = load_config(&forma_dir)
            .with_context(|| format!("failed to load config from {}", forma_dir.display()))?;

        let slots_path = config.slots_path(&forma_dir);
        tracing::debug!(dir = %forma_dir.display(), "opening form store");
        let backend = FileSlotStore::new(&slots_path)
            .with_context(|| format!("failed to open storage at {}", slots_path.display()))?;

        let mut store = FormStore::with_id_length(backend, config.id_length);
        store.load_saved_forms().context("failed to read saved forms")?;
        store.load_draft().context("failed to read working draft")?;
        Ok((store, config))
    }
}
