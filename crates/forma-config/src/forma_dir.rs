//! Discovery and management of the `.forma/` directory.
//!
//! The `.forma/` directory holds a project's saved forms, working draft
//! and configuration file. This module finds it by walking up the
//! directory tree and creates it when initializing.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the forma metadata directory.
const FORMA_DIR_NAME: &str = ".forma";

/// Environment variable that can override the forma directory.
const FORMA_DIR_ENV: &str = "FORMA_DIR";

/// Walk up the directory tree from `start` looking for a `.forma/` directory.
///
/// The `FORMA_DIR` environment variable is checked first (highest
/// priority). Returns `None` if the filesystem root is reached without
/// finding one.
pub fn find_forma_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(FORMA_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    // Canonicalize the start path so we get absolute paths.
    let start = match start.canonicalize() {
        Ok(p) => p,
        Err(_) => return None,
    };

    let mut current = start.as_path();
    loop {
        let candidate = current.join(FORMA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break, // Reached filesystem root.
        }
    }

    None
}

/// Ensure a `.forma/` directory exists at the given path.
///
/// If `path` itself is not called `.forma`, a `.forma/` subdirectory is
/// created under it. Returns the path to the `.forma/` directory.
pub fn ensure_forma_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let forma_dir = if path.ends_with(FORMA_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(FORMA_DIR_NAME)
    };

    std::fs::create_dir_all(&forma_dir)?;
    Ok(forma_dir)
}
