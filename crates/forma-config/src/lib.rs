//! Configuration and `.forma/` directory discovery for forma.

pub mod config;
pub mod forma_dir;

pub use config::{load_config, Config, ConfigError};
pub use forma_dir::{ensure_forma_dir, find_forma_dir};
