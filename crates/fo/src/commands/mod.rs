//! Command handlers for the `fo` CLI.

pub mod field;
pub mod form;
pub mod init;
pub mod preview;
pub mod submit;
pub mod version;
