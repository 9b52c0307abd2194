//! Schema store and persistence for forma.
//!
//! Provides the [`SlotStore`] trait (read/write JSON strings by key), a
//! file-backed and an in-memory implementation, and the [`FormStore`] that
//! owns the working form and the saved-schema collection.

pub mod error;
pub mod slot;
pub mod store;

// Re-exports for convenience.
pub use error::StorageError;
pub use slot::{FileSlotStore, MemorySlotStore, SlotStore};
pub use store::{FieldUpdates, FormStore, DRAFT_SLOT, FORMS_SLOT};
