//! Storage abstractions for the service layer.
//!
//! Both services persist their collection through a [`CollectionStore`]: a
//! flat named sequence of records serialized as JSON text. The store is
//! injected at construction time so tests can substitute [`MemoryStore`]
//! while a session uses [`JsonFileStore`].

pub mod json_file_store;
pub mod memory;

pub use json_file_store::JsonFileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ServiceError;

/// Whole-collection read/write of JSON-encoded records.
///
/// There are no transactions and no locking: every mutation reads the entire
/// collection, edits it in memory, and writes it back. Two sessions writing
/// the same store race last-writer-wins; the host environment is assumed
/// single-threaded for one logical session.
pub trait CollectionStore: Send + Sync {
    /// Read all records under `collection`. A collection that has never been
    /// written reads as empty; unparseable stored text is a `Storage` error.
    fn read<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, ServiceError>;

    /// Replace the full contents of `collection`.
    fn write<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<(), ServiceError>;
}
