#![forbid(unsafe_code)]

pub mod live;
pub mod repository;
pub mod sqlite;

pub use live::{ErrorEmitter, LiveStore, Operation, PermissionError};
pub use repository::{InMemoryRepository, Storage, StorageError};
