#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryStreakStore, Storage, StorageError, StreakStore};
