//! Storage backends for tinylink short links.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use tinylink_core::{ReadRepository, Repository, StorageError};
