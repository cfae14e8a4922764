use std::path::PathBuf;

use crate::{
    consts::consts::{DEFAULT_DATA_DIRECTORY, DEFAULT_STORAGE_KEY},
    persistence::storage::{memory::MemoryStorage, StorageEngine},
};

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub storage_engine: StorageEngine,
    pub storage_key: String,
    pub seed_defaults: bool,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl StoreOptions {
    pub fn set_storage_engine(mut self, storage_engine: StorageEngine) -> Self {
        self.storage_engine = storage_engine;
        self
    }

    /// Name of the slot the collection is saved under
    pub fn set_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// Defines whether an empty or unreadable slot falls back to the built-in people.
    /// When off, the store starts with an empty collection instead
    pub fn set_seed_defaults(mut self, seed_defaults: bool) -> Self {
        self.seed_defaults = seed_defaults;
        self
    }

    pub fn set_data_directory(self, data_directory: PathBuf) -> Self {
        self.set_storage_engine(StorageEngine::File(data_directory))
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        // Defaults to $CWD/data
        Self {
            storage_engine: StorageEngine::File(PathBuf::from(DEFAULT_DATA_DIRECTORY)),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_defaults: true,
        }
    }
}

impl StoreOptions {
    /// Fresh in-memory storage, nothing touches the disk
    pub fn new_in_memory() -> Self {
        StoreOptions::default().set_storage_engine(StorageEngine::Memory(MemoryStorage::new()))
    }
}

#[cfg(test)]
impl StoreOptions {
    /// In-memory options plus a handle onto the same storage
    pub fn new_test() -> (Self, MemoryStorage) {
        let storage = MemoryStorage::new();

        let options = StoreOptions::default()
            .set_storage_engine(StorageEngine::Memory(storage.clone()))
            .set_storage_key("test_people");

        (options, storage)
    }
}
