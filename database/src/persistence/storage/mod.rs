use std::path::PathBuf;

use thiserror::Error;

use self::{file::FileStorage, memory::MemoryStorage};

pub mod file;
pub mod memory;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Unable to initialize storage: {0}")]
    UnableToInitializeStorage(anyhow::Error),

    #[error("Unable to read slot [{0}]: {1}")]
    UnableToReadSlot(String, anyhow::Error),

    #[error("Unable to write slot [{0}]: {1}")]
    UnableToWriteSlot(String, anyhow::Error),

    /// Writes are refused, e.g. a full disk or a read-only store
    #[error("Storage is disabled, cannot write slot [{0}]")]
    StorageDisabled(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

pub fn io_to_generic_error(error: std::io::Error) -> anyhow::Error {
    anyhow::Error::new(error)
}

#[derive(Debug, PartialEq)]
pub enum ReadSlotState {
    Found(Vec<u8>),
    NotFound,
}

/// A key-value store holding whole serialized slots. Every write replaces the slot.
pub trait Storage {
    /// Called when the store opens, should be idempotent
    fn init(&self) -> StorageResult<()>;
    fn read_slot(&self, key: &str) -> StorageResult<ReadSlotState>;
    fn write_slot(&self, key: &str, bytes: &[u8]) -> StorageResult<()>;
}

#[derive(Debug, Clone)]
pub enum StorageEngine {
    /// One `<key>.json` file per slot inside the directory
    File(PathBuf),
    Memory(MemoryStorage),
}

impl StorageEngine {
    pub fn get_engine(&self) -> Box<dyn Storage + Send> {
        match self {
            StorageEngine::File(path) => Box::new(FileStorage::new(path.clone())),
            StorageEngine::Memory(storage) => Box::new(storage.clone()),
        }
    }
}
