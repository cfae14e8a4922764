use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use anyhow::anyhow;

use super::{ReadSlotState, Storage, StorageError, StorageResult};

/// In-process storage. Clones share the same slots, so a handle kept outside the store can
/// inspect or tamper with what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    read_only: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every write from now on, like a browser with storage disabled
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Writes raw bytes into a slot, bypassing the read-only switch
    pub fn put_raw(&self, key: &str, bytes: &[u8]) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_string(), bytes.to_vec());
        }
    }

    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.slots.lock().ok()?.get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn init(&self) -> StorageResult<()> {
        Ok(())
    }

    fn read_slot(&self, key: &str) -> StorageResult<ReadSlotState> {
        let slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::UnableToReadSlot(key.to_string(), anyhow!(e.to_string())))?;

        Ok(match slots.get(key) {
            Some(bytes) => ReadSlotState::Found(bytes.clone()),
            None => ReadSlotState::NotFound,
        })
    }

    fn write_slot(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StorageError::StorageDisabled(key.to_string()));
        }

        let mut slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::UnableToWriteSlot(key.to_string(), anyhow!(e.to_string())))?;

        slots.insert(key.to_string(), bytes.to_vec());

        Ok(())
    }
}
