use serde_json::Value;
use thiserror::Error;

use crate::model::person::Person;

use super::storage::{ReadSlotState, Storage, StorageError, StorageResult};

#[derive(Error, Debug)]
pub enum SlotReadError {
    #[error("Nothing saved under [{0}] yet")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Slot [{key}] is not valid JSON: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("Slot [{0}] does not hold a list of people")]
    NotAList(String),
}

/// The single named slot that holds the whole serialized collection
pub struct PeopleSlot {
    storage: Box<dyn Storage + Send>,
    key: String,
}

impl PeopleSlot {
    pub fn new(storage: Box<dyn Storage + Send>, key: String) -> Self {
        Self { storage, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn init(&self) -> StorageResult<()> {
        self.storage.init()
    }

    /// Decodes the slot one record at a time. A record with odd field values is normalized
    /// rather than failing the whole read; only entries that are not objects are skipped.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn read(&self) -> Result<Vec<Person>, SlotReadError> {
        let bytes = match self.storage.read_slot(&self.key)? {
            ReadSlotState::Found(bytes) => bytes,
            ReadSlotState::NotFound => return Err(SlotReadError::NotFound(self.key.clone())),
        };

        let parsed: Value = serde_json::from_slice(&bytes).map_err(|source| SlotReadError::Corrupt {
            key: self.key.clone(),
            source,
        })?;

        let Value::Array(entries) = parsed else {
            return Err(SlotReadError::NotAList(self.key.clone()));
        };

        let people = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                if !entry.is_object() {
                    log::warn!("Skipping entry {} in [{}], not a person: {}", index, self.key, entry);
                    return None;
                }

                match serde_json::from_value::<Person>(entry) {
                    Ok(person) => Some(person),
                    Err(err) => {
                        log::warn!("Skipping entry {} in [{}]: {}", index, self.key, err);
                        None
                    }
                }
            })
            .collect();

        Ok(people)
    }

    #[tracing::instrument(skip(self, people), fields(key = %self.key))]
    pub fn write(&self, people: &[Person]) -> StorageResult<()> {
        let serialized_bytes = serde_json::to_vec(people)
            .map_err(|e| StorageError::UnableToWriteSlot(self.key.clone(), anyhow::Error::new(e)))?;

        self.storage.write_slot(&self.key, &serialized_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::seed::default_people,
        persistence::storage::memory::MemoryStorage,
    };

    fn slot_with(storage: &MemoryStorage) -> PeopleSlot {
        PeopleSlot::new(Box::new(storage.clone()), "people".to_string())
    }

    #[test]
    fn empty_slot_is_not_found() {
        let slot = slot_with(&MemoryStorage::new());

        assert!(matches!(slot.read(), Err(SlotReadError::NotFound(key)) if key == "people"));
    }

    #[test]
    fn garbage_is_corrupt() {
        let storage = MemoryStorage::new();
        storage.put_raw("people", b"{not json");

        let slot = slot_with(&storage);

        assert!(matches!(slot.read(), Err(SlotReadError::Corrupt { .. })));
    }

    #[test]
    fn object_is_not_a_list() {
        let storage = MemoryStorage::new();
        storage.put_raw("people", br#"{"people": []}"#);

        let slot = slot_with(&storage);

        assert!(matches!(slot.read(), Err(SlotReadError::NotAList(key)) if key == "people"));
    }

    #[test]
    fn odd_record_is_normalized_not_rejected() {
        // Given one record whose age and id are not the usual types
        let storage = MemoryStorage::new();
        storage.put_raw(
            "people",
            br#"[{"id": true, "name": "Ann", "age": 30.5}, {"id": "b", "name": "Ben"}]"#,
        );

        // When the slot is read
        let people = slot_with(&storage).read().unwrap();

        // Then both records survive
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].id.as_str(), "true");
        assert_eq!(people[0].age, Some(31));
        assert_eq!(people[1].name, "Ben");
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let storage = MemoryStorage::new();
        storage.put_raw("people", br#"[{"id": "a"}, "stray", null]"#);

        let people = slot_with(&storage).read().unwrap();

        assert_eq!(people.len(), 1);
    }

    #[test]
    fn write_then_read() {
        let slot = slot_with(&MemoryStorage::new());

        slot.write(&default_people()).unwrap();

        assert_eq!(slot.read().unwrap(), default_people());
    }
}
