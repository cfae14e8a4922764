use std::time::Instant;

use chrono::Utc;
use num_format::{Locale, ToFormattedString};

use crate::{
    consts::consts::PersonId,
    model::{draft::PersonDraft, person::Person},
    persistence::{
        interchange::{self, FormatError},
        slot::{PeopleSlot, SlotReadError},
    },
};

use super::{
    options::StoreOptions,
    seed::default_people,
    table::{
        query,
        table::{self, fill_missing_ids, Confirmation, UpsertOutcome},
    },
};

#[derive(Clone, Debug, PartialEq)]
pub enum ImportOutcome {
    /// The payload is valid; re-run with a decision to replace the current people
    NeedsConfirmation { count: usize },
    Declined,
    Replaced { count: usize },
}

/// Owns the people collection and the slot it is saved to.
///
/// Reads never fail: an empty or unreadable slot falls back to the built-in people. Every
/// successful mutation rewrites the whole slot; a failed write is logged and the in-memory
/// collection stays authoritative for the rest of the session.
pub struct PeopleStore {
    people: Vec<Person>,
    slot: PeopleSlot,
    seed_defaults: bool,
    persisted: bool,
}

impl PeopleStore {
    pub fn open(options: StoreOptions) -> Self {
        let slot = PeopleSlot::new(options.storage_engine.get_engine(), options.storage_key);

        if let Err(err) = slot.init() {
            log::warn!("Storage unavailable, changes may not be saved: {}", err);
        }

        let mut store = Self {
            people: Vec::new(),
            slot,
            seed_defaults: options.seed_defaults,
            persisted: false,
        };

        store.reload();

        store
    }

    /// Replaces the in-memory people with whatever the slot currently holds
    pub fn reload(&mut self) -> &[Person] {
        let now = Instant::now();

        let (people, persisted) = match self.slot.read() {
            Ok(people) => (fill_missing_ids(people, Utc::now()), true),
            Err(SlotReadError::NotFound(key)) => {
                log::info!("No people saved under [{}], starting from defaults", key);
                (self.fallback(), false)
            }
            Err(err) => {
                log::warn!("{}, starting from defaults", err);
                (self.fallback(), false)
            }
        };

        log::info!(
            "📀 Loaded [People: {}, Slot: {}, Duration: {}ms]",
            people.len().to_formatted_string(&Locale::en),
            self.slot.key(),
            now.elapsed().as_millis(),
        );

        self.people = people;
        self.persisted = persisted;

        &self.people
    }

    fn fallback(&self) -> Vec<Person> {
        if self.seed_defaults {
            default_people()
        } else {
            Vec::new()
        }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| &p.id == id)
    }

    /// Whether the last write reached storage. False after a failed save, and after a load
    /// that fell back to defaults
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn search(&self, query: &str) -> Vec<Person> {
        query::search(&self.people, query)
    }

    /// Adds (`original_id` is `None`) or edits a person. A colliding id comes back as
    /// `NeedsConfirmation` until the caller passes `Approved` or `Declined`.
    pub fn upsert(
        &mut self,
        draft: &PersonDraft,
        original_id: Option<&PersonId>,
        confirmation: Confirmation,
    ) -> UpsertOutcome {
        let outcome = table::upsert(&self.people, draft, original_id, confirmation);

        match &outcome {
            UpsertOutcome::Applied { people, person } => {
                match original_id {
                    Some(original_id) => {
                        log::info!("✅ Updated: [ID: {} -> {}]", original_id, person.id)
                    }
                    None => log::info!("✅ Saved: [ID: {}]", person.id),
                }

                self.people = people.clone();
                self.save();
            }
            UpsertOutcome::NeedsConfirmation { id } => {
                log::info!("ID [{}] already exists, waiting for confirmation", id)
            }
            UpsertOutcome::Declined => log::info!("⚠️  Overwrite declined, nothing changed"),
        }

        outcome
    }

    /// Returns whether a person was removed; an unknown id changes nothing
    pub fn delete(&mut self, id: &PersonId) -> bool {
        let people = table::delete(&self.people, id);

        if people.len() == self.people.len() {
            log::info!("Nothing to delete for [ID: {}]", id);
            return false;
        }

        log::info!("✅ Deleted: [ID: {}]", id);

        self.people = people;
        self.save();

        true
    }

    /// Validates an import payload and, once approved, replaces every person with it.
    /// A `FormatError` leaves both the in-memory and saved people untouched.
    #[tracing::instrument(skip(self, raw))]
    pub fn import_replace(
        &mut self,
        raw: &str,
        confirmation: Confirmation,
    ) -> Result<ImportOutcome, FormatError> {
        let people = interchange::parse_import(raw, Utc::now())?;
        let count = people.len();

        let outcome = match confirmation {
            Confirmation::Pending => ImportOutcome::NeedsConfirmation { count },
            Confirmation::Declined => ImportOutcome::Declined,
            Confirmation::Approved => {
                log::info!(
                    "✅ Imported: [People: {}]",
                    count.to_formatted_string(&Locale::en)
                );

                self.people = people;
                self.save();

                ImportOutcome::Replaced { count }
            }
        };

        Ok(outcome)
    }

    pub fn export(&self) -> Result<String, serde_json::Error> {
        interchange::export(&self.people)
    }

    /// Puts the built-in people back and saves them
    pub fn reset(&mut self) -> &[Person] {
        log::info!("Resetting to default people");

        self.people = default_people();
        self.save();

        &self.people
    }

    #[tracing::instrument(skip(self))]
    fn save(&mut self) {
        match self.slot.write(&self.people) {
            Ok(()) => {
                log::debug!(
                    "Saved [People: {}, Slot: {}]",
                    self.people.len().to_formatted_string(&Locale::en),
                    self.slot.key()
                );
                self.persisted = true;
            }
            Err(err) => {
                log::warn!("Could not save people, keeping them in memory: {}", err);
                self.persisted = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::social::Social;

    fn draft(id: Option<&str>, name: &str) -> PersonDraft {
        PersonDraft {
            id: id.map(str::to_string),
            name: name.to_string(),
            ..PersonDraft::default()
        }
    }

    mod load {
        use super::*;

        #[test_log::test]
        fn empty_storage_loads_defaults() {
            let (options, storage) = StoreOptions::new_test();

            let store = PeopleStore::open(options);

            assert_eq!(store.people(), default_people().as_slice());
            assert!(!store.is_persisted());
            assert_eq!(storage.get_raw("test_people"), None, "defaults are not written");
        }

        #[test_log::test]
        fn corrupt_storage_loads_defaults_without_overwriting() {
            // Given a slot holding garbage
            let (options, storage) = StoreOptions::new_test();
            storage.put_raw("test_people", b"not json");

            // When the store opens
            let store = PeopleStore::open(options);

            // Then it starts from defaults and leaves the slot alone
            assert_eq!(store.people(), default_people().as_slice());
            assert_eq!(storage.get_raw("test_people"), Some(b"not json".to_vec()));
        }

        #[test_log::test]
        fn stored_records_are_normalized() {
            let (options, storage) = StoreOptions::new_test();
            storage.put_raw("test_people", br#"[{"id": 8, "name": "Stored", "social": {"github": "gh"}}]"#);

            let store = PeopleStore::open(options);

            let person = &store.people()[0];
            assert_eq!(person.id, PersonId::from("8"));
            assert_eq!(
                person.social,
                Social {
                    github: "gh".to_string(),
                    ..Social::default()
                }
            );
            assert!(store.is_persisted());
        }

        #[test_log::test]
        fn odd_stored_record_keeps_every_saved_person() {
            // Given a saved list where one age is fractional
            let (options, storage) = StoreOptions::new_test();
            storage.put_raw(
                "test_people",
                br#"[{"id": "a", "name": "Saved Ann", "age": 30.5}, {"id": "b", "name": "Saved Ben"}]"#,
            );

            // When the store opens and a mutation rewrites the slot
            let mut store = PeopleStore::open(options);
            let names: Vec<&str> = store.people().iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["Saved Ann", "Saved Ben"]);

            store.delete(&PersonId::from("a"));

            // Then the other saved person is still in storage
            let saved = storage.get_raw("test_people").unwrap();
            let saved: Vec<Person> = serde_json::from_slice(&saved).unwrap();
            assert_eq!(saved.len(), 1);
            assert_eq!(saved[0].name, "Saved Ben");
        }

        #[test_log::test]
        fn empty_storage_without_seed_is_empty() {
            let (options, _) = StoreOptions::new_test();

            let store = PeopleStore::open(options.set_seed_defaults(false));

            assert!(store.people().is_empty());
        }
    }

    mod mutations {
        use super::*;

        #[test_log::test]
        fn upsert_persists_the_collection() {
            let (options, storage) = StoreOptions::new_test();
            let mut store = PeopleStore::open(options.clone());

            store.upsert(&draft(None, "Frank"), None, Confirmation::Pending);

            assert!(store.is_persisted());

            let reopened = PeopleStore::open(options);
            assert_eq!(reopened.people(), store.people());
            assert!(storage.get_raw("test_people").is_some());
        }

        #[test_log::test]
        fn collision_waits_then_applies_when_approved() {
            let (options, _) = StoreOptions::new_test();
            let mut store = PeopleStore::open(options);

            // When adding over an existing id
            let outcome = store.upsert(&draft(Some("1"), "Alicia"), None, Confirmation::Pending);

            // Then nothing changes until the caller decides
            assert_eq!(
                outcome,
                UpsertOutcome::NeedsConfirmation {
                    id: PersonId::from("1")
                }
            );
            assert_eq!(store.people(), default_people().as_slice());

            // And re-running with approval overwrites
            store.upsert(&draft(Some("1"), "Alicia"), None, Confirmation::Approved);

            assert_eq!(store.get(&PersonId::from("1")).map(|p| p.name.as_str()), Some("Alicia"));
            assert_eq!(store.people().len(), 5);
        }

        #[test_log::test]
        fn declined_collision_does_not_save() {
            let (options, storage) = StoreOptions::new_test();
            let mut store = PeopleStore::open(options);

            let outcome = store.upsert(&draft(Some("1"), "Alicia"), None, Confirmation::Declined);

            assert_eq!(outcome, UpsertOutcome::Declined);
            assert_eq!(storage.get_raw("test_people"), None);
        }

        #[test_log::test]
        fn delete_reports_whether_anything_was_removed() {
            let (options, _) = StoreOptions::new_test();
            let mut store = PeopleStore::open(options);

            assert!(store.delete(&PersonId::from("3")));
            assert!(!store.delete(&PersonId::from("3")));
            assert_eq!(store.people().len(), 4);
        }

        #[test_log::test]
        fn failed_write_keeps_the_in_memory_change() {
            // Given storage that refuses writes
            let (options, storage) = StoreOptions::new_test();
            storage.set_read_only(true);
            let mut store = PeopleStore::open(options);

            // When someone is deleted
            store.delete(&PersonId::from("2"));

            // Then the session keeps the change but knows it is not saved
            assert_eq!(store.people().len(), 4);
            assert!(!store.is_persisted());
            assert_eq!(storage.get_raw("test_people"), None);
        }

        #[test_log::test]
        fn reset_restores_defaults() {
            let (options, _) = StoreOptions::new_test();
            let mut store = PeopleStore::open(options);
            store.delete(&PersonId::from("1"));

            store.reset();

            assert_eq!(store.people(), default_people().as_slice());
            assert!(store.is_persisted());
        }
    }

    mod import {
        use super::*;

        #[test_log::test]
        fn pending_import_reports_count_without_applying() {
            let (options, _) = StoreOptions::new_test();
            let mut store = PeopleStore::open(options);

            let outcome = store
                .import_replace(r#"[{"id": "a"}]"#, Confirmation::Pending)
                .unwrap();

            assert_eq!(outcome, ImportOutcome::NeedsConfirmation { count: 1 });
            assert_eq!(store.people().len(), 5);
        }

        #[test_log::test]
        fn approved_import_replaces_and_saves() {
            let (options, _) = StoreOptions::new_test();
            let mut store = PeopleStore::open(options.clone());

            let outcome = store
                .import_replace(r#"{"people": [{"id": "a", "name": "Ann"}]}"#, Confirmation::Approved)
                .unwrap();

            assert_eq!(outcome, ImportOutcome::Replaced { count: 1 });
            assert_eq!(PeopleStore::open(options).people(), store.people());
        }

        #[test_log::test]
        fn bad_payload_changes_nothing() {
            let (options, storage) = StoreOptions::new_test();
            let mut store = PeopleStore::open(options);
            store.delete(&PersonId::from("5"));
            let saved = storage.get_raw("test_people");

            let result = store.import_replace(r#"{"foo": 1}"#, Confirmation::Approved);

            assert!(matches!(result, Err(FormatError::ExpectedArray)));
            assert_eq!(store.people().len(), 4);
            assert_eq!(storage.get_raw("test_people"), saved);
        }

        #[test_log::test]
        fn export_round_trips_through_import() {
            let (options, _) = StoreOptions::new_test();
            let mut store = PeopleStore::open(options);
            store.upsert(&draft(Some("x-1"), "Xavier"), None, Confirmation::Pending);
            let before = store.people().to_vec();

            let exported = store.export().unwrap();
            store
                .import_replace(&exported, Confirmation::Approved)
                .unwrap();

            assert_eq!(store.people(), before.as_slice());
        }
    }
}
