use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::{
    consts::consts::PersonId,
    model::{draft::PersonDraft, person::Person},
};

use super::id::next_id;

/// A caller's answer to "overwrite / replace existing data?"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    /// Not asked yet. A colliding write stops and reports back instead of applying
    Pending,
    Approved,
    Declined,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UpsertOutcome {
    Applied { people: Vec<Person>, person: Person },
    /// The target id is held by another record; re-run with a decision
    NeedsConfirmation { id: PersonId },
    Declined,
}

/// Insert or overwrite by id.
///
/// Without an `original_id` this is an add: a fresh id is appended, an existing one is
/// replaced in place once the overwrite is approved. With an `original_id` this is an edit:
/// the original record is removed and the payload appended, and if the id changed onto
/// another record that record is removed too (again only once approved).
pub fn upsert(
    people: &[Person],
    draft: &PersonDraft,
    original_id: Option<&PersonId>,
    confirmation: Confirmation,
) -> UpsertOutcome {
    upsert_at(people, draft, original_id, confirmation, Utc::now())
}

pub fn upsert_at(
    people: &[Person],
    draft: &PersonDraft,
    original_id: Option<&PersonId>,
    confirmation: Confirmation,
    now: DateTime<Utc>,
) -> UpsertOutcome {
    let id = draft
        .requested_id()
        .unwrap_or_else(|| next_id(people.iter().map(|p| &p.id), now));

    let existing_index = people.iter().position(|p| p.id == id);

    let person = draft.clone().into_person(id.clone());

    let next_people = match original_id {
        Some(original_id) => {
            let collides = &id != original_id && existing_index.is_some();

            if collides {
                if let Some(outcome) = gate(confirmation, &id) {
                    return outcome;
                }
            }

            let mut next_people: Vec<Person> = people
                .iter()
                .filter(|p| &p.id != original_id && !(collides && p.id == id))
                .cloned()
                .collect();

            next_people.push(person.clone());
            next_people
        }
        None => {
            let mut next_people = people.to_vec();

            match existing_index {
                Some(index) => {
                    if let Some(outcome) = gate(confirmation, &id) {
                        return outcome;
                    }

                    next_people[index] = person.clone();
                }
                None => next_people.push(person.clone()),
            }

            next_people
        }
    };

    UpsertOutcome::Applied {
        people: next_people,
        person,
    }
}

// Returns the outcome to stop with, or None when the overwrite may go ahead
fn gate(confirmation: Confirmation, id: &PersonId) -> Option<UpsertOutcome> {
    match confirmation {
        Confirmation::Pending => Some(UpsertOutcome::NeedsConfirmation { id: id.clone() }),
        Confirmation::Declined => Some(UpsertOutcome::Declined),
        Confirmation::Approved => None,
    }
}

/// Removes every record with this id. Unknown ids are a no-op.
pub fn delete(people: &[Person], id: &PersonId) -> Vec<Person> {
    people.iter().filter(|p| &p.id != id).cloned().collect()
}

/// Gives every record that decoded without an id a generated one, in document order
pub fn fill_missing_ids(mut people: Vec<Person>, now: DateTime<Utc>) -> Vec<Person> {
    for index in 0..people.len() {
        if people[index].id.is_blank() {
            let id = next_id(people.iter().map(|p| &p.id), now);
            people[index].id = id;
        }
    }

    people
}

pub fn first_duplicate_id(people: &[Person]) -> Option<PersonId> {
    let mut seen = HashSet::new();

    people
        .iter()
        .find(|p| !seen.insert(p.id.as_str()))
        .map(|p| p.id.clone())
}
