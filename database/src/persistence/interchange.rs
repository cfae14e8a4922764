use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::{
    consts::consts::PersonId,
    database::table::table::{fill_missing_ids, first_duplicate_id},
    model::person::Person,
};

/// Why an import payload was rejected. Nothing is applied when any of these occur.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Paste JSON to import")]
    Empty,

    #[error("Invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Expected JSON array, or an object with a `people` array")]
    ExpectedArray,

    #[error("Entry {index} is not a valid person: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Id [{0}] appears more than once")]
    DuplicateId(PersonId),
}

/// Parses and normalizes an import payload: a top level array of people, or an object
/// carrying one under `people`.
pub fn parse_import(raw: &str, now: DateTime<Utc>) -> Result<Vec<Person>, FormatError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(FormatError::Empty);
    }

    let parsed: Value = serde_json::from_str(raw).map_err(FormatError::InvalidJson)?;

    let entries = match parsed {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("people") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(FormatError::ExpectedArray),
        },
        _ => return Err(FormatError::ExpectedArray),
    };

    let people = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(FormatError::InvalidRecord {
                    index,
                    reason: format!("expected an object, found {}", entry),
                });
            }

            serde_json::from_value::<Person>(entry).map_err(|e| FormatError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<Person>, FormatError>>()?;

    let people = fill_missing_ids(people, now);

    if let Some(id) = first_duplicate_id(&people) {
        return Err(FormatError::DuplicateId(id));
    }

    Ok(people)
}

/// Pretty printed, two space indented JSON of the collection
pub fn export(people: &[Person]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(people)
}
