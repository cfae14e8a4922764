use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::consts::{PersonId, PLACEHOLDER_NAME};

use super::social::Social;

/// A single contact entry.
///
/// Deserialization never rejects an object: scalar ids and text fields are stringified,
/// missing text fields default to empty, a blank name becomes the placeholder, an age that
/// is not a whole number is rounded or dropped and `social` is merged over the six known
/// networks. A missing id decodes to a blank `PersonId`, which the collection level
/// normalization fills in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawPerson")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub age: Option<u32>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub freelancer_id: String,
    pub avatar: String,
    pub social: Social,
}

impl Person {
    pub fn new(id: PersonId, name: String) -> Self {
        Person {
            id,
            name: name_or_placeholder(name),
            age: None,
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            freelancer_id: String::new(),
            avatar: String::new(),
            social: Social::default(),
        }
    }

    pub fn new_test() -> Self {
        Person {
            id: PersonId::from("1"),
            name: "Full Name".to_string(),
            age: Some(30),
            phone: "555-0000".to_string(),
            email: "Email".to_string(),
            address: "1 Test Street".to_string(),
            freelancer_id: "FN-0001".to_string(),
            avatar: String::new(),
            social: Social::default(),
        }
    }
}

pub(crate) fn name_or_placeholder(name: String) -> String {
    if name.trim().is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        name
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPerson {
    id: Option<Value>,
    name: Option<Value>,
    age: Option<Value>,
    phone: Option<Value>,
    email: Option<Value>,
    address: Option<Value>,
    freelancer_id: Option<Value>,
    avatar: Option<Value>,
    social: Option<Value>,
}

impl From<RawPerson> for Person {
    fn from(raw: RawPerson) -> Self {
        let social = match raw.social {
            Some(social @ Value::Object(_)) => serde_json::from_value(social).unwrap_or_default(),
            _ => Social::default(),
        };

        Person {
            id: PersonId(text_field(raw.id)),
            name: name_or_placeholder(text_field(raw.name)),
            age: age_field(raw.age),
            phone: text_field(raw.phone),
            email: text_field(raw.email),
            address: text_field(raw.address),
            freelancer_id: text_field(raw.freelancer_id),
            avatar: text_field(raw.avatar),
            social,
        }
    }
}

/// Strings are kept, `null` is empty and anything else keeps its JSON text
pub(crate) fn text_field(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

// Fractions round to the nearest year; negatives and non-numbers are dropped
fn age_field(value: Option<Value>) -> Option<u32> {
    match value? {
        Value::Number(number) => match number.as_u64() {
            Some(age) => u32::try_from(age).ok(),
            None => number.as_f64().and_then(whole_age),
        },
        Value::String(text) => {
            let text = text.trim();

            text.parse::<u32>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_age))
        }
        _ => None,
    }
}

fn whole_age(age: f64) -> Option<u32> {
    let age = age.round();

    if age.is_finite() && age >= 0.0 && age <= u32::MAX as f64 {
        Some(age as u32)
    } else {
        None
    }
}
