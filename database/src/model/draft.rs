use crate::consts::consts::PersonId;

use super::{
    person::{name_or_placeholder, Person},
    social::Social,
};

/// Unsaved form input for a person. A blank `id` asks the store to generate one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersonDraft {
    pub id: Option<String>,
    pub name: String,
    pub age: Option<u32>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub freelancer_id: String,
    pub avatar: String,
    pub social: Social,
}

impl PersonDraft {
    /// Prefills a draft from a stored person, as the edit form does
    pub fn from_person(person: &Person) -> Self {
        PersonDraft {
            id: Some(person.id.to_string()),
            name: person.name.clone(),
            age: person.age,
            phone: person.phone.clone(),
            email: person.email.clone(),
            address: person.address.clone(),
            freelancer_id: person.freelancer_id.clone(),
            avatar: person.avatar.clone(),
            social: person.social.clone(),
        }
    }

    /// The trimmed id the caller asked for, `None` when blank
    pub fn requested_id(&self) -> Option<PersonId> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(PersonId::from)
    }

    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            name: name_or_placeholder(self.name.trim().to_string()),
            age: self.age,
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            freelancer_id: self.freelancer_id.trim().to_string(),
            avatar: self.avatar.trim().to_string(),
            social: self.social.trimmed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::consts::PLACEHOLDER_NAME;

    #[test]
    fn blank_id_is_not_requested() {
        let draft = PersonDraft {
            id: Some("   ".to_string()),
            ..PersonDraft::default()
        };

        assert_eq!(draft.requested_id(), None);
    }

    #[test]
    fn into_person_trims_and_defaults_name() {
        let draft = PersonDraft {
            id: Some(" 9 ".to_string()),
            name: "  ".to_string(),
            email: " eve@example.com ".to_string(),
            ..PersonDraft::default()
        };

        let id = draft.requested_id().expect("should have an id");
        let person = draft.into_person(id);

        assert_eq!(person.id, PersonId::from("9"));
        assert_eq!(person.name, PLACEHOLDER_NAME);
        assert_eq!(person.email, "eve@example.com");
    }

    #[test]
    fn from_person_round_trips() {
        let person = Person::new_test();

        let draft = PersonDraft::from_person(&person);

        assert_eq!(draft.into_person(person.id.clone()), person);
    }
}
