use crate::model::person::Person;

/// Space-joined text that a search query is matched against
pub fn haystack(person: &Person) -> String {
    let age = person.age.map(|age| age.to_string()).unwrap_or_default();

    let mut parts: Vec<&str> = vec![
        person.name.as_str(),
        age.as_str(),
        person.phone.as_str(),
        person.email.as_str(),
        person.address.as_str(),
        person.freelancer_id.as_str(),
    ];

    parts.extend(person.social.values());

    parts.join(" ").to_lowercase()
}

/// Case-insensitive substring filter. A blank query matches everyone and the input order
/// is preserved.
#[tracing::instrument(skip(people))]
pub fn search(people: &[Person], query: &str) -> Vec<Person> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return people.to_vec();
    }

    let matches: Vec<Person> = people
        .iter()
        .filter(|person| haystack(person).contains(&query))
        .cloned()
        .collect();

    log::debug!("Search {:?} matched {} of {}", query, matches.len(), people.len());

    matches
}
