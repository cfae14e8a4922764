use database::model::{person::Person, social::SocialNetwork};
use strum::IntoEnumIterator;

/// Up to two initials, `?` when the name has none
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

pub fn card(person: &Person) -> String {
    let mut lines = vec![format!(
        "[{}] {}  (ID: {})",
        initials(&person.name),
        person.name,
        person.id
    )];

    let details: Vec<String> = [
        ("Age", person.age.map(|age| age.to_string()).unwrap_or_default()),
        ("Phone", person.phone.clone()),
        ("Email", person.email.clone()),
        ("Address", person.address.clone()),
        ("Freelancer ID", person.freelancer_id.clone()),
        ("Avatar", person.avatar.clone()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("    {}: {}", label, value))
    .collect();

    lines.extend(details);

    for network in SocialNetwork::iter() {
        let link = person.social.get(network);

        if !link.is_empty() {
            lines.push(format!("    {}: {}", network, link));
        }
    }

    lines.join("\n")
}

pub fn list(people: &[Person]) -> String {
    if people.is_empty() {
        return "No people match your search.".to_string();
    }

    people.iter().map(card).collect::<Vec<_>>().join("\n\n")
}
