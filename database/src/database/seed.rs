use crate::{consts::consts::PersonId, model::person::Person};

struct SeedPerson {
    id: &'static str,
    name: &'static str,
    age: u32,
    phone: &'static str,
    email: &'static str,
    address: &'static str,
    freelancer_id: &'static str,
}

const SEED: [SeedPerson; 5] = [
    SeedPerson {
        id: "1",
        name: "Alice Johnson",
        age: 29,
        phone: "555-0123",
        email: "alice.j@example.com",
        address: "12 Oak Street, Springfield",
        freelancer_id: "AJ-1001",
    },
    SeedPerson {
        id: "2",
        name: "Bob Smith",
        age: 42,
        phone: "555-0456",
        email: "bob.smith@example.com",
        address: "7 Pine Ave, Lakeview",
        freelancer_id: "BS-2002",
    },
    SeedPerson {
        id: "3",
        name: "Carla Gomez",
        age: 35,
        phone: "555-0789",
        email: "carla.g@example.com",
        address: "200 Market St, Riverside",
        freelancer_id: "CG-3003",
    },
    SeedPerson {
        id: "4",
        name: "David Lee",
        age: 22,
        phone: "555-1011",
        email: "dlee@example.com",
        address: "44 Elm Rd, Hilltown",
        freelancer_id: "DL-4004",
    },
    SeedPerson {
        id: "5",
        name: "Eve Martinez",
        age: 31,
        phone: "555-1213",
        email: "eve.m@example.com",
        address: "18 Maple Blvd, Brookside",
        freelancer_id: "EM-5005",
    },
];

/// Built-in collection used when nothing usable is persisted yet
pub fn default_people() -> Vec<Person> {
    SEED.iter()
        .map(|seed| Person {
            age: Some(seed.age),
            phone: seed.phone.to_string(),
            email: seed.email.to_string(),
            address: seed.address.to_string(),
            freelancer_id: seed.freelancer_id.to_string(),
            ..Person::new(PersonId::from(seed.id), seed.name.to_string())
        })
        .collect()
}
