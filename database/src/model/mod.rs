pub mod draft;
pub mod person;
pub mod social;
