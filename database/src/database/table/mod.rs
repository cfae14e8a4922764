pub mod id;
pub mod query;
pub mod table;
