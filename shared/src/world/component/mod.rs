pub mod error;
pub mod property;
pub mod property_set;
pub mod schema;
