pub mod core;
pub mod query;
