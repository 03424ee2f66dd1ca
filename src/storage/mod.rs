//! Storage layer for generated lineups
//!
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Saving and reading back runs

pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

pub use models::*;
pub use schema::LineupDatabase;
