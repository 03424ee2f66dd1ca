//! Type-safe wrappers and enums for DFS players, positions and contests.

pub mod ids;
pub mod position;
pub mod site;

pub use ids::{PlayerId, RunId};
pub use position::Position;
pub use site::{Site, Sport};
