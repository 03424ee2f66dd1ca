//! DFS domain model: players, rosters, constraints and the request contract.

pub mod constraints;
pub mod pool;
pub mod request;
pub mod roster;
pub mod types;

pub use constraints::ConstraintSet;
pub use pool::PlayerPool;
pub use request::{optimize, optimize_many, OptimizeRequest, OptimizeResponse};
pub use roster::{RosterSettings, RosterSlot};
pub use types::{value_per_thousand, Lineup, LineupBatch, LineupEntry, Player, PlayerRecord, SolveStatus};
