//! Game state and logic module
//!
//! This module contains the data the automation tracks about the mine:
//! areas, variants, manager boosts, and the bonus timer.

pub mod area;
pub mod bonus;
pub mod manager;
pub mod roster;
pub mod state;

pub use area::{Area, GameVariant, MaxedFlags};
pub use bonus::BonusTracker;
pub use manager::{ManagerState, Managers, NO_MANAGER_BACKOFF};
pub use state::MineState;
