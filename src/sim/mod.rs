//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - State mutated only through `tick` and queued input
//! - Stable iteration order (roster order)
//! - No clock reads; elapsed time is passed in

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{enemy_hits_player, hits, overlaps_x, same_lane};
pub use input::{Direction, InputQueue};
pub use state::{Enemy, GameEvent, GameState, Player, default_roster};
pub use tick::{tick, update_player};

#[cfg(test)]
mod properties;
