//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time is passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Hazard, aabb_overlap};
pub use rect::Rect;
pub use state::{
    Bigfoot, BigfootBehavior, Direction, GameEvent, GamePhase, GameState, MoveIntent, Obstacle,
    Player,
};
pub use tick::{spawn_obstacle, tick};
