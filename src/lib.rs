//! Bigfoot Dodge - an obstacle-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game state)
//! - `game_loop`: Frame driver tying the simulation to a clock, scheduler and canvas
//! - `renderer`: 2D canvas drawing of a frame
//! - `platform`: Browser/native abstraction (time, scheduling, input)
//! - `tuning`: Data-driven game balance

pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game_loop::GameLoop;
pub use tuning::{BigfootMode, ObstacleSizing, SizeBand, Tuning, TuningError};

/// Game configuration constants (defaults for the classic preset)
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 50.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    /// Score points per +1 player speed
    pub const SPEED_STEP_SCORE: u64 = 50;

    /// Obstacles rise this many pixels per tick
    pub const OBSTACLE_RISE_RATE: f32 = 5.0;
    /// Chance per tick that a new obstacle appears
    pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.03;

    /// Bigfoot defaults
    pub const BIGFOOT_SIZE: f32 = 60.0;
    /// Where a disarmed marker waits, fully off-screen
    pub const BIGFOOT_PARK: (f32, f32) = (-100.0, -100.0);

    /// Score timing
    pub const SCORE_INTERVAL_MS: u64 = 1000;
    pub const SCORE_INCREMENT: u64 = 1;
}
