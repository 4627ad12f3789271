//! Game state and core simulation types
//!
//! One `GameState` owns every entity for the lifetime of the program. Restart
//! resets it in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::collision::Hazard;
use crate::tuning::{BigfootMode, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    Over,
}

/// Movement direction tied to one intent flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Movement-intent flags, written by input handlers between ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn set(&mut self, dir: Direction, active: bool) {
        match dir {
            Direction::Up => self.up = active,
            Direction::Down => self.down = active,
            Direction::Left => self.left = active,
            Direction::Right => self.right = active,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Per-axis unit steps. Diagonals are not normalized, and opposing flags cancel.
    pub fn axis(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        v
    }
}

/// The player's rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub intent: MoveIntent,
    /// Pixels per tick along each active axis
    pub speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::square(tuning.player_start_x(), tuning.player_start_y, tuning.player_size),
            intent: MoveIntent::default(),
            speed: tuning.player_base_speed,
        }
    }

    /// Apply intent flags then clamp into the playfield
    pub fn step(&mut self, bounds: Vec2) {
        self.rect.pos += self.intent.axis() * self.speed;
        self.rect.clamp_within(bounds);
    }
}

/// A rising obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
}

/// Antagonist behavior and its per-variant state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BigfootBehavior {
    /// Parked until armed, then glued to the player
    Marker { armed: bool },
    /// Climbing from below; `offset` is how far under the bottom edge it reappears
    Riser { offset: f32 },
}

/// The Bigfoot antagonist
#[derive(Debug, Clone, PartialEq)]
pub struct Bigfoot {
    pub rect: Rect,
    pub behavior: BigfootBehavior,
}

impl Bigfoot {
    pub fn new(tuning: &Tuning, player: &Rect) -> Self {
        let size = tuning.bigfoot_size;
        match tuning.bigfoot_mode {
            BigfootMode::Marker => Self {
                rect: Rect::square(tuning.bigfoot_park.x, tuning.bigfoot_park.y, size),
                behavior: BigfootBehavior::Marker { armed: false },
            },
            BigfootMode::Riser => {
                let offset = tuning.riser.initial_offset;
                Self {
                    rect: Rect::square(player.x(), tuning.playfield_height + offset, size),
                    behavior: BigfootBehavior::Riser { offset },
                }
            }
        }
    }

    /// Whether it is drawn and can hit the player
    pub fn is_active(&self) -> bool {
        match self.behavior {
            BigfootBehavior::Marker { armed } => armed,
            BigfootBehavior::Riser { .. } => true,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, player: &Rect, tuning: &Tuning) {
        match self.behavior {
            BigfootBehavior::Marker { armed: true } => {
                self.rect.pos = player.pos;
            }
            BigfootBehavior::Marker { armed: false } => {
                self.rect.pos = tuning.bigfoot_park;
            }
            BigfootBehavior::Riser { .. } => {
                self.rect.pos.x = player.x();
                self.rect.pos.y -= tuning.riser.rise_rate;
                if self.rect.is_above_top() {
                    self.recycle(tuning);
                }
            }
        }
    }

    /// Arm a marker and drop it onto the player. No effect on a riser.
    pub fn arm(&mut self, player: &Rect) {
        if let BigfootBehavior::Marker { armed } = &mut self.behavior {
            *armed = true;
            self.rect.pos = player.pos;
        }
    }

    /// Send a riser back below the playfield with a shorter offset
    pub fn recycle(&mut self, tuning: &Tuning) {
        if let BigfootBehavior::Riser { offset } = &mut self.behavior {
            *offset = (*offset * tuning.riser.offset_decay).max(tuning.riser.min_offset);
            self.rect.pos.y = tuning.playfield_height + *offset;
        }
    }
}

/// Things that happened during a tick, drained by the loop driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreIncreased { score: u64 },
    SpeedIncreased { speed: f32 },
    ObstacleSpawned { id: u32, size: f32 },
    Collision { hazard: Hazard },
    GameOver { score: u64 },
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Gameplay constants for this run
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Score
    pub score: u64,
    /// Clock time (ms) the score was last advanced to
    pub last_score_ms: u64,
    /// Simulation tick counter (since last restart)
    pub time_ticks: u64,
    pub player: Player,
    /// Active obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub bigfoot: Bigfoot,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new running game
    pub fn new(seed: u64, tuning: Tuning, now_ms: u64) -> Self {
        let player = Player::new(&tuning);
        let bigfoot = Bigfoot::new(&tuning, &player.rect);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            last_score_ms: now_ms,
            time_ticks: 0,
            player,
            obstacles: Vec::new(),
            bigfoot,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Return every entity to its initial configuration, reusing allocations.
    /// The RNG stream keeps going so consecutive runs differ.
    pub fn reset(&mut self, now_ms: u64) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.last_score_ms = now_ms;
        self.time_ticks = 0;
        self.player = Player::new(&self.tuning);
        self.obstacles.clear();
        self.bigfoot = Bigfoot::new(&self.tuning, &self.player.rect);
        self.events.push(GameEvent::Restarted);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Playfield size
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.tuning.playfield_width, self.tuning.playfield_height)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
