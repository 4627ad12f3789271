//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`], so the antagonist variant and the
//! obstacle sizing can be swapped without touching the simulation. Loaded from
//! LocalStorage in the browser and from a JSON file natively.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: `{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TuningError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Which antagonist behavior the run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BigfootMode {
    /// Parked off-screen until an obstacle hit arms it, then sits on the player
    #[default]
    Marker,
    /// Climbs from below the playfield under the player, recycling at the top
    Riser,
}

impl BigfootMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BigfootMode::Marker => "marker",
            BigfootMode::Riser => "riser",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "marker" | "classic" => Some(BigfootMode::Marker),
            "riser" | "chase" => Some(BigfootMode::Riser),
            _ => None,
        }
    }
}

/// Half-open range `[min, max)` an obstacle edge length is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeBand {
    pub min: f32,
    pub max: f32,
}

impl SizeBand {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t` in `[0, 1)` onto the band
    #[inline]
    pub fn sample(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }
}

/// How obstacle sizes are chosen at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstacleSizing {
    /// Coin flip between a small and a large band
    TwoBands { small: SizeBand, large: SizeBand },
    /// One wide band
    SingleBand { band: SizeBand },
}

impl ObstacleSizing {
    /// Largest size this sizing can produce
    pub fn max_size(&self) -> f32 {
        match self {
            ObstacleSizing::TwoBands { small, large } => small.max.max(large.max),
            ObstacleSizing::SingleBand { band } => band.max,
        }
    }

    fn bands(&self) -> Vec<SizeBand> {
        match *self {
            ObstacleSizing::TwoBands { small, large } => vec![small, large],
            ObstacleSizing::SingleBand { band } => vec![band],
        }
    }
}

/// Riser antagonist parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiserTuning {
    /// Pixels climbed per tick
    pub rise_rate: f32,
    /// Distance below the bottom edge for the first appearance
    pub initial_offset: f32,
    /// Offset multiplier applied on every recycle (0-1)
    pub offset_decay: f32,
    /// Floor for the decayed offset
    pub min_offset: f32,
}

impl Default for RiserTuning {
    fn default() -> Self {
        Self {
            rise_rate: 3.0,
            initial_offset: 300.0,
            offset_decay: 0.8,
            min_offset: 0.0,
        }
    }
}

/// Complete set of gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Player ===
    pub player_size: f32,
    pub player_start_y: f32,
    pub player_base_speed: f32,
    /// Score points per +1 speed; `None` keeps speed fixed
    pub speed_step_score: Option<u64>,

    // === Obstacles ===
    pub obstacle_rise_rate: f32,
    pub obstacle_spawn_chance: f64,
    pub obstacle_sizing: ObstacleSizing,

    // === Bigfoot ===
    pub bigfoot_mode: BigfootMode,
    pub bigfoot_size: f32,
    /// Resting position of a disarmed marker
    pub bigfoot_park: Vec2,
    pub riser: RiserTuning,

    // === Score ===
    pub score_interval_ms: u64,
    pub score_increment: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl Tuning {
    /// Marker antagonist, two size bands, speed ramps with score
    pub fn classic() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            player_size: PLAYER_SIZE,
            player_start_y: PLAYER_START_Y,
            player_base_speed: PLAYER_BASE_SPEED,
            speed_step_score: Some(SPEED_STEP_SCORE),

            obstacle_rise_rate: OBSTACLE_RISE_RATE,
            obstacle_spawn_chance: OBSTACLE_SPAWN_CHANCE,
            obstacle_sizing: ObstacleSizing::TwoBands {
                small: SizeBand::new(10.0, 35.0),
                large: SizeBand::new(25.0, 75.0),
            },

            bigfoot_mode: BigfootMode::Marker,
            bigfoot_size: BIGFOOT_SIZE,
            bigfoot_park: Vec2::new(BIGFOOT_PARK.0, BIGFOOT_PARK.1),
            riser: RiserTuning::default(),

            score_interval_ms: SCORE_INTERVAL_MS,
            score_increment: SCORE_INCREMENT,
        }
    }

    /// Riser antagonist, one wide size band, fixed speed
    pub fn chase() -> Self {
        Self {
            speed_step_score: None,
            obstacle_sizing: ObstacleSizing::SingleBand {
                band: SizeBand::new(20.0, 70.0),
            },
            bigfoot_mode: BigfootMode::Riser,
            ..Self::classic()
        }
    }

    /// Preset for a mode
    pub fn for_mode(mode: BigfootMode) -> Self {
        match mode {
            BigfootMode::Marker => Self::classic(),
            BigfootMode::Riser => Self::chase(),
        }
    }

    /// Player speed at a given score
    pub fn player_speed(&self, score: u64) -> f32 {
        match self.speed_step_score {
            Some(step) if step > 0 => self.player_base_speed + (score / step) as f32,
            _ => self.player_base_speed,
        }
    }

    /// Initial player x (horizontally centered)
    pub fn player_start_x(&self) -> f32 {
        (self.playfield_width - self.player_size) / 2.0
    }

    /// Parse and validate a JSON document; missing fields take classic values
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON tuning file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot honor
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::invalid(field, format!("must be positive, got {v}")))
            }
        }

        positive("playfield_width", self.playfield_width)?;
        positive("playfield_height", self.playfield_height)?;
        positive("player_size", self.player_size)?;
        positive("bigfoot_size", self.bigfoot_size)?;

        if !(self.player_base_speed.is_finite() && self.player_base_speed >= 0.0) {
            return Err(TuningError::invalid("player_base_speed", "must be >= 0"));
        }
        if self.player_size > self.playfield_width || self.player_size > self.playfield_height {
            return Err(TuningError::invalid("player_size", "does not fit the playfield"));
        }
        if !(0.0..=self.playfield_height - self.player_size).contains(&self.player_start_y) {
            return Err(TuningError::invalid("player_start_y", "outside the playfield"));
        }
        if self.speed_step_score == Some(0) {
            return Err(TuningError::invalid("speed_step_score", "must be at least 1"));
        }

        positive("obstacle_rise_rate", self.obstacle_rise_rate)?;
        if !(0.0..=1.0).contains(&self.obstacle_spawn_chance) {
            return Err(TuningError::invalid("obstacle_spawn_chance", "must be within 0..=1"));
        }
        for band in self.obstacle_sizing.bands() {
            positive("obstacle_sizing", band.min)?;
            if band.max < band.min {
                return Err(TuningError::invalid("obstacle_sizing", "band max below min"));
            }
        }
        if self.obstacle_sizing.max_size() > self.playfield_width {
            return Err(TuningError::invalid("obstacle_sizing", "wider than the playfield"));
        }

        positive("riser.rise_rate", self.riser.rise_rate)?;
        if !(0.0..=1.0).contains(&self.riser.offset_decay) {
            return Err(TuningError::invalid("riser.offset_decay", "must be within 0..=1"));
        }
        if self.riser.min_offset < 0.0 || self.riser.initial_offset < self.riser.min_offset {
            return Err(TuningError::invalid("riser.initial_offset", "must be >= min_offset >= 0"));
        }

        if self.score_interval_ms == 0 {
            return Err(TuningError::invalid("score_interval_ms", "must be at least 1"));
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bigfoot_dodge_tuning";

    /// Environment variable naming a tuning file (native)
    pub const ENV_VAR: &'static str = "BIGFOOT_TUNING";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Load tuning from the file named by `BIGFOOT_TUNING`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => match Self::from_path(&path) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.to_string_lossy());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning file {}: {}", path.to_string_lossy(), e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
