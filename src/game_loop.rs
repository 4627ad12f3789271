//! Frame driver
//!
//! Owns the game state and ties it to an injectable clock and frame scheduler.
//! Each scheduled frame ticks the simulation (while running), draws, and asks
//! for the next frame. Game over stops the requests; restart re-arms them.

use crate::platform::{Clock, FrameScheduler, Key, ManualClock};
use crate::renderer::{Canvas, draw_frame};
use crate::sim::{GameEvent, GameState, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct GameLoop<C: Clock, S: FrameScheduler> {
    state: GameState,
    clock: C,
    scheduler: S,
    /// A frame has been requested and not yet run
    frame_pending: bool,
    frames: u64,
}

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    pub frames: u64,
    pub elapsed_ms: u64,
    pub game_over: bool,
}

impl<C: Clock, S: FrameScheduler> GameLoop<C, S> {
    /// Create a running game and request its first frame
    pub fn new(seed: u64, tuning: Tuning, clock: C, scheduler: S) -> Self {
        let state = GameState::new(seed, tuning, clock.now_ms());
        log::info!(
            "Game initialized with seed: {} (bigfoot: {})",
            seed,
            state.tuning.bigfoot_mode.as_str()
        );

        let mut game = Self {
            state,
            clock,
            scheduler,
            frame_pending: false,
            frames: 0,
        };
        game.schedule();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Move(dir) => self.state.player.intent.set(dir, true),
            Key::Restart => self.restart(),
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if let Key::Move(dir) = key {
            self.state.player.intent.set(dir, false);
        }
    }

    /// Reset everything and resume the frame loop
    pub fn restart(&mut self) {
        self.state.reset(self.clock.now_ms());
        self.log_events();
        self.schedule();
    }

    /// Run one scheduled frame
    pub fn frame(&mut self, canvas: &mut impl Canvas) {
        self.frame_pending = false;
        self.frames += 1;

        if self.state.is_running() {
            tick(&mut self.state, self.clock.now_ms());
        }
        self.log_events();

        draw_frame(&self.state, canvas);

        if self.state.is_running() {
            self.schedule();
        }
    }

    /// Run a frame if the scheduler has one outstanding
    pub fn pump(&mut self, canvas: &mut impl Canvas) -> bool {
        if !self.scheduler.take_request() {
            return false;
        }
        self.frame(canvas);
        true
    }

    /// Request a frame unless one is already on its way, so a restart during
    /// play never starts a second loop.
    fn schedule(&mut self) {
        if !self.frame_pending {
            self.frame_pending = true;
            self.scheduler.request_frame();
        }
    }

    fn log_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::GameOver { score } => log::info!("Game over! Final score: {}", score),
                GameEvent::Restarted => log::info!("Game restarted"),
                GameEvent::SpeedIncreased { speed } => log::info!("Player speed up: {}", speed),
                GameEvent::Collision { hazard } => log::debug!("Collision with {:?}", hazard),
                GameEvent::ScoreIncreased { .. } | GameEvent::ObstacleSpawned { .. } => {
                    log::trace!("{:?}", event)
                }
            }
        }
    }
}

impl<S: FrameScheduler> GameLoop<ManualClock, S> {
    /// Drive the loop with simulated time: advance `step_ms` per frame until
    /// the loop stops asking for frames or `max_ms` has passed.
    pub fn run_headless(
        &mut self,
        step_ms: u64,
        max_ms: u64,
        canvas: &mut impl Canvas,
    ) -> RunSummary {
        let start = self.clock.now_ms();
        let start_frames = self.frames;

        while self.clock.now_ms() - start < max_ms {
            self.clock.advance(step_ms);
            if !self.pump(canvas) {
                break;
            }
        }

        RunSummary {
            score: self.state.score,
            frames: self.frames - start_frames,
            elapsed_ms: self.clock.now_ms() - start,
            game_over: !self.state.is_running(),
        }
    }
}
