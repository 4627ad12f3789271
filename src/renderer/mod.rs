//! 2D canvas rendering
//!
//! The game only ever fills rectangles and draws text. A [`Canvas`] is anything
//! that can do both: the browser's 2D context, or a [`DrawList`] that records
//! the calls for tests and headless runs.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use crate::sim::{GamePhase, GameState, Rect};

/// A CSS color name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(&'static str);

impl Color {
    pub const RED: Color = Color("red");
    pub const GREEN: Color = Color("green");
    pub const BLUE: Color = Color("blue");
    pub const BLACK: Color = Color("black");

    pub fn css(&self) -> &'static str {
        self.0
    }
}

pub const PLAYER_COLOR: Color = Color::RED;
pub const OBSTACLE_COLOR: Color = Color::GREEN;
pub const BIGFOOT_COLOR: Color = Color::BLUE;
pub const TEXT_COLOR: Color = Color::BLACK;

pub const GAME_OVER_TEXT: &str = "Game Over";
pub const RESTART_TEXT: &str = "Press R to Restart";

/// Font sizes (px)
const SCORE_FONT: u32 = 20;
const BANNER_FONT: u32 = 48;

/// Drawing surface
pub trait Canvas {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, rect: &Rect, color: Color);
    /// Draw text with its baseline starting at (x, y)
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: u32, color: Color);
}

pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

/// Draw one frame: entities and score, plus the banner once the run is over
pub fn draw_frame(state: &GameState, canvas: &mut impl Canvas) {
    let bounds = state.bounds();
    canvas.clear(bounds.x, bounds.y);

    canvas.fill_rect(&state.player.rect, PLAYER_COLOR);
    for obstacle in &state.obstacles {
        canvas.fill_rect(&obstacle.rect, OBSTACLE_COLOR);
    }
    if state.bigfoot.is_active() {
        canvas.fill_rect(&state.bigfoot.rect, BIGFOOT_COLOR);
    }

    canvas.fill_text(&score_text(state.score), 10.0, 30.0, SCORE_FONT, TEXT_COLOR);

    if state.phase == GamePhase::Over {
        draw_game_over(bounds.x, bounds.y, canvas);
    }
}

fn draw_game_over(width: f32, height: f32, canvas: &mut impl Canvas) {
    let (cx, cy) = (width / 2.0, height / 2.0);
    canvas.fill_text(GAME_OVER_TEXT, cx - 100.0, cy, BANNER_FONT, TEXT_COLOR);
    canvas.fill_text(RESTART_TEXT, cx - 150.0, cy + 50.0, BANNER_FONT, TEXT_COLOR);
}
