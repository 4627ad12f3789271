//! Recording canvas
//!
//! Stores draw calls instead of producing pixels. Used by the headless runner
//! and by tests that inspect what a frame would show.

use super::{Canvas, Color};
use crate::sim::Rect;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillRect { rect: Rect, color: Color },
    FillText { text: String, x: f32, y: f32, size_px: u32, color: Color },
}

/// Draw calls of the most recent frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Rectangles filled with `color`, in draw order
    pub fn rects_of(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color: fill } if *fill == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Text strings, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, width: f32, height: f32) {
        // A clear starts a new frame
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect: *rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: u32, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            size_px,
            color,
        });
    }
}
