//! Collision detection between axis-aligned rectangles
//!
//! Overlap is strict on all four comparisons: rectangles that only share an
//! edge do not collide.

use super::rect::Rect;

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Obstacle { id: u32 },
    Bigfoot,
}

/// Check whether two rectangles overlap
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x() < b.right() && a.right() > b.x() && a.y() < b.bottom() && a.bottom() > b.y()
}
