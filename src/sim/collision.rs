//! Axis-aligned rectangle overlap and hit-face tests
//!
//! Everything in the playfield is a rectangle in screen space (y grows down).
//! The directional predicates only mean something when the rectangles overlap,
//! and they deliberately overlap each other: a corner contact satisfies both a
//! vertical and a horizontal test. Callers resolve that by checking the
//! vertical pair first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict overlap test; rectangles that only share an edge do not overlap
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Ball came down onto the top face of `rect`
pub fn hit_from_top(ball: &Rect, rect: &Rect) -> bool {
    overlaps(ball, rect) && ball.bottom() >= rect.top()
}

/// Ball came up into the bottom face of `rect`
pub fn hit_from_bottom(ball: &Rect, rect: &Rect) -> bool {
    overlaps(ball, rect) && rect.bottom() >= ball.top()
}

/// Ball came in from the left side of `rect`
pub fn hit_from_left(ball: &Rect, rect: &Rect) -> bool {
    overlaps(ball, rect) && ball.right() >= rect.left()
}

/// Ball came in from the right side of `rect`
pub fn hit_from_right(ball: &Rect, rect: &Rect) -> bool {
    overlaps(ball, rect) && rect.right() >= ball.left()
}

/// Which velocity axis a contact reflects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitAxis {
    Vertical,
    Horizontal,
}

/// Resolve a ball/rect contact to the axis to invert.
///
/// Top/bottom are tested before left/right, so corner hits are vertical.
pub fn hit_axis(ball: &Rect, rect: &Rect) -> Option<HitAxis> {
    if hit_from_top(ball, rect) || hit_from_bottom(ball, rect) {
        Some(HitAxis::Vertical)
    } else if hit_from_left(ball, rect) || hit_from_right(ball, rect) {
        Some(HitAxis::Horizontal)
    } else {
        None
    }
}
