//! Axis-aligned bounding box collision
//!
//! Every collidable entity reports a screen-space rectangle; overlap is a
//! plain interval test on both axes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` centered on `center` (sprites anchored at 0.5)
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    /// Rectangle of `size` with its top-left corner at `origin`
    pub fn from_top_left(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// True iff the two rectangles overlap on both axes.
///
/// Intervals are half-open, so rectangles that merely share an edge do not
/// intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Bounding-box test between any two entities
#[inline]
pub fn collides<A: Entity + ?Sized, B: Entity + ?Sized>(a: &A, b: &B) -> bool {
    intersects(&a.bounds(), &b.bounds())
}
