//! Collision detection and response for axis-aligned boxes
//!
//! Every actor is an axis-aligned rectangle. Overlap is the standard
//! separating-axis test on both projections; platform resolution snaps the
//! moving box to the near edge of whatever it ran into, one axis at a time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a top-left position and a size vector
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Pairwise overlap test used for every actor/actor and actor/platform check
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Outcome of resolving a vertical move against the platforms
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VerticalContact {
    /// Landed on top of a platform this pass
    pub landed: bool,
    /// Struck the underside of a platform this pass
    pub bumped: bool,
}

/// Horizontal pass: after moving by `vel_x`, push the box out of any platform
/// it now overlaps, back to the edge opposite the direction of travel.
///
/// Returns the corrected box x.
pub fn resolve_horizontal(mut body: Rect, vel_x: f32, platforms: &[Rect]) -> f32 {
    for platform in platforms {
        if !body.intersects(platform) {
            continue;
        }
        if vel_x > 0.0 {
            body.x = platform.left() - body.w;
        } else if vel_x < 0.0 {
            body.x = platform.right();
        }
    }
    body.x
}

/// Vertical pass: after moving by `vel_y`, land on (falling) or bump under
/// (rising) any platform the box now overlaps.
///
/// Returns the corrected box y and what was touched.
pub fn resolve_vertical(mut body: Rect, vel_y: f32, platforms: &[Rect]) -> (f32, VerticalContact) {
    let mut contact = VerticalContact::default();
    for platform in platforms {
        if !body.intersects(platform) {
            continue;
        }
        if vel_y > 0.0 {
            body.y = platform.top() - body.h;
            contact.landed = true;
        } else if vel_y < 0.0 {
            body.y = platform.bottom();
            contact.bumped = true;
        }
    }
    (body.y, contact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 0.0, 5.0, 5.0);

        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);

        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Same column, far below
        let b = Rect::new(2.0, 50.0, 4.0, 4.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_resolve_horizontal_moving_right() {
        let platform = Rect::new(100.0, 0.0, 50.0, 20.0);
        let body = Rect::new(95.0, 5.0, 10.0, 10.0);

        let x = resolve_horizontal(body, 5.0, &[platform]);
        assert_eq!(x, 90.0);
    }

    #[test]
    fn test_resolve_horizontal_moving_left() {
        let platform = Rect::new(100.0, 0.0, 50.0, 20.0);
        let body = Rect::new(145.0, 5.0, 10.0, 10.0);

        let x = resolve_horizontal(body, -5.0, &[platform]);
        assert_eq!(x, 150.0);
    }

    #[test]
    fn test_resolve_vertical_landing() {
        let platform = Rect::new(0.0, 100.0, 200.0, 20.0);
        let body = Rect::new(10.0, 45.0, 40.0, 60.0);

        let (y, contact) = resolve_vertical(body, 4.0, &[platform]);
        assert_eq!(y, 40.0);
        assert!(contact.landed);
        assert!(!contact.bumped);
    }

    #[test]
    fn test_resolve_vertical_bump() {
        let platform = Rect::new(0.0, 100.0, 200.0, 20.0);
        let body = Rect::new(10.0, 115.0, 40.0, 60.0);

        let (y, contact) = resolve_vertical(body, -10.0, &[platform]);
        assert_eq!(y, 120.0);
        assert!(contact.bumped);
    }

    #[test]
    fn test_resolve_without_contact_is_identity() {
        let platform = Rect::new(0.0, 100.0, 200.0, 20.0);
        let body = Rect::new(300.0, 0.0, 10.0, 10.0);

        assert_eq!(resolve_horizontal(body, 5.0, &[platform]), 300.0);
        let (y, contact) = resolve_vertical(body, 5.0, &[platform]);
        assert_eq!(y, 0.0);
        assert_eq!(contact, VerticalContact::default());
    }
}
