//! Axis-aligned rectangles in screen space (y grows downward)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// True iff the open interiors intersect.
    ///
    /// Rectangles that only share an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let rightmost_left = self.left.max(other.left);
        let leftmost_right = self.right.min(other.right);
        if leftmost_right <= rightmost_left {
            return false;
        }

        let bottommost_top = self.top.max(other.top);
        let topmost_bottom = self.bottom.min(other.bottom);
        topmost_bottom > bottommost_top
    }

    /// Inset by `dx / 2` horizontally and `dy / 2` vertically on each side
    pub fn shrink(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(
            self.left + dx * 0.5,
            self.top + dy * 0.5,
            self.right - dx * 0.5,
            self.bottom - dy * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..300.0, 0.0f32..300.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        let c = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        // Containment counts
        assert!(a.overlaps(&Rect::new(2.0, 2.0, 3.0, 3.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 20.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn test_zero_area_rect_never_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let line = Rect::new(5.0, 0.0, 5.0, 10.0);
        assert!(!a.overlaps(&line));
        assert!(!line.overlaps(&line));
    }

    #[test]
    fn test_overlap_uses_left_edge_on_both_sides() {
        // Only the x-ranges differ in ordering here; a correct test must not
        // mix up a.top for a.left when b is further left.
        let a = Rect::new(50.0, 0.0, 60.0, 100.0);
        let b = Rect::new(0.0, 0.0, 40.0, 100.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_shrink() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(60.0, 50.0));
        let s = r.shrink(20.0, 16.0);
        assert_eq!(s, Rect::new(80.0, 33.0, 120.0, 67.0));
        assert_eq!(s.center(), r.center());
        assert_eq!(s.width(), 40.0);
        assert_eq!(s.height(), 34.0);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn edge_adjacent_never_overlaps(a in rect_strategy(), w in 0.0f32..100.0) {
            let right_neighbour = Rect::new(a.right, a.top, a.right + w, a.bottom);
            let below_neighbour = Rect::new(a.left, a.bottom, a.right, a.bottom + w);
            prop_assert!(!a.overlaps(&right_neighbour));
            prop_assert!(!a.overlaps(&below_neighbour));
        }
    }
}
