//! Collision tests between the actor and the scrolling entities

use super::rect::Rect;
use super::state::{Heart, Pipe};

/// Which half of a pipe pair was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeSegment {
    Top,
    Bottom,
}

/// Check the actor's hitbox against both segments of a pipe pair
pub fn pipe_collision(actor_hitbox: &Rect, pipe: &Pipe) -> Option<PipeSegment> {
    let [top, bottom] = pipe.segments();
    if actor_hitbox.overlaps(&top) {
        Some(PipeSegment::Top)
    } else if actor_hitbox.overlaps(&bottom) {
        Some(PipeSegment::Bottom)
    } else {
        None
    }
}

/// Hearts are tested against the full (unshrunk) actor bounds
pub fn heart_collision(actor_bounds: &Rect, heart: &Heart) -> bool {
    actor_bounds.overlaps(&heart.bounds())
}
