//! Turns a [`GameState`] into a triangle list, back to front

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::sim::{GamePhase, GameState, Rect};

/// Height of the darker lip at each pipe mouth
const PIPE_LIP_HEIGHT: f32 = 12.0;
/// Lip overhang on each side of the pipe body
const PIPE_LIP_OVERHANG: f32 = 4.0;
const HITBOX_LINE: f32 = 2.0;

/// Build every vertex for one frame
pub fn build(state: &GameState, show_hitboxes: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(256);

    for pipe in &state.pipes {
        let body = with_alpha(colors::PIPE, pipe.alpha);
        let lip = with_alpha(colors::PIPE_LIP, pipe.alpha);
        let [top, bottom] = pipe.segments();
        vertices.extend(shapes::rect(&top, body));
        vertices.extend(shapes::rect(&bottom, body));

        let lip_left = top.left - PIPE_LIP_OVERHANG;
        let lip_right = top.right + PIPE_LIP_OVERHANG;
        let top_lip = Rect::new(lip_left, top.bottom - PIPE_LIP_HEIGHT, lip_right, top.bottom);
        let bottom_lip = Rect::new(lip_left, bottom.top, lip_right, bottom.top + PIPE_LIP_HEIGHT);
        vertices.extend(shapes::rect(&top_lip, lip));
        vertices.extend(shapes::rect(&bottom_lip, lip));
    }

    if let Some(heart) = &state.heart {
        vertices.extend(shapes::heart(heart.pos, heart.size, colors::HEART));
    }

    let actor = &state.actor;
    // Faded once the run is over
    let actor_alpha = if state.phase == GamePhase::GameOver { 0.5 } else { 1.0 };
    vertices.extend(shapes::rect(
        &actor.bounds(),
        with_alpha(colors::ACTOR, actor_alpha),
    ));
    let eye_center = actor.pos + Vec2::new(actor.size.x * 0.25, -actor.size.y * 0.15);
    vertices.extend(shapes::circle(
        eye_center,
        actor.size.y * 0.1,
        with_alpha(colors::ACTOR_EYE, actor_alpha),
        10,
    ));

    if show_hitboxes {
        for pipe in &state.pipes {
            for segment in pipe.segments() {
                vertices.extend(shapes::rect_outline(&segment, HITBOX_LINE, colors::HITBOX));
            }
        }
        if let Some(heart) = &state.heart {
            vertices.extend(shapes::rect_outline(&heart.bounds(), HITBOX_LINE, colors::HITBOX));
        }
        vertices.extend(shapes::rect_outline(&actor.hitbox(), HITBOX_LINE, colors::HITBOX));
    }

    vertices
}
