//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; restarting resets it in
//! place.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::clamp;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start input
    NotStarted,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Jumped,
    Scored { points: u64 },
    ShieldLost { remaining: u8 },
    ShieldGained { shield: u8 },
    HeartSpawned,
    Paused,
    Resumed,
    GameOver { score: u64 },
    Restarted,
}

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Events waiting for the shell, oldest first
///
/// Bounded: a caller that never drains loses the oldest events instead of
/// growing the queue forever.
#[derive(Debug, Clone, Default)]
pub struct EventQueue(VecDeque<GameEvent>);

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        if self.0.len() == MAX_PENDING_EVENTS {
            self.0.pop_front();
        }
        self.0.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.0.drain(..).collect()
    }
}

/// The player-controlled character
///
/// Only `y` moves; `x` stays at the view's horizontal centre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    /// Vertical speed, positive is downward
    pub speed: f32,
    pub size: Vec2,
    pub hitbox_shrink: Vec2,
    pub max_fall_speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
}

impl Actor {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.view_width / 2.0, tuning.view_height / 2.0),
            speed: 0.0,
            size: Vec2::new(tuning.actor_width, tuning.actor_height),
            hitbox_shrink: Vec2::new(tuning.hitbox_shrink_x, tuning.hitbox_shrink_y),
            max_fall_speed: tuning.max_fall_speed,
            jump_impulse: tuning.jump_impulse,
            gravity: tuning.gravity,
        }
    }

    /// Integrate one tick of gravity and keep the actor on screen
    pub fn tick(&mut self, view_height: f32) {
        self.speed = clamp(
            self.speed + self.gravity,
            self.max_fall_speed,
            MIN_SPEED_SENTINEL,
        );
        self.pos.y = clamp(
            self.pos.y + self.speed,
            VIEW_EDGE_MARGIN,
            view_height - VIEW_EDGE_MARGIN,
        );
    }

    /// No cooldown or ground check
    pub fn jump(&mut self) {
        self.speed = -self.jump_impulse;
    }

    /// Visual bounds
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Forgiving collision box used against pipes
    pub fn hitbox(&self) -> Rect {
        self.bounds()
            .shrink(self.hitbox_shrink.x, self.hitbox_shrink.y)
    }

    /// Place back at the vertical centre, at rest
    pub fn reset(&mut self, view_height: f32) {
        self.pos.y = view_height / 2.0;
        self.speed = 0.0;
    }
}

/// A top/bottom pipe pair with a gap around `pos.y`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub pos: Vec2,
    pub width: f32,
    /// Length of each segment
    pub length: f32,
    /// Distance from `pos.y` to each segment's inner edge
    pub gap_half: f32,
    /// Already scored or already did damage during this pass
    pub resolved: bool,
    /// 1.0 when intact, lowered after hitting the actor
    pub alpha: f32,
}

impl Pipe {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            width: tuning.pipe_width,
            length: tuning.pipe_length,
            gap_half: tuning.pipe_gap_half,
            resolved: false,
            alpha: 1.0,
        }
    }

    pub fn advance(&mut self, scroll_speed: f32) {
        self.pos.x -= scroll_speed;
    }

    /// Send the pipe back to the right edge once it has left the screen.
    ///
    /// Returns true when it wrapped.
    pub fn wrap_if_needed<R: Rng>(&mut self, view_width: f32, y_range: (f32, f32), rng: &mut R) -> bool {
        if self.pos.x >= PIPE_WRAP_X {
            return false;
        }
        self.reposition(view_width + PIPE_REENTRY_OFFSET, y_range, rng);
        true
    }

    /// Move to `x` with a fresh random y, ready for a new pass
    pub fn reposition<R: Rng>(&mut self, x: f32, (lo, hi): (f32, f32), rng: &mut R) {
        self.pos.x = x;
        self.pos.y = rng.random_range(lo..=hi);
        self.resolved = false;
        self.alpha = 1.0;
    }

    /// Top and bottom segment bounds
    pub fn segments(&self) -> [Rect; 2] {
        let half_w = self.width / 2.0;
        let left = self.pos.x - half_w;
        let right = self.pos.x + half_w;
        let gap_top = self.pos.y - self.gap_half;
        let gap_bottom = self.pos.y + self.gap_half;
        [
            Rect::new(left, gap_top - self.length, right, gap_top),
            Rect::new(left, gap_bottom, right, gap_bottom + self.length),
        ]
    }
}

/// The shield pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heart {
    pub pos: Vec2,
    pub size: f32,
}

impl Heart {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }

    pub fn advance(&mut self, scroll_speed: f32) {
        self.pos.x -= scroll_speed;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Hits that can still be absorbed
    pub shield: u8,
    /// Pipes passed since the last hit
    pub streak: u32,
    pub points: u64,
    /// Score frozen at game over
    pub final_score: Option<u64>,
    /// Simulation ticks while playing
    pub time_ticks: u64,
    pub actor: Actor,
    pub pipes: [Pipe; PIPE_COUNT],
    /// `None` while no heart is in play
    pub heart: Option<Heart>,
    /// Events since the last drain
    #[serde(skip)]
    pub events: EventQueue,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a game state with custom tuning
    ///
    /// `tuning` is expected to have passed [`Tuning::validate`]. A view too
    /// short for the pipe range still works: pipes then sit at the vertical
    /// centre.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let y_range = tuning.pipe_y_range();
        let pipes = tuning.pipe_start_offsets.map(|offset| {
            let mut pipe = Pipe::new(Vec2::ZERO, &tuning);
            pipe.reposition(tuning.view_width + offset, y_range, &mut rng);
            pipe
        });

        Self {
            seed,
            rng,
            actor: Actor::new(&tuning),
            shield: tuning.max_shield,
            streak: 0,
            points: 0,
            final_score: None,
            time_ticks: 0,
            phase: GamePhase::NotStarted,
            pipes,
            heart: None,
            events: EventQueue::default(),
            tuning,
        }
    }

    /// 1.0 while the world moves, 0.0 when frozen
    pub fn time_scale(&self) -> f32 {
        if self.phase == GamePhase::Playing {
            1.0
        } else {
            0.0
        }
    }

    pub fn start(&mut self) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Run started (seed {})", self.seed);
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::Resumed);
        }
    }

    /// Freeze the run and record the final score
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.final_score = Some(self.points);
        self.events.push(GameEvent::GameOver { score: self.points });
        log::info!("Game over - final score {}", self.points);
    }

    /// Reset the run in place and go straight back to playing
    pub fn restart(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        let view_width = self.tuning.view_width;
        let y_range = self.tuning.pipe_y_range();
        for (pipe, offset) in self.pipes.iter_mut().zip(self.tuning.pipe_start_offsets) {
            pipe.reposition(view_width + offset, y_range, &mut self.rng);
        }
        self.actor.reset(self.tuning.view_height);
        self.heart = None;
        self.shield = self.tuning.max_shield;
        self.streak = 0;
        self.points = 0;
        self.final_score = None;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted");
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
