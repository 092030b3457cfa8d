//! Flappy Shield - a side-scrolling flap-and-dodge game
//!
//! Core modules:
//! - `sim`: Simulation (kinematics, collisions, game state machine)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Player-facing options and config loading
//! - `audio`: Sound effects for simulation events
//! - `hud`: Which overlay and counters the page shows

pub mod audio;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (pixels)
    pub const VIEW_WIDTH: f32 = 640.0;
    pub const VIEW_HEIGHT: f32 = 480.0;

    /// Actor can't get closer than this to the top/bottom edge
    pub const VIEW_EDGE_MARGIN: f32 = 20.0;

    /// Actor kinematics (per tick)
    pub const GRAVITY: f32 = 0.2;
    pub const JUMP_IMPULSE: f32 = 8.0;
    /// Fastest downward speed
    pub const MAX_FALL_SPEED: f32 = 10.0;
    /// Upward speed is effectively unbounded
    pub const MIN_SPEED_SENTINEL: f32 = -9999.0;

    /// Actor visual size and hitbox inset (total, split across both sides)
    pub const ACTOR_WIDTH: f32 = 80.0;
    pub const ACTOR_HEIGHT: f32 = 60.0;
    pub const ACTOR_HITBOX_SHRINK_X: f32 = 30.0;
    pub const ACTOR_HITBOX_SHRINK_Y: f32 = 20.0;

    /// Pipes
    pub const PIPE_COUNT: usize = 2;
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_LENGTH: f32 = 320.0;
    /// Distance from pipe centre to each segment's inner edge
    pub const PIPE_GAP_HALF: f32 = 100.0;
    pub const PIPE_SCROLL_SPEED: f32 = 3.0;
    /// Pipe wraps once its x drops below this
    pub const PIPE_WRAP_X: f32 = -30.0;
    /// Wrapped pipes re-enter this far past the right edge
    pub const PIPE_REENTRY_OFFSET: f32 = 20.0;
    /// Random y stays this far from the top/bottom edge
    pub const PIPE_Y_MARGIN: f32 = 100.0;
    /// Initial staggered offsets past the right edge
    pub const PIPE_START_OFFSETS: [f32; PIPE_COUNT] = [300.0, 600.0];
    /// Pipe opacity after it hit the actor
    pub const PIPE_DAMAGED_ALPHA: f32 = 0.4;

    /// Shields and hearts
    pub const MAX_SHIELD: u8 = 3;
    pub const HEART_STREAK_THRESHOLD: u32 = 2;
    pub const HEART_SIZE: f32 = 30.0;
}

/// Bound `v` to the range spanned by `a` and `b`, in either order
#[inline]
pub fn clamp(v: f32, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
