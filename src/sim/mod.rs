//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One tick per display frame
//! - Seeded RNG only
//! - Fixed entity set (two pipes, at most one heart)

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{PipeSegment, heart_collision, pipe_collision};
pub use rect::Rect;
pub use state::{Actor, EventQueue, GameEvent, GamePhase, GameState, Heart, MAX_PENDING_EVENTS, Pipe};
pub use tick::{TickInput, autopilot_wants_jump, tick};
