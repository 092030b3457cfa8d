//! Data-driven game balance
//!
//! Every field defaults to the constant in [`crate::consts`], so a partial
//! JSON object only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::SettingsError;

/// Gameplay numbers for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Logical playfield size
    pub view_width: f32,
    pub view_height: f32,

    /// Actor kinematics, per tick
    pub gravity: f32,
    pub jump_impulse: f32,
    pub max_fall_speed: f32,

    pub actor_width: f32,
    pub actor_height: f32,
    pub hitbox_shrink_x: f32,
    pub hitbox_shrink_y: f32,

    pub scroll_speed: f32,
    pub pipe_width: f32,
    pub pipe_length: f32,
    pub pipe_gap_half: f32,
    pub pipe_start_offsets: [f32; PIPE_COUNT],
    pub damaged_alpha: f32,

    pub max_shield: u8,
    pub heart_streak_threshold: u32,
    pub heart_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            max_fall_speed: MAX_FALL_SPEED,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            hitbox_shrink_x: ACTOR_HITBOX_SHRINK_X,
            hitbox_shrink_y: ACTOR_HITBOX_SHRINK_Y,
            scroll_speed: PIPE_SCROLL_SPEED,
            pipe_width: PIPE_WIDTH,
            pipe_length: PIPE_LENGTH,
            pipe_gap_half: PIPE_GAP_HALF,
            pipe_start_offsets: PIPE_START_OFFSETS,
            damaged_alpha: PIPE_DAMAGED_ALPHA,
            max_shield: MAX_SHIELD,
            heart_streak_threshold: HEART_STREAK_THRESHOLD,
            heart_size: HEART_SIZE,
        }
    }
}

impl Tuning {
    /// Pipe x below which the pipe counts as passed
    pub fn pass_line(&self) -> f32 {
        self.view_width / 2.0 - self.actor_width / 2.0
    }

    /// Range of pipe centre y values, symmetric around the view centre
    ///
    /// Collapses to the centre when the view is shorter than both margins.
    pub fn pipe_y_range(&self) -> (f32, f32) {
        let half = self.view_height / 2.0;
        let spread = (half - PIPE_Y_MARGIN).max(0.0);
        (half - spread, half + spread)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("view_width", self.view_width),
            ("view_height", self.view_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("pipe_width", self.pipe_width),
            ("pipe_length", self.pipe_length),
            ("heart_size", self.heart_size),
            ("jump_impulse", self.jump_impulse),
            ("max_fall_speed", self.max_fall_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::invalid(field, format!("must be positive, got {value}")));
            }
        }

        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(SettingsError::invalid("gravity", "must be non-negative"));
        }
        if !self.scroll_speed.is_finite() || self.scroll_speed <= 0.0 {
            return Err(SettingsError::invalid("scroll_speed", "must be positive"));
        }
        if self.view_height <= 2.0 * PIPE_Y_MARGIN {
            return Err(SettingsError::invalid(
                "view_height",
                format!("must exceed {} to fit the pipe range", 2.0 * PIPE_Y_MARGIN),
            ));
        }
        if self.hitbox_shrink_x < 0.0
            || self.hitbox_shrink_y < 0.0
            || self.hitbox_shrink_x >= self.actor_width
            || self.hitbox_shrink_y >= self.actor_height
        {
            return Err(SettingsError::invalid(
                "hitbox_shrink",
                "must be non-negative and smaller than the actor",
            ));
        }
        if !(0.0..=1.0).contains(&self.damaged_alpha) {
            return Err(SettingsError::invalid("damaged_alpha", "must be within 0..=1"));
        }
        if self.max_shield == 0 {
            return Err(SettingsError::invalid("max_shield", "must be at least 1"));
        }
        if self.pipe_start_offsets.iter().any(|o| *o < 0.0) {
            return Err(SettingsError::invalid(
                "pipe_start_offsets",
                "pipes must start off-screen",
            ));
        }
        Ok(())
    }
}
