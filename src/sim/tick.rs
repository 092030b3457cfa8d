//! Per-frame simulation tick
//!
//! One call per display frame. Integration is per tick, not per second, so
//! game speed follows the frame rate.

use super::collision::{heart_collision, pipe_collision};
use super::state::{GameEvent, GamePhase, GameState, Heart};

/// Input commands latched since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (click/tap/space)
    pub jump: bool,
    /// Leave the title screen
    pub start: bool,
    pub pause: bool,
    pub resume: bool,
    /// Start over after game over
    pub restart: bool,
    /// Demo mode - the simulation flaps by itself
    pub autopilot: bool,
}

/// Advance the game state by one tick
///
/// Phase inputs are applied first; inputs that don't fit the current phase
/// are ignored. The world then moves only if the phase is `Playing`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::NotStarted if input.start => state.start(),
        GamePhase::Playing if input.pause => state.pause(),
        GamePhase::Paused if input.resume => state.resume(),
        GamePhase::GameOver if input.restart => state.restart(),
        _ => {}
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if input.jump || (input.autopilot && autopilot_wants_jump(state)) {
        state.actor.jump();
        state.events.push(GameEvent::Jumped);
    }

    let scroll = state.tuning.scroll_speed;
    let max_shield = state.tuning.max_shield;

    // Heart first: it may top the shield up before this tick's pipe hits
    let actor_bounds = state.actor.bounds();
    let collected = match state.heart.as_mut() {
        Some(heart) => {
            heart.advance(scroll);
            heart_collision(&actor_bounds, heart) && state.shield < max_shield
        }
        None => false,
    };
    if collected {
        state.shield += 1;
        state.heart = None;
        state.events.push(GameEvent::ShieldGained {
            shield: state.shield,
        });
        log::debug!("Heart collected, shield {}", state.shield);
    }

    let hitbox = state.actor.hitbox();
    let pass_line = state.tuning.pass_line();
    let view_width = state.tuning.view_width;
    let y_range = state.tuning.pipe_y_range();
    let mut crashed = false;

    for pipe in state.pipes.iter_mut() {
        pipe.advance(scroll);

        if pipe.wrap_if_needed(view_width, y_range, &mut state.rng)
            && state.streak >= state.tuning.heart_streak_threshold
            && state.heart.is_none()
            && state.shield < max_shield
        {
            state.heart = Some(Heart::new(pipe.pos, state.tuning.heart_size));
            state.events.push(GameEvent::HeartSpawned);
            log::debug!("Heart spawned at ({:.0}, {:.0})", pipe.pos.x, pipe.pos.y);
        }

        if pipe.resolved {
            continue;
        }

        if pipe_collision(&hitbox, pipe).is_some() {
            state.streak = 0;
            if state.shield == 0 {
                // Every pipe still gets its turn this tick; the run ends after
                crashed = true;
                continue;
            }
            state.shield -= 1;
            pipe.resolved = true;
            pipe.alpha = state.tuning.damaged_alpha;
            state.events.push(GameEvent::ShieldLost {
                remaining: state.shield,
            });
            log::debug!("Pipe hit, shield {}", state.shield);
        } else if pipe.pos.x < pass_line {
            pipe.resolved = true;
            state.streak += 1;
            state.points += 1;
            state.events.push(GameEvent::Scored {
                points: state.points,
            });
            log::debug!("Scored {} (streak {})", state.points, state.streak);
        }
    }

    if crashed {
        state.game_over();
        return;
    }

    state.actor.tick(state.tuning.view_height);
}

/// Demo-mode flap decision
///
/// Aims the jump/fall oscillation at the gap of the nearest pipe still ahead
/// of the actor, or at the view centre when none is.
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    let actor = &state.actor;
    if actor.speed < 0.0 {
        return false;
    }

    let actor_left = actor.pos.x - actor.size.x / 2.0;
    let target_y = state
        .pipes
        .iter()
        .filter(|p| !p.resolved && p.pos.x + p.width / 2.0 > actor_left)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|p| p.pos.y)
        .unwrap_or(state.tuning.view_height / 2.0);

    // Height gained by a jump before gravity turns it around
    let rise = if actor.gravity > 0.0 {
        actor.jump_impulse * actor.jump_impulse / (2.0 * actor.gravity)
    } else {
        0.0
    };

    actor.pos.y >= target_y + rise / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state.drain_events();
        state
    }

    /// Put pipe 0 where it will overlap the actor after this tick's scroll
    fn pipe_into_actor(state: &mut GameState) {
        state.pipes[0].pos = Vec2::new(state.actor.pos.x + PIPE_SCROLL_SPEED, 100.0);
    }

    #[test]
    fn test_not_started_until_start_input() {
        let mut state = GameState::new(12345);
        let before = state.pipes[0].pos;

        let input = TickInput {
            jump: true,
            pause: true,
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.pipes[0].pos, before);
        assert_eq!(state.actor.speed, 0.0);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_scale(), 1.0);
        assert_eq!(state.pipes[0].pos.x, before.x - PIPE_SCROLL_SPEED);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing(12345);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.time_scale(), 0.0);

        let frozen_actor = state.actor.pos;
        let frozen_pipes = [state.pipes[0].pos, state.pipes[1].pos];
        let frozen_ticks = state.time_ticks;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &jump);
        }
        assert_eq!(state.actor.pos, frozen_actor);
        assert_eq!([state.pipes[0].pos, state.pipes[1].pos], frozen_pipes);
        assert_eq!(state.time_ticks, frozen_ticks);
        assert_eq!(state.points, 0);

        let resume = TickInput {
            resume: true,
            ..Default::default()
        };
        tick(&mut state, &resume);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, frozen_ticks + 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Paused, GameEvent::Resumed]
        );
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let mut state = playing(1);
        state.shield = 2;
        state.streak = 0;
        pipe_into_actor(&mut state);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.shield, 1);
        assert_eq!(state.streak, 0);
        assert!(state.pipes[0].resolved);
        assert_eq!(state.pipes[0].alpha, PIPE_DAMAGED_ALPHA);
        assert!(state
            .drain_events()
            .contains(&GameEvent::ShieldLost { remaining: 1 }));

        // Same pass: no more damage, and passing it later scores nothing
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.pipes[0].pos.x < state.tuning.pass_line());
        assert_eq!(state.shield, 1);
        assert_eq!(state.points, 0);
    }

    #[test]
    fn test_heart_tops_up_before_pipe_hit() {
        let mut state = playing(1);
        state.shield = 0;
        // Both overlap the actor once this tick's scroll is applied
        state.heart = Some(Heart::new(
            state.actor.pos + Vec2::new(PIPE_SCROLL_SPEED, 0.0),
            HEART_SIZE,
        ));
        pipe_into_actor(&mut state);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.shield, 0);
        assert!(state.heart.is_none());
        assert!(state.pipes[0].resolved);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::ShieldGained { shield: 1 },
                GameEvent::ShieldLost { remaining: 0 },
            ]
        );
    }

    #[test]
    fn test_crash_still_moves_and_scores_other_pipe() {
        let mut state = playing(1);
        state.shield = 0;
        pipe_into_actor(&mut state);
        // Clear of the hitbox vertically, crosses the pass line this tick
        let pass_line = state.tuning.pass_line();
        state.pipes[1].pos = Vec2::new(pass_line + 2.0, state.actor.pos.y);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.pipes[1].pos.x, pass_line + 2.0 - PIPE_SCROLL_SPEED);
        assert!(state.pipes[1].resolved);
        assert_eq!(state.points, 1);
        assert_eq!(state.final_score, Some(1));
    }

    #[test]
    fn test_hit_resets_streak() {
        let mut state = playing(1);
        state.streak = 5;
        pipe_into_actor(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.streak, 0);
    }

    #[test]
    fn test_hit_without_shield_ends_run() {
        let mut state = playing(1);
        state.shield = 0;
        state.points = 4;
        pipe_into_actor(&mut state);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_scale(), 0.0);
        assert_eq!(state.final_score, Some(4));
        assert!(state
            .drain_events()
            .contains(&GameEvent::GameOver { score: 4 }));

        // Frozen: jumps and further ticks change nothing
        let actor = state.actor.pos;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert_eq!(state.actor.pos, actor);
        assert_eq!(state.actor.speed, 0.0);
        assert_eq!(state.points, 4);
    }

    #[test]
    fn test_streak_spawns_heart_on_wrap() {
        let mut state = playing(9);
        state.streak = 2;
        state.shield = 1;
        state.pipes[0].pos.x = PIPE_WRAP_X + 2.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes[0].pos.x, VIEW_WIDTH + PIPE_REENTRY_OFFSET);
        let heart = state.heart.as_ref().expect("heart should spawn");
        assert_eq!(heart.pos, state.pipes[0].pos);
        assert!(state.drain_events().contains(&GameEvent::HeartSpawned));
    }

    #[test]
    fn test_no_heart_below_streak_or_at_full_shield() {
        let mut state = playing(9);
        state.streak = 1;
        state.shield = 1;
        state.pipes[0].pos.x = PIPE_WRAP_X + 2.0;
        tick(&mut state, &TickInput::default());
        assert!(state.heart.is_none());

        let mut state = playing(9);
        state.streak = 2;
        state.shield = MAX_SHIELD;
        state.pipes[0].pos.x = PIPE_WRAP_X + 2.0;
        tick(&mut state, &TickInput::default());
        assert!(state.heart.is_none());
    }

    #[test]
    fn test_only_one_heart_in_play() {
        let mut state = playing(9);
        state.streak = 2;
        state.shield = 1;
        let existing = Vec2::new(600.0, 50.0);
        state.heart = Some(Heart::new(existing, HEART_SIZE));
        state.pipes[0].pos.x = PIPE_WRAP_X + 2.0;

        tick(&mut state, &TickInput::default());
        let heart = state.heart.as_ref().unwrap();
        assert_eq!(heart.pos, existing - Vec2::new(PIPE_SCROLL_SPEED, 0.0));
    }

    #[test]
    fn test_collect_heart_once() {
        let mut state = playing(3);
        state.shield = 1;
        let at_actor = state.actor.pos + Vec2::new(PIPE_SCROLL_SPEED, 0.0);
        state.heart = Some(Heart::new(at_actor, HEART_SIZE));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.shield, 2);
        assert!(state.heart.is_none());
        assert!(state
            .drain_events()
            .contains(&GameEvent::ShieldGained { shield: 2 }));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.shield, 2);
    }

    #[test]
    fn test_heart_ignored_at_full_shield() {
        let mut state = playing(3);
        let at_actor = state.actor.pos + Vec2::new(PIPE_SCROLL_SPEED, 0.0);
        state.heart = Some(Heart::new(at_actor, HEART_SIZE));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.shield, MAX_SHIELD);
        assert!(state.heart.is_some());
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = playing(5);
        state.shield = 0;
        state.points = 7;
        state.streak = 3;
        state.heart = Some(Heart::new(Vec2::new(100.0, 100.0), HEART_SIZE));
        state.actor.pos.y = 400.0;
        pipe_into_actor(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_scale(), 1.0);
        assert_eq!(state.shield, MAX_SHIELD);
        assert_eq!(state.streak, 0);
        assert_eq!(state.points, 0);
        assert_eq!(state.final_score, None);
        assert!(state.heart.is_none());
        // One tick of play has already run after the reset
        assert_eq!(state.pipes[0].pos.x, 940.0 - PIPE_SCROLL_SPEED);
        assert_eq!(state.pipes[1].pos.x, 1240.0 - PIPE_SCROLL_SPEED);
        assert!(!state.pipes[0].resolved && !state.pipes[1].resolved);
        assert_eq!(state.pipes[0].alpha, 1.0);
        assert!((state.actor.pos.y - (VIEW_HEIGHT / 2.0 + GRAVITY)).abs() < 1e-4);
    }

    #[test]
    fn test_first_pipe_scores_when_crossing_pass_line() {
        let mut state = playing(2024);
        assert_eq!(state.pipes[0].pos.x, 940.0);
        assert_eq!(state.pipes[1].pos.x, 1240.0);
        // Gap low enough for an actor resting on the floor
        state.pipes[0].pos.y = 380.0;
        state.pipes[1].pos.y = 380.0;

        let input = TickInput::default();
        for _ in 0..220 {
            tick(&mut state, &input);
        }
        assert_eq!(state.pipes[0].pos.x, 280.0);
        assert_eq!(state.points, 0);
        assert!(!state.pipes[0].resolved);

        tick(&mut state, &input);
        assert_eq!(state.points, 1);
        assert!(state.pipes[0].resolved);
        assert_eq!(state.streak, 1);
        assert_eq!(state.shield, MAX_SHIELD);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_autopilot_flaps_below_target() {
        let mut state = playing(11);
        state.pipes[0].pos.y = 240.0;
        state.pipes[1].pos.y = 240.0;

        state.actor.pos.y = 400.0;
        state.actor.speed = 1.0;
        assert!(autopilot_wants_jump(&state));

        state.actor.pos.y = 240.0;
        assert!(!autopilot_wants_jump(&state));

        // Already rising
        state.actor.pos.y = 400.0;
        state.actor.speed = -2.0;
        assert!(!autopilot_wants_jump(&state));
    }

    #[test]
    fn test_autopilot_input_jumps() {
        let mut state = playing(11);
        state.pipes[0].pos.y = 240.0;
        state.actor.pos.y = 400.0;
        state.actor.speed = 1.0;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.actor.speed < 0.0);
        assert!(state.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }
        assert_eq!(state1.points, state2.points);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.pipes[0].pos, state2.pipes[0].pos);
        assert_eq!(state1.actor.pos, state2.actor.pos);
    }
}
