//! HUD state derived from the game, independent of the DOM
//!
//! The page shows and hides elements by toggling only their `hidden` class,
//! so layout classes such as `panel` survive every toggle.

use crate::sim::{GamePhase, GameState};

/// Class toggled on every HUD element; the only class the game touches
pub const HIDDEN_CLASS: &str = "hidden";

pub const START_PROMPT: &str = "start-prompt";
pub const PAUSE_MENU: &str = "pause-menu";
pub const GAME_OVER: &str = "game-over";
pub const PAUSE_BUTTON: &str = "pause-btn";
pub const AUTOPILOT_BADGE: &str = "hud-autopilot";

/// Overlays that cover the playfield
pub const OVERLAYS: [&str; 3] = [START_PROMPT, PAUSE_MENU, GAME_OVER];

/// Which HUD elements are visible for this frame
pub fn visibility(state: &GameState, autopilot: bool) -> [(&'static str, bool); 5] {
    let phase = state.phase;
    [
        (START_PROMPT, phase == GamePhase::NotStarted),
        (PAUSE_MENU, phase == GamePhase::Paused),
        (GAME_OVER, phase == GamePhase::GameOver),
        (PAUSE_BUTTON, phase == GamePhase::Playing),
        (AUTOPILOT_BADGE, autopilot),
    ]
}

/// One heart glyph per remaining shield
pub fn shield_text(shield: u8) -> String {
    "\u{2665}".repeat(shield as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = include_str!("../index.html");

    /// Class attribute of the element with `id` in the page
    fn class_of(id: &str) -> Option<&'static str> {
        let start = PAGE.find(&format!("id=\"{id}\""))?;
        let tag_end = start + PAGE[start..].find('>')?;
        let tag = &PAGE[start..tag_end];
        let class_start = tag.find("class=\"")? + "class=\"".len();
        let class_len = tag[class_start..].find('"')?;
        Some(&PAGE[start + class_start..start + class_start + class_len])
    }

    #[test]
    fn test_one_overlay_per_phase() {
        let mut state = GameState::new(1);
        let shown = |state: &GameState| {
            visibility(state, false)
                .into_iter()
                .filter(|(id, on)| *on && OVERLAYS.contains(id))
                .map(|(id, _)| id)
                .collect::<Vec<_>>()
        };
        assert_eq!(shown(&state), vec![START_PROMPT]);

        state.start();
        assert!(shown(&state).is_empty());
        assert!(visibility(&state, false).contains(&(PAUSE_BUTTON, true)));

        state.pause();
        assert_eq!(shown(&state), vec![PAUSE_MENU]);

        state.resume();
        state.game_over();
        assert_eq!(shown(&state), vec![GAME_OVER]);
    }

    #[test]
    fn test_autopilot_badge_follows_flag() {
        let state = GameState::new(1);
        assert!(visibility(&state, true).contains(&(AUTOPILOT_BADGE, true)));
        assert!(visibility(&state, false).contains(&(AUTOPILOT_BADGE, false)));
    }

    #[test]
    fn test_page_has_every_toggled_element() {
        let state = GameState::new(1);
        for (id, _) in visibility(&state, false) {
            let class = class_of(id).unwrap_or_else(|| panic!("#{id} missing or unclassed"));
            assert!(class.split_whitespace().any(|c| c == HIDDEN_CLASS), "#{id}: {class}");
        }
    }

    #[test]
    fn test_overlays_keep_layout_class_when_shown() {
        for id in OVERLAYS {
            let class = class_of(id).unwrap_or_else(|| panic!("#{id} missing"));
            let shown: Vec<_> = class
                .split_whitespace()
                .filter(|c| *c != HIDDEN_CLASS)
                .collect();
            assert_eq!(shown, vec!["panel"], "#{id}");
        }
    }

    #[test]
    fn test_shield_text() {
        assert_eq!(shield_text(0), "");
        assert_eq!(shield_text(3).chars().count(), 3);
    }
}
