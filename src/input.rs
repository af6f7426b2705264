//! Player intent from keyboard and pointer
//!
//! The host's event callbacks feed [`InputEvent`]s in; the simulation reads
//! [`InputState`] once per step. Pointer moves are the exception: they place
//! the paddle directly, bypassing velocity, the moment they arrive.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, reset_game};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Restart,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "Space" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// A discrete input edge or pointer sample from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer x relative to the play surface's left edge
    PointerMove { x: f32 },
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// State updated, nothing else to do
    Handled,
    /// Event had no effect (e.g. restart while still playing)
    Ignored,
    /// Game was reset; the frame loop must be started again
    Restarted,
}

/// Held keys and the latest pointer sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Last pointer x seen, if any
    pub pointer_x: Option<f32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Restart is only honoured once the game is over.
    pub fn apply(&mut self, state: &mut GameState, event: InputEvent) -> Dispatch {
        match event {
            InputEvent::KeyDown(Key::Left) => self.left = true,
            InputEvent::KeyDown(Key::Right) => self.right = true,
            InputEvent::KeyUp(Key::Left) => self.left = false,
            InputEvent::KeyUp(Key::Right) => self.right = false,
            InputEvent::KeyDown(Key::Restart) => {
                if !state.is_game_over() {
                    return Dispatch::Ignored;
                }
                reset_game(state);
                return Dispatch::Restarted;
            }
            InputEvent::KeyUp(Key::Restart) => return Dispatch::Ignored,
            InputEvent::PointerMove { x } => {
                if !x.is_finite() {
                    return Dispatch::Ignored;
                }
                self.pointer_x = Some(x);
                let paddle = &mut state.paddle;
                let max_x = state.tuning.paddle_max_x();
                paddle.pos.x = (x - paddle.size.x / 2.0).clamp(0.0, max_x);
            }
        }
        Dispatch::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_code("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_code("Space"), Some(Key::Restart));
        assert_eq!(Key::from_code("KeyQ"), None);
        assert_eq!(Key::from_code(""), None);
    }

    #[test]
    fn test_key_edges() {
        let mut state = GameState::default();
        let mut input = InputState::new();

        input.apply(&mut state, InputEvent::KeyDown(Key::Left));
        input.apply(&mut state, InputEvent::KeyDown(Key::Right));
        assert!(input.left && input.right);

        input.apply(&mut state, InputEvent::KeyUp(Key::Left));
        assert!(!input.left && input.right);
        input.apply(&mut state, InputEvent::KeyUp(Key::Right));
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_pointer_centres_paddle() {
        let mut state = GameState::default();
        let mut input = InputState::new();

        let result = input.apply(&mut state, InputEvent::PointerMove { x: 100.0 });
        assert_eq!(result, Dispatch::Handled);
        assert_eq!(state.paddle.pos.x, 60.0);
        assert_eq!(input.pointer_x, Some(100.0));
        // Velocity untouched
        assert_eq!(state.paddle.vel_x, crate::consts::PADDLE_START_VELOCITY);
    }

    #[test]
    fn test_pointer_clamped_to_field() {
        let mut state = GameState::default();
        let mut input = InputState::new();

        input.apply(&mut state, InputEvent::PointerMove { x: -300.0 });
        assert_eq!(state.paddle.pos.x, 0.0);

        input.apply(&mut state, InputEvent::PointerMove { x: 10_000.0 });
        assert_eq!(state.paddle.pos.x, 420.0);

        input.apply(&mut state, InputEvent::PointerMove { x: 495.0 });
        assert_eq!(state.paddle.pos.x, 420.0);
    }

    #[test]
    fn test_pointer_nan_ignored() {
        let mut state = GameState::default();
        let mut input = InputState::new();
        let result = input.apply(&mut state, InputEvent::PointerMove { x: f32::NAN });
        assert_eq!(result, Dispatch::Ignored);
        assert_eq!(state.paddle.pos.x, 210.0);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut state = GameState::default();
        let mut input = InputState::new();
        state.score = 500;

        let result = input.apply(&mut state, InputEvent::KeyDown(Key::Restart));
        assert_eq!(result, Dispatch::Ignored);
        assert_eq!(state.score, 500);

        state.phase = GamePhase::GameOver;
        let result = input.apply(&mut state, InputEvent::KeyDown(Key::Restart));
        assert_eq!(result, Dispatch::Restarted);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }
}
