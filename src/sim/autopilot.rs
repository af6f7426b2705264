//! Idle/demo mode - the computer holds the arrow keys
//!
//! Produces key intent only, so the paddle still goes through the normal
//! acceleration model and bound checks.

use super::state::GameState;
use crate::input::InputState;

/// Frames of ball travel to lead the target by
const LOOKAHEAD_FRAMES: f32 = 8.0;
/// Half-width of the zone where the paddle coasts instead of steering
const DEAD_ZONE: f32 = 6.0;

/// Steer the paddle centre toward where the ball is about to be
pub fn autopilot(state: &GameState) -> InputState {
    let ball = &state.ball;
    let lead = ball.vel.x * state.speed_multiplier * LOOKAHEAD_FRAMES;
    let target = (ball.center().x + lead).clamp(0.0, state.tuning.field_width);

    // Account for current momentum so the paddle doesn't overshoot
    let offset = target - (state.paddle.center_x() + state.paddle.vel_x);

    InputState {
        left: offset < -DEAD_ZONE,
        right: offset > DEAD_ZONE,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::step;
    use glam::Vec2;

    #[test]
    fn test_steers_toward_ball() {
        let mut state = GameState::default();
        state.paddle.vel_x = 0.0;

        state.ball.pos = Vec2::new(20.0, 300.0);
        state.ball.vel = Vec2::new(0.0, 2.0);
        let input = autopilot(&state);
        assert!(input.left && !input.right);

        state.ball.pos = Vec2::new(470.0, 300.0);
        let input = autopilot(&state);
        assert!(input.right && !input.left);
    }

    #[test]
    fn test_coasts_when_aligned() {
        let mut state = GameState::default();
        state.paddle.vel_x = 0.0;
        state.ball.pos = Vec2::new(245.0, 300.0);
        state.ball.vel = Vec2::new(0.0, 2.0);
        let input = autopilot(&state);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_autopilot_keeps_ball_alive() {
        let mut state = GameState::default();
        let dt = 1.0 / 60.0;
        // Several full crossings of the field
        for _ in 0..3_000 {
            let input = autopilot(&state);
            step(&mut state, &input, dt);
        }
        assert!(!state.is_game_over(), "autopilot lost at score {}", state.score);
        assert!(state.score > 0);
    }
}
