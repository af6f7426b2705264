//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one host frame.

use super::collision::{HitAxis, hit_axis, overlaps};
use super::level::advance_level;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::REFERENCE_FPS;
use crate::input::InputState;

/// Advance the game by one frame of `elapsed_secs` wall-clock time.
///
/// Does nothing once the game is over. Order matters and mirrors the arcade
/// original: paddle, ball integration, paddle bounce, wall bounce, loss check,
/// blocks, level completion.
pub fn step(state: &mut GameState, input: &InputState, elapsed_secs: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.events.clear();

    update_paddle(state, input);

    // Velocities are per reference frame; scale to real elapsed time
    let scale = elapsed_secs * REFERENCE_FPS * state.speed_multiplier;
    state.ball.pos += state.ball.vel * scale;

    let ball = state.ball.rect();
    match hit_axis(&ball, &state.paddle.rect()) {
        Some(HitAxis::Vertical) => {
            state.ball.vel.y = -state.ball.vel.y;
            state.events.push(GameEvent::PaddleHit);
        }
        Some(HitAxis::Horizontal) => {
            state.ball.vel.x = -state.ball.vel.x;
            state.events.push(GameEvent::PaddleHit);
        }
        None => {}
    }

    // Walls: at most one flip per axis
    let field = state.field();
    let mut bounced = false;
    if ball.top() <= 0.0 || ball.bottom() >= field.bottom() {
        state.ball.vel.y = -state.ball.vel.y;
        bounced = true;
    }
    if ball.left() <= 0.0 || ball.right() >= field.right() {
        state.ball.vel.x = -state.ball.vel.x;
        bounced = true;
    }
    if bounced {
        state.events.push(GameEvent::WallBounce);
    }

    // The floor bounce above has already flipped vy; the game still ends
    if ball.bottom() >= field.bottom() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: score {} at level {}", state.score, state.level);
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        return;
    }

    // Every standing block tests the same ball rectangle, so two blocks can
    // fall in one frame (each flipping vy)
    let per_block = state.tuning.score_per_block;
    for (index, block) in state.grid.blocks.iter_mut().enumerate() {
        if block.broken || !overlaps(&ball, &block.rect) {
            continue;
        }
        block.broken = true;
        state.ball.vel.y = -state.ball.vel.y;
        state.score += per_block;
        state.grid.live -= 1;
        state.events.push(GameEvent::BlockDestroyed {
            index,
            score: state.score,
        });
    }

    if state.grid.is_cleared() {
        advance_level(state);
    }
}

/// Keyboard-driven paddle motion (per frame, not scaled by elapsed time).
///
/// A held direction accelerates toward max speed only if the resulting
/// position stays inside the field; otherwise (or with no input) friction
/// bleeds off velocity and the paddle stays put.
fn update_paddle(state: &mut GameState, input: &InputState) {
    let tuning = &state.tuning;
    let paddle = &mut state.paddle;
    let max_x = tuning.paddle_max_x();
    let in_bounds = |x: f32| (0.0..=max_x).contains(&x);

    if input.left {
        let vel = (paddle.vel_x - tuning.paddle_acceleration).max(-tuning.paddle_max_speed);
        if in_bounds(paddle.pos.x + vel) {
            paddle.vel_x = vel;
            paddle.pos.x += vel;
            return;
        }
    }
    if input.right {
        let vel = (paddle.vel_x + tuning.paddle_acceleration).min(tuning.paddle_max_speed);
        if in_bounds(paddle.pos.x + vel) {
            paddle.vel_x = vel;
            paddle.pos.x += vel;
            return;
        }
    }
    paddle.vel_x *= tuning.paddle_friction;
}
