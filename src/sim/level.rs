//! Wave layout and progression

use super::collision::Rect;
use super::state::{Ball, Block, BlockGrid, GameEvent, GamePhase, GameState, Paddle};
use crate::tuning::Tuning;

/// Lay out a `rows` x `columns` grid at the tuning's fixed pitch.
///
/// Blocks are emitted column by column, top to bottom within a column. That
/// order is the collision iteration order, so it must not change. No
/// randomness: the same arguments always produce the same grid.
pub fn create_blocks(tuning: &Tuning, rows: u32, columns: u32) -> BlockGrid {
    let (origin_x, origin_y) = tuning.block_origin;
    let pitch_x = tuning.block_width + tuning.block_gap;
    let pitch_y = tuning.block_height + tuning.block_gap;

    let mut blocks = Vec::with_capacity(rows as usize * columns as usize);
    for c in 0..columns {
        for r in 0..rows {
            blocks.push(Block {
                rect: Rect::new(
                    origin_x + c as f32 * pitch_x,
                    origin_y + r as f32 * pitch_y,
                    tuning.block_width,
                    tuning.block_height,
                ),
                broken: false,
            });
        }
    }

    log::debug!("Created {}x{} block grid", columns, rows);

    BlockGrid {
        live: blocks.len() as u32,
        blocks,
        rows,
        columns,
    }
}

/// Award the clear bonus and move to the next, harder wave.
///
/// The bonus counts the rows of the wave just cleared. Rows grow by one up to
/// the cap; ball speed grows by `speed_growth` of itself.
pub fn advance_level(state: &mut GameState) {
    let tuning = &state.tuning;
    let bonus = tuning.score_per_block * state.rows as u64 * tuning.block_columns as u64;
    state.score += bonus;
    state.rows = (state.rows + 1).min(tuning.block_max_rows);
    state.speed_multiplier += state.speed_multiplier * tuning.speed_growth;
    state.level += 1;
    state.grid = create_blocks(tuning, state.rows, tuning.block_columns);

    log::info!(
        "Level {} cleared (+{}): next wave has {} rows, speed x{:.2}",
        state.level - 1,
        bonus,
        state.rows,
        state.speed_multiplier
    );

    state.events.push(GameEvent::LevelCleared {
        level: state.level - 1,
        bonus,
        rows: state.rows,
        speed_multiplier: state.speed_multiplier,
    });
}

/// Start over: fresh entities, score, difficulty and grid. Tuning is kept.
pub fn reset_game(state: &mut GameState) {
    let tuning = &state.tuning;
    state.phase = GamePhase::Playing;
    state.paddle = Paddle::new(tuning);
    state.ball = Ball::new(tuning);
    state.rows = tuning.block_start_rows;
    state.score = 0;
    state.level = 1;
    state.speed_multiplier = 1.0;
    state.grid = create_blocks(tuning, state.rows, tuning.block_columns);

    log::info!("Game reset");

    state.events.clear();
    state.events.push(GameEvent::Restarted);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_blocks_counts() {
        let tuning = Tuning::default();
        for (rows, columns) in [(3, 8), (10, 8), (1, 1), (4, 2)] {
            let grid = create_blocks(&tuning, rows, columns);
            assert_eq!(grid.blocks.len() as u32, rows * columns);
            assert_eq!(grid.live, rows * columns);
            assert!(grid.blocks.iter().all(|b| !b.broken));
        }
    }

    #[test]
    fn test_create_blocks_layout() {
        let tuning = Tuning::default();
        let grid = create_blocks(&tuning, 3, 8);

        // Column-major: first column's rows come first
        assert_eq!(grid.blocks[0].rect, Rect::new(15.0, 45.0, 50.0, 10.0));
        assert_eq!(grid.blocks[1].rect, Rect::new(15.0, 65.0, 50.0, 10.0));
        assert_eq!(grid.blocks[2].rect, Rect::new(15.0, 85.0, 50.0, 10.0));
        assert_eq!(grid.blocks[3].rect, Rect::new(75.0, 45.0, 50.0, 10.0));

        // Last column ends inside the field
        let last = grid.blocks.last().unwrap();
        assert_eq!(last.rect.left(), 15.0 + 7.0 * 60.0);
        assert!(last.rect.right() <= tuning.field_width);
    }

    #[test]
    fn test_create_blocks_is_deterministic() {
        let tuning = Tuning::default();
        let a = create_blocks(&tuning, 5, 8);
        let b = create_blocks(&tuning, 5, 8);
        let rects_a: Vec<_> = a.blocks.iter().map(|b| b.rect).collect();
        let rects_b: Vec<_> = b.blocks.iter().map(|b| b.rect).collect();
        assert_eq!(rects_a, rects_b);
    }

    #[test]
    fn test_oversized_tuning_builds_reachable_grid() {
        let tuning = Tuning::from_json(r#"{ "block_columns": 70000, "block_start_rows": 70000 }"#)
            .expect("valid json");
        let state = GameState::new(tuning);

        assert_eq!(state.grid.blocks.len(), 8 * 23);
        let field = state.field();
        assert!(state.grid.blocks.iter().all(|b| {
            b.rect.left() >= 0.0
                && b.rect.right() <= field.right()
                && b.rect.top() >= 0.0
                && b.rect.bottom() <= field.bottom()
        }));
    }

    #[test]
    fn test_advance_level() {
        let mut state = GameState::default();
        state.score = 2_400;
        advance_level(&mut state);

        // Bonus uses the rows of the cleared wave: 100 * 3 * 8
        assert_eq!(state.score, 2_400 + 2_400);
        assert_eq!(state.rows, 4);
        assert_eq!(state.level, 2);
        assert!((state.speed_multiplier - 1.1).abs() < 1e-6);
        assert_eq!(state.grid.live, 32);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::LevelCleared { level: 1, bonus: 2_400, rows: 4, .. })
        ));
    }

    #[test]
    fn test_rows_capped_at_max() {
        let mut state = GameState::default();
        state.rows = 10;
        advance_level(&mut state);
        assert_eq!(state.rows, 10);
        assert_eq!(state.grid.blocks.len(), 80);

        advance_level(&mut state);
        assert_eq!(state.rows, 10);
    }

    #[test]
    fn test_speed_compounds() {
        let mut state = GameState::default();
        advance_level(&mut state);
        advance_level(&mut state);
        assert!((state.speed_multiplier - 1.21).abs() < 1e-5);
    }

    #[test]
    fn test_reset_game_restores_canonical_state() {
        let mut state = GameState::default();
        state.phase = GamePhase::GameOver;
        state.score = 12_345;
        state.rows = 7;
        state.level = 5;
        state.speed_multiplier = 1.6;
        state.paddle.pos.x = 3.0;
        state.paddle.vel_x = -14.0;
        state.ball.pos = glam::Vec2::new(100.0, 495.0);
        state.ball.vel = glam::Vec2::new(-3.0, -2.0);
        state.grid.blocks[0].broken = true;
        state.grid.live -= 1;

        reset_game(&mut state);

        assert!(!state.is_game_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.rows, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.speed_multiplier, 1.0);
        assert_eq!(state.paddle.pos, glam::Vec2::new(210.0, 485.0));
        assert_eq!(state.ball.pos, glam::Vec2::new(245.0, 245.0));
        assert_eq!(state.ball.vel, glam::Vec2::new(3.0, 2.0));
        assert_eq!(state.grid.live, 24);
        assert!(state.grid.blocks.iter().all(|b| !b.broken));
        assert_eq!(state.events, vec![GameEvent::Restarted]);
    }
}
