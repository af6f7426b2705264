//! Game state and core simulation types
//!
//! One `GameState` holds everything a frame needs; there are no globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::create_blocks;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ball escaped past the paddle; nothing moves until a reset
    GameOver,
}

/// The player's paddle. Its y never changes after spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity in pixels per frame
    pub vel_x: f32,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        let (x, y) = tuning.paddle_start();
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(tuning.paddle_width, tuning.paddle_height),
            vel_x: tuning.paddle_start_velocity,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Centre x, used by the autopilot
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// The ball. Velocity is in pixels per reference (60 Hz) frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        let (x, y) = tuning.ball_start();
        let (vx, vy) = tuning.ball_start_velocity;
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(tuning.ball_width, tuning.ball_height),
            vel: Vec2::new(vx, vy),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A destructible block. Only `broken` changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub broken: bool,
}

/// The wave's blocks in creation order, plus how many are still standing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockGrid {
    pub blocks: Vec<Block>,
    pub rows: u32,
    pub columns: u32,
    pub live: u32,
}

impl BlockGrid {
    pub fn is_cleared(&self) -> bool {
        self.live == 0
    }

    /// Iterator over blocks that still take part in collisions
    pub fn standing(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| !b.broken)
    }
}

/// Things that happened during the last step (for HUD, logging)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit,
    WallBounce,
    BlockDestroyed { index: usize, score: u64 },
    LevelCleared {
        level: u32,
        bonus: u64,
        rows: u32,
        speed_multiplier: f32,
    },
    GameOver { score: u64, level: u32 },
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Current wave (1-based)
    pub level: u32,
    /// Rows in the current grid, within [block_start_rows, block_max_rows]
    pub rows: u32,
    /// Ball speed scale; grows each level, back to 1 on reset
    pub speed_multiplier: f32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub grid: BlockGrid,
    /// Events from the most recent step
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Create a fresh game with the given tuning
    pub fn new(tuning: Tuning) -> Self {
        let rows = tuning.block_start_rows;
        let grid = create_blocks(&tuning, rows, tuning.block_columns);
        Self {
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            rows,
            speed_multiplier: 1.0,
            paddle: Paddle::new(&tuning),
            ball: Ball::new(&tuning),
            grid,
            events: Vec::new(),
            tuning,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Playfield bounds as a rectangle anchored at the origin
    pub fn field(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tuning.field_width, self.tuning.field_height)
    }
}
