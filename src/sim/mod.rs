//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is always passed in, never read from a clock
//! - No randomness
//! - Stable iteration order (block creation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{
    HitAxis, Rect, hit_axis, hit_from_bottom, hit_from_left, hit_from_right, hit_from_top,
    overlaps,
};
pub use level::{advance_level, create_blocks, reset_game};
pub use state::{Ball, Block, BlockGrid, GameEvent, GamePhase, GameState, Paddle};
pub use tick::step;
