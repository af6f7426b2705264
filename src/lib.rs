//! Block Breaker - a paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, entities, step, progression)
//! - `input`: Keyboard/pointer intent, decoupled from the simulation
//! - `driver`: Frame pacing glue between the host and the simulation
//! - `renderer`: Render driver trait plus the WebGPU implementation
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use driver::{FrameClock, FrameDriver};
pub use input::{Dispatch, InputEvent, InputState, Key};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 500.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Paddle defaults - sits 5px above the bottom edge
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_BOTTOM_MARGIN: f32 = 5.0;
    pub const PADDLE_START_VELOCITY: f32 = 10.0;
    /// Velocity gained per frame while a direction key is held
    pub const PADDLE_ACCELERATION: f32 = 0.5;
    pub const PADDLE_MAX_SPEED: f32 = 20.0;
    /// Multiplicative velocity decay per frame with no usable input
    pub const PADDLE_FRICTION: f32 = 0.9;

    /// Ball defaults (velocity in pixels per reference frame)
    pub const BALL_WIDTH: f32 = 10.0;
    pub const BALL_HEIGHT: f32 = 10.0;
    pub const BALL_START_VELOCITY_X: f32 = 3.0;
    pub const BALL_START_VELOCITY_Y: f32 = 2.0;

    /// Block grid layout
    pub const BLOCK_WIDTH: f32 = 50.0;
    pub const BLOCK_HEIGHT: f32 = 10.0;
    pub const BLOCK_GAP: f32 = 10.0;
    pub const BLOCK_ORIGIN_X: f32 = 15.0;
    pub const BLOCK_ORIGIN_Y: f32 = 45.0;
    pub const BLOCK_COLUMNS: u32 = 8;
    pub const BLOCK_START_ROWS: u32 = 3;
    pub const BLOCK_MAX_ROWS: u32 = 10;

    /// Scoring
    pub const SCORE_PER_BLOCK: u64 = 100;

    /// Velocities are authored per frame at this rate
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Ball speed growth per cleared level (multiplicative)
    pub const SPEED_GROWTH: f32 = 0.1;
}
