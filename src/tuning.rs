//! Data-driven game balance
//!
//! Every knob defaults to the compile-time value in [`crate::consts`]. Hosts can
//! override any subset from JSON, e.g. `{"paddle_width": 500.0}` for a paddle
//! that never misses.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning, fixed for the lifetime of a `GameState`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_margin: f32,
    pub paddle_start_velocity: f32,
    pub paddle_acceleration: f32,
    pub paddle_max_speed: f32,
    pub paddle_friction: f32,

    pub ball_width: f32,
    pub ball_height: f32,
    pub ball_start_velocity: (f32, f32),

    pub block_width: f32,
    pub block_height: f32,
    pub block_gap: f32,
    pub block_origin: (f32, f32),
    pub block_columns: u32,
    pub block_start_rows: u32,
    pub block_max_rows: u32,

    pub score_per_block: u64,
    pub speed_growth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_start_velocity: PADDLE_START_VELOCITY,
            paddle_acceleration: PADDLE_ACCELERATION,
            paddle_max_speed: PADDLE_MAX_SPEED,
            paddle_friction: PADDLE_FRICTION,

            ball_width: BALL_WIDTH,
            ball_height: BALL_HEIGHT,
            ball_start_velocity: (BALL_START_VELOCITY_X, BALL_START_VELOCITY_Y),

            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_gap: BLOCK_GAP,
            block_origin: (BLOCK_ORIGIN_X, BLOCK_ORIGIN_Y),
            block_columns: BLOCK_COLUMNS,
            block_start_rows: BLOCK_START_ROWS,
            block_max_rows: BLOCK_MAX_ROWS,

            score_per_block: SCORE_PER_BLOCK,
            speed_growth: SPEED_GROWTH,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults.
    /// The result is validated before it is returned.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate();
        Ok(tuning)
    }

    /// Clamp values that would break the simulation's invariants
    pub fn validate(&mut self) {
        let defaults = Tuning::default();

        let sizes = [
            ("field_width", &mut self.field_width, defaults.field_width),
            ("field_height", &mut self.field_height, defaults.field_height),
            ("paddle_width", &mut self.paddle_width, defaults.paddle_width),
            ("paddle_height", &mut self.paddle_height, defaults.paddle_height),
            ("ball_width", &mut self.ball_width, defaults.ball_width),
            ("ball_height", &mut self.ball_height, defaults.ball_height),
            ("block_width", &mut self.block_width, defaults.block_width),
            ("block_height", &mut self.block_height, defaults.block_height),
        ];
        for (name, value, default) in sizes {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("Tuning: {} = {} is not a positive size, using {}", name, value, default);
                *value = default;
            }
        }

        if self.paddle_width > self.field_width {
            log::warn!(
                "Tuning: paddle_width {} exceeds field_width {}, clamping",
                self.paddle_width,
                self.field_width
            );
            self.paddle_width = self.field_width;
        }

        if !(0.0..1.0).contains(&self.paddle_friction) {
            log::warn!(
                "Tuning: paddle_friction {} outside [0, 1), using {}",
                self.paddle_friction,
                defaults.paddle_friction
            );
            self.paddle_friction = defaults.paddle_friction;
        }

        if self.paddle_max_speed < 0.0 {
            log::warn!("Tuning: negative paddle_max_speed, using magnitude");
            self.paddle_max_speed = -self.paddle_max_speed;
        }

        if self.block_columns == 0 {
            log::warn!("Tuning: block_columns must be at least 1");
            self.block_columns = 1;
        }
        if self.block_start_rows == 0 {
            log::warn!("Tuning: block_start_rows must be at least 1");
            self.block_start_rows = 1;
        }
        if self.block_max_rows < self.block_start_rows {
            log::warn!(
                "Tuning: block_max_rows {} below block_start_rows {}, raising",
                self.block_max_rows,
                self.block_start_rows
            );
            self.block_max_rows = self.block_start_rows;
        }

        if self.block_gap < 0.0 || !self.block_gap.is_finite() {
            log::warn!("Tuning: block_gap {} is negative, using 0", self.block_gap);
            self.block_gap = 0.0;
        }

        // Every block must lie inside the field or the wave can never be cleared
        let fit_columns = fit_along(
            "x",
            self.field_width,
            &mut self.block_origin.0,
            &mut self.block_width,
            self.block_gap,
        );
        if self.block_columns > fit_columns {
            log::warn!(
                "Tuning: {} block_columns overflow the field, clamping to {}",
                self.block_columns,
                fit_columns
            );
            self.block_columns = fit_columns;
        }

        let fit_rows = fit_along(
            "y",
            self.field_height,
            &mut self.block_origin.1,
            &mut self.block_height,
            self.block_gap,
        );
        if self.block_max_rows > fit_rows {
            log::warn!(
                "Tuning: {} block_max_rows overflow the field, clamping to {}",
                self.block_max_rows,
                fit_rows
            );
            self.block_max_rows = fit_rows;
        }
        if self.block_start_rows > self.block_max_rows {
            log::warn!(
                "Tuning: block_start_rows {} above block_max_rows {}, lowering",
                self.block_start_rows,
                self.block_max_rows
            );
            self.block_start_rows = self.block_max_rows;
        }

        if self.speed_growth < 0.0 {
            log::warn!("Tuning: speed_growth {} would slow the ball, using 0", self.speed_growth);
            self.speed_growth = 0.0;
        }
    }

    /// Paddle spawn position: horizontally centred, `paddle_bottom_margin` above the floor
    pub fn paddle_start(&self) -> (f32, f32) {
        (
            self.field_width / 2.0 - self.paddle_width / 2.0,
            self.field_height - self.paddle_height - self.paddle_bottom_margin,
        )
    }

    /// Ball spawn position: centred in the field
    pub fn ball_start(&self) -> (f32, f32) {
        (
            self.field_width / 2.0 - self.ball_width / 2.0,
            self.field_height / 2.0 - self.ball_height / 2.0,
        )
    }

    /// Largest x the paddle may occupy
    #[inline]
    pub fn paddle_max_x(&self) -> f32 {
        self.field_width - self.paddle_width
    }
}

/// How many blocks of `size` spaced by `gap` fit between `origin` and `extent`.
///
/// Pulls the origin back to 0 and shrinks the block to the extent when not
/// even one fits, so the result is always at least 1.
fn fit_along(axis: &str, extent: f32, origin: &mut f32, size: &mut f32, gap: f32) -> u32 {
    if !(origin.is_finite() && *origin >= 0.0 && *origin + *size <= extent) {
        log::warn!("Tuning: block grid origin {} = {} leaves no room, using 0", axis, origin);
        *origin = 0.0;
        *size = size.min(extent);
    }
    // Float-to-int casts saturate, so huge extents can't wrap
    let fit = ((extent - *origin + gap) / (*size + gap)).floor() as u32;
    fit.max(1)
}
