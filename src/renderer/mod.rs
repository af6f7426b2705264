//! Rendering module
//!
//! The simulation never draws. A [`RenderDriver`] receives rectangles and text
//! in field coordinates; [`draw_frame`] decides what to paint from the state.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{GpuRenderer, TextItem, hud_html};
pub use vertex::{Color, colors};

use crate::sim::{GameState, Rect};

/// Font size used for all HUD text, in field pixels
pub const HUD_FONT_SIZE: f32 = 20.0;
/// Baseline of the score and level readouts
pub const HUD_BASELINE_Y: f32 = 25.0;
/// Score sits this far in from the left edge
pub const SCORE_TEXT_X: f32 = 10.0;
/// Level label starts this far in from the right edge
pub const LEVEL_TEXT_INSET: f32 = 90.0;
/// Baseline-left of the game over message
pub const GAME_OVER_TEXT_POS: (f32, f32) = (80.0, 400.0);

pub const GAME_OVER_TEXT: &str = "Game Over: Press 'Space' to Restart";

/// A surface that can fill rectangles and draw text
pub trait RenderDriver {
    /// Start a new frame covering `field`
    fn clear(&mut self, field: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw `text` with its baseline-left at (x, y)
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

/// Paint one frame of `state`
pub fn draw_frame<R: RenderDriver + ?Sized>(state: &GameState, out: &mut R) {
    out.clear(state.field());

    out.fill_rect(state.paddle.rect(), colors::PADDLE);
    out.fill_rect(state.ball.rect(), colors::BALL);

    for block in state.grid.standing() {
        out.fill_rect(block.rect, colors::BLOCK);
    }

    out.fill_text(
        &state.score.to_string(),
        SCORE_TEXT_X,
        HUD_BASELINE_Y,
        HUD_FONT_SIZE,
        colors::TEXT,
    );
    out.fill_text(
        &format!("Level {}", state.level),
        state.tuning.field_width - LEVEL_TEXT_INSET,
        HUD_BASELINE_Y,
        HUD_FONT_SIZE,
        colors::TEXT,
    );

    if state.is_game_over() {
        let (x, y) = GAME_OVER_TEXT_POS;
        out.fill_text(GAME_OVER_TEXT, x, y, HUD_FONT_SIZE, colors::TEXT);
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Rect(Rect, Color),
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
}

/// Render driver that just records what it was asked to draw.
/// Used by tests and the headless native build.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub commands: Vec<DrawCommand>,
    pub frames: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect(rect, color) => Some((rect, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl RenderDriver for FrameRecorder {
    fn clear(&mut self, field: Rect) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(field));
        self.frames += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect(rect, color));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}
