//! Frame pacing between the host's refresh callback and the simulation
//!
//! The host owns the real clock and the scheduling primitive
//! (`requestAnimationFrame`, a native loop, a test). It hands timestamps to
//! [`FrameDriver::frame`] and input to [`FrameDriver::handle`], and keeps
//! scheduling frames only while `frame` says so.

use crate::input::{Dispatch, InputEvent, InputState};
use crate::renderer::{RenderDriver, draw_frame};
use crate::sim::{GameEvent, GameState, autopilot, step};
use crate::tuning::Tuning;

/// Longest frame we simulate in one go (a backgrounded tab can stall for seconds)
pub const MAX_FRAME_SECS: f32 = 0.25;
/// Elapsed time assumed for the first frame after (re)starting
pub const FIRST_FRAME_SECS: f32 = 1.0 / crate::consts::REFERENCE_FPS;

/// Turns monotonically increasing timestamps (ms) into elapsed seconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, clamped to [0, MAX_FRAME_SECS]
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => FIRST_FRAME_SECS,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_SECS)
    }

    /// Forget the previous timestamp so a restart doesn't see the idle gap
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Owns one game plus its input and clock
#[derive(Debug, Clone)]
pub struct FrameDriver {
    pub state: GameState,
    pub input: InputState,
    pub clock: FrameClock,
    /// Demo mode: the autopilot supplies key intent
    pub idle_mode: bool,
    running: bool,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl FrameDriver {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            input: InputState::new(),
            clock: FrameClock::new(),
            idle_mode: false,
            running: true,
        }
    }

    /// Whether the host should keep scheduling frames
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one step and paint it. Returns whether to schedule another frame.
    pub fn frame<R: RenderDriver + ?Sized>(&mut self, now_ms: f64, out: &mut R) -> bool {
        if !self.running {
            return false;
        }

        let dt = self.clock.tick(now_ms);
        if self.idle_mode {
            let intent = autopilot(&self.state);
            step(&mut self.state, &intent, dt);
        } else {
            step(&mut self.state, &self.input, dt);
        }
        draw_frame(&self.state, out);

        if self.state.is_game_over() {
            self.running = false;
        }
        self.running
    }

    /// Feed one input event. Returns true when the host must restart its
    /// frame loop (the game was reset after a game over).
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match self.input.apply(&mut self.state, event) {
            Dispatch::Restarted => {
                self.clock.reset();
                let was_running = self.running;
                self.running = true;
                !was_running
            }
            Dispatch::Handled | Dispatch::Ignored => false,
        }
    }

    pub fn toggle_idle_mode(&mut self) {
        self.idle_mode = !self.idle_mode;
        log::info!("Idle mode: {}", self.idle_mode);
    }

    /// Events produced by the most recent step (or reset)
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::renderer::FrameRecorder;
    use glam::Vec2;

    #[test]
    fn test_clock_first_frame_and_deltas() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(123_456.0), FIRST_FRAME_SECS);
        let dt = clock.tick(123_456.0 + 20.0);
        assert!((dt - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_clock_clamps() {
        let mut clock = FrameClock::new();
        clock.tick(1_000.0);
        assert_eq!(clock.tick(10_000.0), MAX_FRAME_SECS);
        // Timestamps going backwards never yield negative time
        assert_eq!(clock.tick(9_000.0), 0.0);
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = FrameClock::new();
        clock.tick(1_000.0);
        clock.reset();
        assert_eq!(clock.tick(60_000.0), FIRST_FRAME_SECS);
    }

    #[test]
    fn test_frame_steps_and_draws() {
        let mut driver = FrameDriver::default();
        let mut recorder = FrameRecorder::new();

        assert!(driver.frame(0.0, &mut recorder));
        assert_eq!(recorder.frames, 1);
        assert!(driver.state.ball.pos.x > 245.0);
    }

    #[test]
    fn test_stops_after_game_over_and_restarts() {
        let mut driver = FrameDriver::default();
        let mut recorder = FrameRecorder::new();
        driver.state.ball.pos = Vec2::new(20.0, 495.0);

        assert!(!driver.frame(16.0, &mut recorder));
        assert!(!driver.is_running());
        assert!(driver.state.is_game_over());

        // Further frames do nothing
        let frames = recorder.frames;
        assert!(!driver.frame(32.0, &mut recorder));
        assert_eq!(recorder.frames, frames);

        // Steering keys don't restart
        assert!(!driver.handle(InputEvent::KeyDown(Key::Left)));
        assert!(driver.handle(InputEvent::KeyDown(Key::Restart)));
        assert!(driver.is_running());
        assert_eq!(driver.events(), &[GameEvent::Restarted]);

        assert!(driver.frame(90_000.0, &mut recorder));
        assert!(!driver.state.is_game_over());
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut driver = FrameDriver::default();
        assert!(!driver.handle(InputEvent::KeyDown(Key::Restart)));
        assert!(driver.is_running());
    }

    #[test]
    fn test_idle_mode_plays() {
        let mut driver = FrameDriver::default();
        driver.toggle_idle_mode();
        let mut recorder = FrameRecorder::new();

        let mut now = 0.0;
        for _ in 0..600 {
            now += 1000.0 / 60.0;
            if !driver.frame(now, &mut recorder) {
                break;
            }
        }
        assert!(driver.is_running());
    }
}
