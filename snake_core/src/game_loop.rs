//! Fixed-timestep driver.
//!
//! The host calls [`GameLoop::frame`] from whatever per-frame mechanism it
//! has. Elapsed wall time is banked in `step_accumulator_ms` and drained in
//! whole `time_step_ms` slices; `render` runs once per frame afterwards.

use std::rc::Rc;

use crate::error::{CoreError, CoreResult};
use crate::params::Params;
use crate::resources::Clock;

/// The two per-frame callbacks the loop drives
pub trait FrameHandler {
    /// One fixed simulation step
    fn update(&mut self, dt_ms: f64);
    /// Called once per host frame after all due steps ran
    fn render(&mut self);
}

pub struct GameLoop {
    clock: Rc<dyn Clock>,
    time_step_ms: f64,
    running: bool,
    last_frame_ms: f64,
    /// Wall time between the last two host frames
    frame_delta_ms: f64,
    /// Banked time not yet consumed by a fixed step
    step_accumulator_ms: f64,
    steps: u64,
}

impl GameLoop {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            time_step_ms: Params::TIME_STEP_MS,
            running: false,
            last_frame_ms: 0.0,
            frame_delta_ms: 0.0,
            step_accumulator_ms: 0.0,
            steps: 0,
        }
    }

    pub fn with_time_step(clock: Rc<dyn Clock>, time_step_ms: f64) -> CoreResult<Self> {
        if !(time_step_ms.is_finite() && time_step_ms > 0.0) {
            return Err(CoreError::InvalidTimeStep(time_step_ms));
        }
        Ok(Self {
            time_step_ms,
            ..Self::new(clock)
        })
    }

    pub fn start(&mut self) {
        self.last_frame_ms = self.clock.now();
        self.frame_delta_ms = 0.0;
        self.step_accumulator_ms = 0.0;
        self.running = true;
        log::debug!("game loop started at {:.1}ms", self.last_frame_ms);
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("game loop stopped after {} steps", self.steps);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run every fixed step that is due, then render once.
    /// Returns the number of steps taken.
    pub fn frame(&mut self, handler: &mut dyn FrameHandler) -> usize {
        if !self.running {
            return 0;
        }

        let now = self.clock.now();
        // A clock that steps backwards contributes nothing
        self.frame_delta_ms = (now - self.last_frame_ms).max(0.0);
        self.last_frame_ms = now;
        self.step_accumulator_ms += self.frame_delta_ms;

        let mut taken = 0;
        while self.step_accumulator_ms >= self.time_step_ms {
            self.step_accumulator_ms -= self.time_step_ms;
            handler.update(self.time_step_ms);
            taken += 1;
        }
        self.steps += taken as u64;

        handler.render();
        taken
    }

    pub fn time_step_ms(&self) -> f64 {
        self.time_step_ms
    }

    pub fn frame_delta_ms(&self) -> f64 {
        self.frame_delta_ms
    }

    pub fn step_accumulator_ms(&self) -> f64 {
        self.step_accumulator_ms
    }

    /// Total fixed steps run since construction
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ManualClock;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<f64>,
        renders: usize,
    }

    impl FrameHandler for Recorder {
        fn update(&mut self, dt_ms: f64) {
            self.updates.push(dt_ms);
        }

        fn render(&mut self) {
            self.renders += 1;
        }
    }

    fn setup() -> (Rc<ManualClock>, GameLoop, Recorder) {
        let clock = Rc::new(ManualClock::new(5_000.0));
        let game_loop = GameLoop::new(clock.clone());
        (clock, game_loop, Recorder::default())
    }

    #[test]
    fn test_stopped_loop_does_nothing() {
        let (clock, mut game_loop, mut recorder) = setup();
        clock.advance(100.0);
        assert_eq!(game_loop.frame(&mut recorder), 0);
        assert_eq!(recorder.renders, 0);
        assert!(!game_loop.is_running());
    }

    #[test]
    fn test_drains_whole_steps_and_carries_remainder() {
        let (clock, mut game_loop, mut recorder) = setup();
        game_loop.start();

        // 40ms frames: 2, 2, then 3 steps as the remainder builds up
        let mut per_frame = Vec::new();
        for _ in 0..3 {
            clock.advance(40.0);
            per_frame.push(game_loop.frame(&mut recorder));
        }

        assert_eq!(per_frame, vec![2, 2, 3]);
        assert_eq!(recorder.updates.len(), 7);
        assert!(recorder.updates.iter().all(|&dt| dt == Params::TIME_STEP_MS));
        assert_eq!(recorder.renders, 3);
        assert!((game_loop.step_accumulator_ms() - (120.0 - 7.0 * Params::TIME_STEP_MS)).abs() < 1e-9);
        assert_eq!(game_loop.frame_delta_ms(), 40.0);
        assert_eq!(game_loop.steps(), 7);
    }

    #[test]
    fn test_short_frame_renders_without_stepping() {
        let (clock, mut game_loop, mut recorder) = setup();
        game_loop.start();
        clock.advance(5.0);
        assert_eq!(game_loop.frame(&mut recorder), 0);
        assert_eq!(recorder.renders, 1);
    }

    #[test]
    fn test_long_stall_runs_every_step() {
        let (clock, mut game_loop, mut recorder) = setup();
        game_loop.start();
        clock.advance(1_010.0);
        assert_eq!(game_loop.frame(&mut recorder), 60);
        assert_eq!(recorder.renders, 1);
    }

    #[test]
    fn test_stop_halts_and_restart_resamples_clock() {
        let (clock, mut game_loop, mut recorder) = setup();
        game_loop.start();
        clock.advance(40.0);
        game_loop.frame(&mut recorder);
        game_loop.stop();

        clock.advance(10_000.0);
        assert_eq!(game_loop.frame(&mut recorder), 0);

        // Time spent stopped is not replayed
        game_loop.start();
        clock.advance(20.0);
        assert_eq!(game_loop.frame(&mut recorder), 1);
    }

    #[test]
    fn test_custom_time_step() {
        let clock = Rc::new(ManualClock::new(0.0));
        assert!(matches!(
            GameLoop::with_time_step(clock.clone(), 0.0),
            Err(CoreError::InvalidTimeStep(_))
        ));

        let mut game_loop = GameLoop::with_time_step(clock.clone(), 10.0).unwrap();
        let mut recorder = Recorder::default();
        game_loop.start();
        clock.advance(35.0);
        assert_eq!(game_loop.frame(&mut recorder), 3);
        assert_eq!(recorder.updates, vec![10.0, 10.0, 10.0]);
    }
}
