/// Fixed timestep driver for the simulation
///
/// The host feeds the wall-clock time of each rendered frame; the loop converts it
/// into a whole number of fixed simulation steps. Time is passed in rather than read
/// from the clock so runs are reproducible.
use std::time::Duration;

/// Target simulation rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation steps per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Game loop timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed steps
    accumulator: Duration,

    /// Total simulated time
    simulated: Duration,

    /// Whether the simulation is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total steps handed out
    update_count: u64,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            simulated: Duration::ZERO,
            paused: false,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Begin a new frame that took `frame_time`, returns the number of fixed updates to run
    pub fn begin_frame(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Drop the backlog instead of carrying it into the next frame
        if updates == MAX_STEPS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::trace!(
                "Frame backlog of {:?} dropped after {} steps",
                self.accumulator,
                updates
            );
            self.accumulator = Duration::ZERO;
        }

        self.simulated += FIXED_TIMESTEP_DURATION * updates;
        self.update_count += updates as u64;
        updates
    }

    /// Get the fixed timestep for simulation updates (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Interpolation alpha between the last two simulation steps
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    /// Total simulated time
    pub fn simulated(&self) -> Duration {
        self.simulated
    }

    /// Get total number of frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Check if the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.update_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_fixed_timestep() {
        let game_loop = GameLoop::new();
        assert!((game_loop.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());
        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_paused_no_updates() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();
        assert_eq!(game_loop.begin_frame(Duration::from_millis(50)), 0);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_update_accumulation() {
        let mut game_loop = GameLoop::new();
        // Half a step: nothing yet
        assert_eq!(game_loop.begin_frame(Duration::from_millis(8)), 0);
        // Completes the first step
        assert_eq!(game_loop.begin_frame(Duration::from_millis(9)), 1);
        assert_eq!(game_loop.update_count(), 1);
        assert!(game_loop.alpha() >= 0.0 && game_loop.alpha() < 1.0);
    }

    #[test]
    fn test_max_steps_limit() {
        let mut game_loop = GameLoop::new();
        // 300ms would allow 18 updates
        assert_eq!(game_loop.begin_frame(Duration::from_millis(300)), MAX_STEPS_PER_FRAME);
        // Backlog was dropped
        assert_eq!(game_loop.begin_frame(Duration::ZERO), 0);
    }

    #[test]
    fn test_resume_clears_accumulator() {
        let mut game_loop = GameLoop::new();
        game_loop.begin_frame(Duration::from_millis(10));
        game_loop.pause();
        game_loop.resume();
        assert_eq!(game_loop.begin_frame(Duration::from_millis(10)), 0);
    }
}
