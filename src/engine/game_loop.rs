/// Frame driver for the game
///
/// Implements a fixed timestep update loop with variable rendering.
/// Every fixed update advances the simulation by exactly 1/60 s, no matter
/// how long the displayed frame took; rendering happens once per frame.
use std::time::{Duration, Instant};

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of fixed updates per frame to prevent spiral of death
pub const MAX_UPDATES_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total updates executed
    update_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a game loop whose first frame is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: start,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            update_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame at `now`, returns the number of fixed updates to run
    pub fn begin_frame_at(&mut self, now: Instant) -> u32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_UPDATES_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Drop the backlog we refused to simulate instead of carrying it over
        if updates == MAX_UPDATES_PER_FRAME {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }

        self.update_count += updates as u64;
        updates
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
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
    }

    #[test]
    fn test_fixed_timestep() {
        assert!((FIXED_TIMESTEP - 1.0 / 60.0).abs() < 0.0001);
        assert!((FIXED_TIMESTEP_DURATION.as_secs_f32() - FIXED_TIMESTEP).abs() < 0.0001);
    }

    #[test]
    fn test_frame_counting() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        game_loop.begin_frame_at(start + Duration::from_millis(1));
        assert_eq!(game_loop.frame_count(), 1);

        game_loop.begin_frame_at(start + Duration::from_millis(2));
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_short_frame_runs_no_update() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        let updates = game_loop.begin_frame_at(start + Duration::from_millis(5));
        assert_eq!(updates, 0);
    }

    #[test]
    fn test_one_timestep_runs_one_update() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        let updates = game_loop.begin_frame_at(start + FIXED_TIMESTEP_DURATION);
        assert_eq!(updates, 1);
        assert_eq!(game_loop.update_count(), 1);
    }

    #[test]
    fn test_leftover_time_accumulates() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        // 10ms + 10ms = one full step
        assert_eq!(game_loop.begin_frame_at(start + Duration::from_millis(10)), 0);
        assert_eq!(game_loop.begin_frame_at(start + Duration::from_millis(20)), 1);
    }

    #[test]
    fn test_max_updates_limit() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        // A 300ms frame would allow 18 updates
        let updates = game_loop.begin_frame_at(start + Duration::from_millis(300));
        assert_eq!(updates, MAX_UPDATES_PER_FRAME);

        // The backlog is not replayed on the next short frame
        let updates = game_loop.begin_frame_at(start + Duration::from_millis(301));
        assert!(updates <= 1);
    }

    #[test]
    fn test_fps_estimate() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        for i in 1..=10 {
            game_loop.begin_frame_at(start + Duration::from_millis(20 * i));
        }
        assert!((game_loop.fps() - 50.0).abs() < 0.5);
    }
}
