use std::cell::Cell;
use std::rc::Rc;

use crate::config::Config;

/// Monotonic time source, in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

/// Session score and the persisted best
#[derive(Debug, Clone, Copy, Default)]
pub struct Score {
    pub current: u32,
    pub high: u32,
}

impl Score {
    pub fn new(high: u32) -> Self {
        Self { current: 0, high }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Add points and return how many multiples of `every` were crossed
    pub fn add(&mut self, points: u32, every: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(points);
        self.current / every - before / every
    }

    /// Adopt the current score as the best if it beats it
    pub fn record_high(&mut self) -> bool {
        if self.current > self.high {
            self.high = self.current;
            true
        } else {
            false
        }
    }
}

/// Obstacle spawn gate and the difficulty ratchet that tightens it
#[derive(Debug, Clone, Copy)]
pub struct SpawnSchedule {
    pub interval_ms: u32,
    pub last_spawn_ms: Option<f64>,
}

impl SpawnSchedule {
    pub fn new(config: &Config) -> Self {
        Self {
            interval_ms: config.spawn_interval_initial_ms,
            last_spawn_ms: None,
        }
    }

    /// Back to the initial interval with the gate open, so a fresh session
    /// spawns on its first frame
    pub fn reset(&mut self, config: &Config) {
        self.interval_ms = config.spawn_interval_initial_ms;
        self.last_spawn_ms = None;
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        match self.last_spawn_ms {
            Some(last) => now_ms - last >= self.interval_ms as f64,
            None => true,
        }
    }

    pub fn mark(&mut self, now_ms: f64) {
        self.last_spawn_ms = Some(now_ms);
    }

    /// Shorten the interval by `steps` ramp steps, never below the floor
    pub fn tighten(&mut self, steps: u32, config: &Config) {
        let cut = steps.saturating_mul(config.spawn_interval_step_ms);
        self.interval_ms = self
            .interval_ms
            .saturating_sub(cut)
            .max(config.spawn_interval_min_ms);
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fatal {
    ObstacleCrash,
    EnemyLaser,
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub obstacles_spawned: u32,
    pub obstacles_passed: u32,
    pub obstacles_destroyed: u32,
    pub enemy_shots: u32,
    pub points: u32,
    pub fatal: Option<Fatal>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Directional keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Net direction per axis: -1, 0 or 1
    pub fn axis(&self) -> (f32, f32) {
        let dx = (self.right as i8 - self.left as i8) as f32;
        let dy = (self.down as i8 - self.up as i8) as f32;
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_add_reports_crossings() {
        let mut score = Score::new(0);
        assert_eq!(score.add(90, 100), 0);
        assert_eq!(score.add(10, 100), 1);
        assert_eq!(score.add(10, 100), 0);
        assert_eq!(score.add(190, 100), 2);
        assert_eq!(score.current, 300);
    }

    #[test]
    fn test_score_record_high() {
        let mut score = Score::new(50);
        score.add(40, 100);
        assert!(!score.record_high());
        assert_eq!(score.high, 50);

        score.add(20, 100);
        assert!(score.record_high());
        assert_eq!(score.high, 60);

        score.reset();
        assert_eq!(score.current, 0);
        assert_eq!(score.high, 60);
    }

    #[test]
    fn test_spawn_schedule_gate() {
        let config = Config::new();
        let mut schedule = SpawnSchedule::new(&config);
        assert!(schedule.is_due(0.0));

        schedule.mark(1000.0);
        assert!(!schedule.is_due(2999.0));
        assert!(schedule.is_due(3000.0));
    }

    #[test]
    fn test_spawn_schedule_reset_reopens_gate() {
        let config = Config::new();
        let mut schedule = SpawnSchedule::new(&config);
        schedule.tighten(3, &config);
        schedule.mark(50_000.0);
        assert!(!schedule.is_due(50_001.0));

        schedule.reset(&config);
        assert_eq!(schedule.interval_ms, config.spawn_interval_initial_ms);
        assert!(schedule.is_due(50_001.0));
    }

    #[test]
    fn test_spawn_schedule_floor() {
        let config = Config::new();
        let mut schedule = SpawnSchedule::new(&config);
        schedule.tighten(1, &config);
        assert_eq!(schedule.interval_ms, 1900);
        schedule.tighten(50, &config);
        assert_eq!(schedule.interval_ms, config.spawn_interval_min_ms);
        schedule.tighten(1, &config);
        assert_eq!(schedule.interval_ms, config.spawn_interval_min_ms);
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new(5.0);
        let handle = clock.clone();
        handle.advance(10.0);
        assert_eq!(clock.now_ms(), 15.0);
    }

    #[test]
    fn test_input_axis() {
        let mut input = InputState::new();
        input.left = true;
        input.down = true;
        assert_eq!(input.axis(), (-1.0, 1.0));
        input.right = true;
        assert_eq!(input.axis(), (0.0, 1.0));
        input.clear();
        assert_eq!(input.axis(), (0.0, 0.0));
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.obstacles_passed = 2;
        events.fatal = Some(Fatal::EnemyLaser);
        events.clear();
        assert_eq!(events.obstacles_passed, 0);
        assert!(events.fatal.is_none());
    }
}
