/// Game tuning parameters for Rocket Dodge
///
/// Positions are percentages of the arena on both axes, speeds are
/// percent per frame, and timers are milliseconds of clock time.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const ARENA_WIDTH: f32 = 100.0;
    pub const ARENA_HEIGHT: f32 = 100.0;

    // Player
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    pub const PLAYER_SPAWN_Y: f32 = 80.0;
    pub const PLAYER_SPEED: f32 = 2.4;
    pub const PLAYER_WIDTH: f32 = 4.0;
    pub const PLAYER_HEIGHT: f32 = 5.0;

    // Player lasers
    pub const PLAYER_LASER_SPEED: f32 = 3.0;
    pub const LASER_MUZZLE_X: f32 = 1.5;
    pub const LASER_LANE_SPREAD: f32 = 2.0;
    pub const FIRE_COOLDOWN_MS: f64 = 200.0;
    pub const PLAYER_LASER_EXIT_Y: f32 = -5.0;

    // Enemy lasers
    pub const ENEMY_LASER_SPEED: f32 = 2.0;
    pub const ENEMY_MUZZLE_X: f32 = 1.5;
    pub const ENEMY_MUZZLE_Y: f32 = 5.0;
    pub const ENEMY_FIRE_COOLDOWN_MS: f64 = 10_000.0;
    pub const SHOOTER_SPEED_THRESHOLD: f32 = 1.1;
    pub const ENEMY_LASER_EXIT_Y: f32 = 105.0;

    pub const LASER_WIDTH: f32 = 0.5;
    pub const LASER_HEIGHT: f32 = 3.0;

    // Obstacles
    pub const OBSTACLE_MIN_X: f32 = 5.0;
    pub const OBSTACLE_MAX_X: f32 = 95.0;
    pub const OBSTACLE_MOVING_START_Y: f32 = -50.0;
    pub const OBSTACLE_STATIONARY_Y: f32 = 20.0;
    /// 150% of travel over a 3000 ms sweep at 60 Hz, per unit of archetype speed
    pub const OBSTACLE_FALL_RATE: f32 = 150.0 / 180.0;
    pub const OBSTACLE_EXIT_Y: f32 = 100.0;
    pub const OBSTACLE_WIDTH: f32 = 4.0;
    pub const OBSTACLE_HEIGHT: f32 = 5.0;
    pub const OBSTACLE_VARIANTS: u8 = 4;

    // Difficulty ramp
    pub const SPAWN_INTERVAL_INITIAL_MS: u32 = 2000;
    pub const SPAWN_INTERVAL_STEP_MS: u32 = 100;
    pub const SPAWN_INTERVAL_MIN_MS: u32 = 800;
    pub const RAMP_EVERY_POINTS: u32 = 100;

    // Scoring
    pub const HIT_MULTIPLIER: u32 = 2;
    pub const HIGH_SCORE_KEY: &'static str = "rocketDodgeHighScore";

    // Effects
    pub const BURST_PARTICLES: u32 = 8;
    pub const BURST_SPREAD_PX: f32 = 100.0;
    pub const PARTICLE_LIFETIME_MS: i32 = 1000;
    pub const EXPLOSION_WAVES: u32 = 20;
    pub const EXPLOSION_WAVE_INTERVAL_MS: u32 = 50;
}
