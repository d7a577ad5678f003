use anyhow::{ensure, Context, Result};
use glam::Vec2;
use serde::Deserialize;

use crate::params::Params;

/// Game configuration
///
/// Every field falls back to its [`Params`] value, so a JSON override only
/// needs to name the knobs it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub player_spawn: [f32; 2],
    pub player_speed: f32,
    pub player_size: [f32; 2],
    pub player_laser_speed: f32,
    pub enemy_laser_speed: f32,
    pub laser_size: [f32; 2],
    pub laser_lane_spread: f32,
    pub player_muzzle_x: f32,
    pub player_laser_exit_y: f32,
    pub enemy_muzzle: [f32; 2],
    pub enemy_laser_exit_y: f32,
    pub fire_cooldown_ms: f64,
    pub enemy_fire_cooldown_ms: f64,
    pub shooter_speed_threshold: f32,
    pub obstacle_size: [f32; 2],
    pub obstacle_fall_rate: f32,
    /// Half-open `[min, max)` range for spawn x
    pub obstacle_x_range: [f32; 2],
    pub obstacle_moving_start_y: f32,
    pub obstacle_stationary_y: f32,
    pub obstacle_exit_y: f32,
    pub spawn_interval_initial_ms: u32,
    pub spawn_interval_step_ms: u32,
    pub spawn_interval_min_ms: u32,
    pub ramp_every_points: u32,
    pub high_score_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            player_spawn: [Params::PLAYER_SPAWN_X, Params::PLAYER_SPAWN_Y],
            player_speed: Params::PLAYER_SPEED,
            player_size: [Params::PLAYER_WIDTH, Params::PLAYER_HEIGHT],
            player_laser_speed: Params::PLAYER_LASER_SPEED,
            enemy_laser_speed: Params::ENEMY_LASER_SPEED,
            laser_size: [Params::LASER_WIDTH, Params::LASER_HEIGHT],
            laser_lane_spread: Params::LASER_LANE_SPREAD,
            player_muzzle_x: Params::LASER_MUZZLE_X,
            player_laser_exit_y: Params::PLAYER_LASER_EXIT_Y,
            enemy_muzzle: [Params::ENEMY_MUZZLE_X, Params::ENEMY_MUZZLE_Y],
            enemy_laser_exit_y: Params::ENEMY_LASER_EXIT_Y,
            fire_cooldown_ms: Params::FIRE_COOLDOWN_MS,
            enemy_fire_cooldown_ms: Params::ENEMY_FIRE_COOLDOWN_MS,
            shooter_speed_threshold: Params::SHOOTER_SPEED_THRESHOLD,
            obstacle_size: [Params::OBSTACLE_WIDTH, Params::OBSTACLE_HEIGHT],
            obstacle_fall_rate: Params::OBSTACLE_FALL_RATE,
            obstacle_x_range: [Params::OBSTACLE_MIN_X, Params::OBSTACLE_MAX_X],
            obstacle_moving_start_y: Params::OBSTACLE_MOVING_START_Y,
            obstacle_stationary_y: Params::OBSTACLE_STATIONARY_Y,
            obstacle_exit_y: Params::OBSTACLE_EXIT_Y,
            spawn_interval_initial_ms: Params::SPAWN_INTERVAL_INITIAL_MS,
            spawn_interval_step_ms: Params::SPAWN_INTERVAL_STEP_MS,
            spawn_interval_min_ms: Params::SPAWN_INTERVAL_MIN_MS,
            ramp_every_points: Params::RAMP_EVERY_POINTS,
            high_score_key: Params::HIGH_SCORE_KEY.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json).context("malformed game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.arena_width > 0.0 && self.arena_height > 0.0,
            "arena must have a positive size, got {}x{}",
            self.arena_width,
            self.arena_height
        );
        ensure!(self.player_speed > 0.0, "player_speed must be positive");
        ensure!(
            self.player_laser_speed > 0.0 && self.enemy_laser_speed > 0.0,
            "laser speeds must be positive"
        );
        ensure!(
            self.obstacle_fall_rate > 0.0,
            "obstacle_fall_rate must be positive, got {}",
            self.obstacle_fall_rate
        );
        ensure!(
            self.fire_cooldown_ms > 0.0 && self.enemy_fire_cooldown_ms > 0.0,
            "cooldowns must be positive"
        );
        for (name, size) in [
            ("player_size", self.player_size),
            ("laser_size", self.laser_size),
            ("obstacle_size", self.obstacle_size),
        ] {
            ensure!(
                size[0] > 0.0 && size[1] > 0.0,
                "{name} must be positive, got {}x{}",
                size[0],
                size[1]
            );
        }
        ensure!(
            self.laser_lane_spread >= 0.0,
            "laser_lane_spread cannot be negative"
        );
        let [min_x, max_x] = self.obstacle_x_range;
        ensure!(
            min_x < max_x,
            "obstacle_x_range is empty: [{min_x}, {max_x})"
        );
        ensure!(
            self.obstacle_exit_y > self.obstacle_moving_start_y,
            "obstacle_exit_y must lie below obstacle_moving_start_y"
        );
        ensure!(
            self.player_laser_exit_y < self.enemy_laser_exit_y,
            "laser exit lines are inverted"
        );
        ensure!(
            self.spawn_interval_min_ms <= self.spawn_interval_initial_ms,
            "spawn_interval_min_ms ({}) exceeds spawn_interval_initial_ms ({})",
            self.spawn_interval_min_ms,
            self.spawn_interval_initial_ms
        );
        ensure!(self.ramp_every_points > 0, "ramp_every_points must be non-zero");
        ensure!(!self.high_score_key.is_empty(), "high_score_key is empty");
        Ok(())
    }

    pub fn player_spawn(&self) -> Vec2 {
        Vec2::from(self.player_spawn)
    }

    /// Enemy muzzle offset from the obstacle's top-left corner
    pub fn enemy_muzzle(&self) -> Vec2 {
        Vec2::from(self.enemy_muzzle)
    }

    /// Clamp the player to the arena, each axis independently
    pub fn clamp_player(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, self.arena_width),
            pos.y.clamp(0.0, self.arena_height),
        )
    }
}
