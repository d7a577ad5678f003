use glam::Vec2;

/// Top-left corner of an entity, in arena percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// The player's ship. Exactly one per running session.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// How an obstacle archetype travels through the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Moving,
    Stationary,
}

/// Template an obstacle is stamped from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub emoji: &'static str,
    pub speed: f32,
    pub points: u32,
    pub motion: Motion,
}

impl Archetype {
    /// The six obstacle archetypes, picked uniformly by the spawner
    pub const ALL: [Archetype; 6] = [
        Archetype::moving("🚀", 1.0, 5),
        Archetype::moving("🛸", 1.2, 10),
        Archetype::moving("🛰️", 1.4, 15),
        Archetype::moving("💫", 1.8, 20),
        // Slow enough to shoot back
        Archetype::moving("🏰", 0.5, 45),
        Archetype {
            emoji: "🏯",
            speed: 0.0,
            points: 35,
            motion: Motion::Stationary,
        },
    ];

    const fn moving(emoji: &'static str, speed: f32, points: u32) -> Self {
        Self {
            emoji,
            speed,
            points,
            motion: Motion::Moving,
        }
    }

    pub fn is_stationary(&self) -> bool {
        self.motion == Motion::Stationary
    }

    /// Slow movers and turrets return fire
    pub fn can_shoot(&self, speed_threshold: f32) -> bool {
        self.speed < speed_threshold || self.is_stationary()
    }
}

/// Obstacle component - a descending or stationary enemy sprite
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub archetype: Archetype,
    /// Clock time of the last enemy shot, `None` until it first fires
    pub last_shot_ms: Option<f64>,
}

impl Obstacle {
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            last_shot_ms: None,
        }
    }

    pub fn points(&self) -> u32 {
        self.archetype.points
    }

    pub fn speed(&self) -> f32 {
        self.archetype.speed
    }
}

/// Which of the three spread-shot lanes a player laser flies in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserLane {
    Center,
    Left,
    Right,
}

impl LaserLane {
    pub const ALL: [LaserLane; 3] = [LaserLane::Center, LaserLane::Left, LaserLane::Right];

    /// Horizontal offset multiplier relative to the muzzle
    pub fn direction(&self) -> f32 {
        match self {
            LaserLane::Center => 0.0,
            LaserLane::Left => -1.0,
            LaserLane::Right => 1.0,
        }
    }
}

/// Player laser component - travels up
#[derive(Debug, Clone, Copy)]
pub struct PlayerLaser {
    pub lane: LaserLane,
    pub speed: f32,
}

/// Enemy laser component - travels down
#[derive(Debug, Clone, Copy)]
pub struct EnemyLaser {
    pub speed: f32,
}
