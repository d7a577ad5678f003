//! Rendering surface seam
//!
//! The core never draws. It tells a [`Surface`] when a visual element is
//! created, moved or removed, and asks it (through [`Geometry`]) where that
//! element ended up on screen.

use std::collections::HashMap;

use glam::Vec2;
use hecs::Entity;

use crate::components::{Archetype, LaserLane};
use crate::config::Config;
use crate::geometry::{Aabb, Geometry};
use crate::params::Params;

/// Presentation tag for an entity's visual element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    Player,
    Obstacle {
        archetype: Archetype,
        /// Cosmetic variant class, 1 through 4
        variant: u8,
    },
    PlayerLaser(LaserLane),
    EnemyLaser,
}

/// Colour family of a particle burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstTone {
    /// An obstacle slipped past the bottom edge
    Passed,
    /// An obstacle was shot down
    Hit,
    /// The player's ship blew up
    Explosion,
}

impl BurstTone {
    pub fn color(&self) -> &'static str {
        match self {
            BurstTone::Passed => "#00ffff",
            BurstTone::Hit => "#ff6b6b",
            BurstTone::Explosion => "#ff4757",
        }
    }
}

/// Fire-and-forget visual effect, positioned in geometry space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Burst {
        at: Vec2,
        tone: BurstTone,
    },
    /// Repeated explosion bursts, `interval_ms` apart
    Explosion {
        at: Vec2,
        waves: u32,
        interval_ms: u32,
    },
}

/// Where entities become visible.
///
/// `detach` and `place` must be no-ops for ids the surface does not know.
pub trait Surface: Geometry {
    fn attach(&mut self, entity: Entity, visual: Visual, pos: Vec2);
    fn place(&mut self, entity: Entity, pos: Vec2);
    fn detach(&mut self, entity: Entity);
    fn effect(&mut self, effect: Effect);
}

/// Headless surface: keeps placements in memory and derives boxes from the
/// configured model sizes.
#[derive(Debug, Clone)]
pub struct ModelSurface {
    player_size: Vec2,
    obstacle_size: Vec2,
    laser_size: Vec2,
    elements: HashMap<Entity, (Visual, Vec2)>,
    effects: Vec<Effect>,
}

impl ModelSurface {
    pub fn new(config: &Config) -> Self {
        Self {
            player_size: Vec2::from(config.player_size),
            obstacle_size: Vec2::from(config.obstacle_size),
            laser_size: Vec2::from(config.laser_size),
            elements: HashMap::new(),
            effects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.elements.contains_key(&entity)
    }

    pub fn visual(&self, entity: Entity) -> Option<Visual> {
        self.elements.get(&entity).map(|(visual, _)| *visual)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.elements.get(&entity).map(|(_, pos)| *pos)
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    fn size_of(&self, visual: &Visual) -> Vec2 {
        match visual {
            Visual::Player => self.player_size,
            Visual::Obstacle { .. } => self.obstacle_size,
            Visual::PlayerLaser(_) | Visual::EnemyLaser => self.laser_size,
        }
    }
}

impl Default for ModelSurface {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Geometry for ModelSurface {
    fn rect(&self, entity: Entity) -> Option<Aabb> {
        self.elements
            .get(&entity)
            .map(|(visual, pos)| Aabb::from_origin_size(*pos, self.size_of(visual)))
    }
}

impl Surface for ModelSurface {
    fn attach(&mut self, entity: Entity, visual: Visual, pos: Vec2) {
        self.elements.insert(entity, (visual, pos));
    }

    fn place(&mut self, entity: Entity, pos: Vec2) {
        if let Some((_, current)) = self.elements.get_mut(&entity) {
            *current = pos;
        }
    }

    fn detach(&mut self, entity: Entity) {
        self.elements.remove(&entity);
    }

    fn effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

/// Explosion effect for the player's last position
pub fn explosion_at(at: Vec2) -> Effect {
    Effect::Explosion {
        at,
        waves: Params::EXPLOSION_WAVES,
        interval_ms: Params::EXPLOSION_WAVE_INTERVAL_MS,
    }
}

/// Where one burst particle starts: `at` offset by up to half the burst
/// spread on each axis. `roll` holds two uniform samples in `[0, 1)`.
pub fn scatter(at: Vec2, roll: Vec2) -> Vec2 {
    at + (roll - Vec2::splat(0.5)) * Params::BURST_SPREAD_PX
}
