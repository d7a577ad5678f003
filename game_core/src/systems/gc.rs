use glam::Vec2;
use hecs::{Entity, World};

use crate::components::*;
use crate::config::Config;
use crate::resources::*;
use crate::surface::{BurstTone, Effect, Surface};

/// Despawn moving obstacles that slipped past the bottom edge. Each one
/// still pays out its points and leaves a burst behind.
pub fn despawn_passed_obstacles(
    world: &mut World,
    surface: &mut dyn Surface,
    config: &Config,
    score: &mut Score,
    schedule: &mut SpawnSchedule,
    events: &mut Events,
) {
    let mut passed: Vec<(Entity, u32)> = world
        .query::<(&Obstacle, &Position)>()
        .iter()
        .filter(|(_e, (obstacle, pos))| {
            !obstacle.archetype.is_stationary() && pos.0.y > config.obstacle_exit_y
        })
        .map(|(entity, (obstacle, _pos))| (entity, obstacle.points()))
        .collect();
    passed.sort_by_key(|(entity, _)| entity.id());

    let size = Vec2::from(config.obstacle_size);
    for (entity, points) in passed {
        let center = crate::entity_rect(world, &*surface, entity, size).map(|rect| rect.center());
        crate::despawn(world, surface, entity);
        super::award(score, schedule, config, events, points);
        events.obstacles_passed += 1;
        if let Some(at) = center {
            surface.effect(Effect::Burst {
                at,
                tone: BurstTone::Passed,
            });
        }
    }
}

/// Despawn lasers that left the arena
pub fn despawn_spent_lasers(world: &mut World, surface: &mut dyn Surface, config: &Config) {
    let mut spent: Vec<Entity> = Vec::new();

    for (entity, (_laser, pos)) in world.query::<(&PlayerLaser, &Position)>().iter() {
        if pos.0.y < config.player_laser_exit_y {
            spent.push(entity);
        }
    }
    for (entity, (_laser, pos)) in world.query::<(&EnemyLaser, &Position)>().iter() {
        if pos.0.y > config.enemy_laser_exit_y {
            spent.push(entity);
        }
    }

    for entity in spent {
        crate::despawn(world, surface, entity);
    }
}
