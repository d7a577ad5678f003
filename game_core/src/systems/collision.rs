use glam::Vec2;
use hecs::{Entity, World};

use crate::components::*;
use crate::config::Config;
use crate::geometry::{Aabb, Geometry};
use crate::resources::*;
use crate::surface::{BurstTone, Effect, Surface};

/// Resolve this frame's collisions in order: player lasers against
/// obstacles, then the player against obstacles, then the player against
/// enemy lasers. The first fatal hit stops the pass.
pub fn resolve_collisions(
    world: &mut World,
    surface: &mut dyn Surface,
    config: &Config,
    score: &mut Score,
    schedule: &mut SpawnSchedule,
    events: &mut Events,
) -> Option<Fatal> {
    resolve_laser_hits(world, surface, config, score, schedule, events);

    let player = crate::player_entity(world)?;
    let player_rect = surface.rect(player)?;

    let obstacles = boxes::<Obstacle, _>(world, &*surface);
    if obstacles.iter().any(|(_e, rect)| player_rect.overlaps(rect)) {
        events.fatal = Some(Fatal::ObstacleCrash);
        return events.fatal;
    }

    let enemy_lasers = boxes::<EnemyLaser, _>(world, &*surface);
    if let Some((laser, _rect)) = enemy_lasers
        .iter()
        .find(|(_e, rect)| player_rect.overlaps(rect))
    {
        crate::despawn(world, surface, *laser);
        events.fatal = Some(Fatal::EnemyLaser);
        return events.fatal;
    }

    None
}

/// Pair each player laser with at most one obstacle and each obstacle with
/// at most one laser, lowest entity ids first
fn resolve_laser_hits(
    world: &mut World,
    surface: &mut dyn Surface,
    config: &Config,
    score: &mut Score,
    schedule: &mut SpawnSchedule,
    events: &mut Events,
) {
    let lasers = boxes::<PlayerLaser, _>(world, &*surface);
    let mut obstacles: Vec<Option<(Entity, Aabb)>> = boxes::<Obstacle, _>(world, &*surface)
        .into_iter()
        .map(Some)
        .collect();

    let mut hits: Vec<(Entity, Entity, Vec2)> = Vec::new();
    for (laser, laser_rect) in lasers {
        let matched = obstacles.iter_mut().find(|slot| {
            slot.as_ref()
                .is_some_and(|(_e, rect)| laser_rect.overlaps(rect))
        });
        if let Some(slot) = matched {
            if let Some((obstacle, rect)) = slot.take() {
                hits.push((laser, obstacle, rect.center()));
            }
        }
    }

    for (laser, obstacle, center) in hits {
        let points = world
            .get::<&Obstacle>(obstacle)
            .map(|o| o.points())
            .unwrap_or(0);

        crate::despawn(world, surface, laser);
        crate::despawn(world, surface, obstacle);

        super::award(
            score,
            schedule,
            config,
            events,
            points * crate::params::Params::HIT_MULTIPLIER,
        );
        events.obstacles_destroyed += 1;
        surface.effect(Effect::Burst {
            at: center,
            tone: BurstTone::Hit,
        });
    }
}

/// Current boxes of every entity carrying `T`, sorted by entity id.
/// Entities the geometry cannot see are left out.
fn boxes<T, G>(world: &World, geometry: &G) -> Vec<(Entity, Aabb)>
where
    T: hecs::Component,
    G: Geometry + ?Sized,
{
    let mut entities: Vec<Entity> = world
        .query::<&T>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    entities.sort_by_key(|e| e.id());

    entities
        .into_iter()
        .filter_map(|entity| geometry.rect(entity).map(|rect| (entity, rect)))
        .collect()
}
