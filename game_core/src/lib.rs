pub mod components;
pub mod config;
pub mod fsm;
pub mod geometry;
pub mod params;
pub mod resources;
pub mod session;
pub mod store;
pub mod surface;
pub mod systems;

pub use components::*;
pub use config::*;
pub use fsm::*;
pub use geometry::*;
pub use params::*;
pub use resources::*;
pub use session::*;
pub use store::*;
pub use surface::*;

use glam::Vec2;
use hecs::{Entity, World};

/// Create the player ship and show it
pub fn spawn_player(world: &mut World, surface: &mut dyn Surface, pos: Vec2) -> Entity {
    let entity = world.spawn((Player, Position(pos)));
    surface.attach(entity, Visual::Player, pos);
    entity
}

/// Create an obstacle and show it
pub fn spawn_obstacle(
    world: &mut World,
    surface: &mut dyn Surface,
    archetype: Archetype,
    variant: u8,
    pos: Vec2,
) -> Entity {
    let entity = world.spawn((Obstacle::new(archetype), Position(pos)));
    surface.attach(entity, Visual::Obstacle { archetype, variant }, pos);
    entity
}

/// Create one player laser and show it
pub fn spawn_player_laser(
    world: &mut World,
    surface: &mut dyn Surface,
    lane: LaserLane,
    speed: f32,
    pos: Vec2,
) -> Entity {
    let entity = world.spawn((PlayerLaser { lane, speed }, Position(pos)));
    surface.attach(entity, Visual::PlayerLaser(lane), pos);
    entity
}

/// Create one enemy laser and show it
pub fn spawn_enemy_laser(
    world: &mut World,
    surface: &mut dyn Surface,
    speed: f32,
    pos: Vec2,
) -> Entity {
    let entity = world.spawn((EnemyLaser { speed }, Position(pos)));
    surface.attach(entity, Visual::EnemyLaser, pos);
    entity
}

/// Remove an entity together with its visual. Unknown ids are ignored.
pub fn despawn(world: &mut World, surface: &mut dyn Surface, entity: Entity) {
    let _ = world.despawn(entity);
    surface.detach(entity);
}

/// Remove every entity and every visual
pub fn despawn_all(world: &mut World, surface: &mut dyn Surface) {
    let entities: Vec<Entity> = world.iter().map(|entity| entity.entity()).collect();
    for entity in entities {
        surface.detach(entity);
    }
    world.clear();
}

/// The live player entity, if any
pub fn player_entity(world: &World) -> Option<Entity> {
    world
        .query::<&Player>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
}

/// Box for an entity: the surface's view first, the model position second
pub fn entity_rect<G: Geometry + ?Sized>(
    world: &World,
    geometry: &G,
    entity: Entity,
    size: Vec2,
) -> Option<Aabb> {
    geometry.rect(entity).or_else(|| {
        world
            .get::<&Position>(entity)
            .ok()
            .map(|pos| Aabb::from_origin_size(pos.0, size))
    })
}
