use glam::Vec2;
use hecs::{Entity, World};

use crate::components::*;
use crate::config::Config;
use crate::surface::Surface;

/// Moving obstacles fall at a rate proportional to their archetype speed
pub fn move_obstacles(world: &mut World, surface: &mut dyn Surface, config: &Config) {
    let mut moved: Vec<(Entity, Vec2)> = Vec::new();
    for (entity, (obstacle, pos)) in world.query_mut::<(&Obstacle, &mut Position)>() {
        if obstacle.archetype.is_stationary() {
            continue;
        }
        pos.0.y += obstacle.speed() * config.obstacle_fall_rate;
        moved.push((entity, pos.0));
    }
    place_all(surface, moved);
}

/// Player lasers travel up
pub fn move_player_lasers(world: &mut World, surface: &mut dyn Surface) {
    let mut moved = Vec::new();
    for (entity, (laser, pos)) in world.query_mut::<(&PlayerLaser, &mut Position)>() {
        pos.0.y -= laser.speed;
        moved.push((entity, pos.0));
    }
    place_all(surface, moved);
}

/// Enemy lasers travel down
pub fn move_enemy_lasers(world: &mut World, surface: &mut dyn Surface) {
    let mut moved = Vec::new();
    for (entity, (laser, pos)) in world.query_mut::<(&EnemyLaser, &mut Position)>() {
        pos.0.y += laser.speed;
        moved.push((entity, pos.0));
    }
    place_all(surface, moved);
}

fn place_all(surface: &mut dyn Surface, moved: Vec<(Entity, Vec2)>) {
    for (entity, pos) in moved {
        surface.place(entity, pos);
    }
}
