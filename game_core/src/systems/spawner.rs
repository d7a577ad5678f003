use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use crate::components::*;
use crate::config::Config;
use crate::params::Params;
use crate::resources::*;
use crate::surface::Surface;

/// Spawn one random obstacle if the spawn interval has elapsed
pub fn spawn_obstacles(
    world: &mut World,
    surface: &mut dyn Surface,
    config: &Config,
    schedule: &mut SpawnSchedule,
    rng: &mut GameRng,
    now_ms: f64,
    events: &mut Events,
) -> Option<Entity> {
    if !schedule.is_due(now_ms) {
        return None;
    }
    schedule.mark(now_ms);

    let archetype = Archetype::ALL[rng.0.gen_range(0..Archetype::ALL.len())];
    let variant = rng.0.gen_range(1..=Params::OBSTACLE_VARIANTS);
    let [min_x, max_x] = config.obstacle_x_range;
    let x = rng.0.gen_range(min_x..max_x);
    let y = match archetype.motion {
        Motion::Moving => config.obstacle_moving_start_y,
        Motion::Stationary => config.obstacle_stationary_y,
    };

    events.obstacles_spawned += 1;
    Some(crate::spawn_obstacle(
        world,
        surface,
        archetype,
        variant,
        Vec2::new(x, y),
    ))
}

/// Let every armed obstacle whose cooldown has run out fire one laser
pub fn fire_enemy_lasers(
    world: &mut World,
    surface: &mut dyn Surface,
    config: &Config,
    now_ms: f64,
    events: &mut Events,
) {
    let mut muzzles = Vec::new();
    for (_entity, (obstacle, pos)) in world.query_mut::<(&mut Obstacle, &Position)>() {
        if !obstacle.archetype.can_shoot(config.shooter_speed_threshold) {
            continue;
        }
        let ready = obstacle
            .last_shot_ms
            .map_or(true, |last| now_ms - last > config.enemy_fire_cooldown_ms);
        if ready {
            obstacle.last_shot_ms = Some(now_ms);
            muzzles.push(pos.0 + config.enemy_muzzle());
        }
    }

    for muzzle in muzzles {
        crate::spawn_enemy_laser(world, surface, config.enemy_laser_speed, muzzle);
        events.enemy_shots += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{spawn_obstacle, ModelSurface, Visual};

    fn setup() -> (World, ModelSurface, Config, Events) {
        let config = Config::new();
        (World::new(), ModelSurface::new(&config), config, Events::new())
    }

    #[test]
    fn test_spawn_gated_by_interval() {
        let (mut world, mut surface, config, mut events) = setup();
        let mut schedule = SpawnSchedule::new(&config);
        schedule.mark(0.0);
        let mut rng = GameRng::new(7);

        assert!(spawn_obstacles(&mut world, &mut surface, &config, &mut schedule, &mut rng, 1999.0, &mut events).is_none());
        assert!(spawn_obstacles(&mut world, &mut surface, &config, &mut schedule, &mut rng, 2000.0, &mut events).is_some());
        assert!(spawn_obstacles(&mut world, &mut surface, &config, &mut schedule, &mut rng, 2500.0, &mut events).is_none());
        assert_eq!(events.obstacles_spawned, 1);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_spawn_placement() {
        let (mut world, mut surface, config, mut events) = setup();
        let mut schedule = SpawnSchedule::new(&config);
        let mut rng = GameRng::new(99);

        for i in 0..200 {
            let now = i as f64 * config.spawn_interval_initial_ms as f64;
            let entity = spawn_obstacles(&mut world, &mut surface, &config, &mut schedule, &mut rng, now, &mut events)
                .expect("due every interval");
            let pos = world.get::<&Position>(entity).unwrap().0;
            let obstacle = *world.get::<&Obstacle>(entity).unwrap();

            assert!(pos.x >= Params::OBSTACLE_MIN_X && pos.x < Params::OBSTACLE_MAX_X);
            let expected_y = if obstacle.archetype.is_stationary() {
                Params::OBSTACLE_STATIONARY_Y
            } else {
                Params::OBSTACLE_MOVING_START_Y
            };
            assert_eq!(pos.y, expected_y);

            match surface.visual(entity) {
                Some(Visual::Obstacle { variant, archetype }) => {
                    assert!((1..=4).contains(&variant));
                    assert_eq!(archetype, obstacle.archetype);
                }
                other => panic!("unexpected visual {other:?}"),
            }
        }
    }

    #[test]
    fn test_spawn_placement_follows_config() {
        let config = Config {
            obstacle_x_range: [40.0, 41.0],
            obstacle_moving_start_y: -10.0,
            obstacle_stationary_y: 30.0,
            ..Config::new()
        };
        let (mut world, mut surface, _default, mut events) = setup();
        let mut schedule = SpawnSchedule::new(&config);
        let mut rng = GameRng::new(3);

        for i in 0..50 {
            let now = i as f64 * config.spawn_interval_initial_ms as f64;
            let entity = spawn_obstacles(&mut world, &mut surface, &config, &mut schedule, &mut rng, now, &mut events)
                .expect("due every interval");
            let pos = world.get::<&Position>(entity).unwrap().0;
            assert!((40.0..41.0).contains(&pos.x));
            assert!(pos.y == -10.0 || pos.y == 30.0);
        }
    }

    #[test]
    fn test_armed_obstacle_fires_on_cooldown() {
        let (mut world, mut surface, config, mut events) = setup();
        let turret = Archetype::ALL[5];
        spawn_obstacle(&mut world, &mut surface, turret, 1, Vec2::new(30.0, 20.0));

        fire_enemy_lasers(&mut world, &mut surface, &config, 0.0, &mut events);
        assert_eq!(events.enemy_shots, 1);

        fire_enemy_lasers(&mut world, &mut surface, &config, 10_000.0, &mut events);
        assert_eq!(events.enemy_shots, 1, "cooldown not yet exceeded");

        fire_enemy_lasers(&mut world, &mut surface, &config, 10_001.0, &mut events);
        assert_eq!(events.enemy_shots, 2);

        let muzzles: Vec<Vec2> = world
            .query::<(&EnemyLaser, &Position)>()
            .iter()
            .map(|(_e, (_laser, pos))| pos.0)
            .collect();
        assert!(muzzles.iter().all(|m| *m == Vec2::new(31.5, 25.0)));
    }

    #[test]
    fn test_fast_obstacles_hold_fire() {
        let (mut world, mut surface, config, mut events) = setup();
        for archetype in &Archetype::ALL[1..4] {
            spawn_obstacle(&mut world, &mut surface, *archetype, 1, Vec2::new(30.0, 10.0));
        }
        fire_enemy_lasers(&mut world, &mut surface, &config, 0.0, &mut events);
        assert_eq!(events.enemy_shots, 0);
    }

    #[test]
    fn test_each_obstacle_has_own_cooldown() {
        let (mut world, mut surface, config, mut events) = setup();
        let castle = Archetype::ALL[4];
        spawn_obstacle(&mut world, &mut surface, castle, 2, Vec2::new(10.0, 0.0));
        fire_enemy_lasers(&mut world, &mut surface, &config, 0.0, &mut events);

        spawn_obstacle(&mut world, &mut surface, castle, 2, Vec2::new(60.0, 0.0));
        fire_enemy_lasers(&mut world, &mut surface, &config, 500.0, &mut events);

        assert_eq!(events.enemy_shots, 2);
    }
}
