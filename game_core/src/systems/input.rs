use glam::Vec2;
use hecs::World;

use crate::components::*;
use crate::config::Config;
use crate::resources::InputState;
use crate::surface::Surface;

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl Action {
    /// Map a browser key identifier; unknown keys map to nothing
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Some(Action::Up),
            "s" | "arrowdown" => Some(Action::Down),
            "a" | "arrowleft" => Some(Action::Left),
            "d" | "arrowright" => Some(Action::Right),
            " " | "space" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Set the held flag for a direction. Fire has no held state.
pub fn press(input: &mut InputState, action: Action) {
    set_held(input, action, true);
}

pub fn release(input: &mut InputState, action: Action) {
    set_held(input, action, false);
}

fn set_held(input: &mut InputState, action: Action, held: bool) {
    match action {
        Action::Up => input.up = held,
        Action::Down => input.down = held,
        Action::Left => input.left = held,
        Action::Right => input.right = held,
        Action::Fire => {}
    }
}

/// True once `cooldown_ms` has elapsed since `last_ms`, or if it never fired
pub fn cooled_down(last_ms: Option<f64>, now_ms: f64, cooldown_ms: f64) -> bool {
    last_ms.map_or(true, |last| now_ms - last >= cooldown_ms)
}

/// Apply held directions to the player, clamped to the arena
pub fn move_player(world: &mut World, surface: &mut dyn Surface, input: &InputState, config: &Config) {
    let (dx, dy) = input.axis();
    if dx == 0.0 && dy == 0.0 {
        return;
    }

    let mut moved = Vec::new();
    for (entity, (_player, pos)) in world.query_mut::<(&Player, &mut Position)>() {
        let next = config.clamp_player(pos.0 + Vec2::new(dx, dy) * config.player_speed);
        if next != pos.0 {
            pos.0 = next;
            moved.push((entity, next));
        }
    }

    for (entity, pos) in moved {
        surface.place(entity, pos);
    }
}

/// Fire the three-lane spread from the player's current position.
/// Returns the number of lasers created.
pub fn fire_spread(world: &mut World, surface: &mut dyn Surface, config: &Config) -> u32 {
    let origin = world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_e, (_player, pos))| pos.0);

    let Some(origin) = origin else {
        return 0;
    };

    let muzzle = origin + Vec2::new(config.player_muzzle_x, 0.0);
    for lane in LaserLane::ALL {
        let pos = muzzle + Vec2::new(lane.direction() * config.laser_lane_spread, 0.0);
        crate::spawn_player_laser(world, surface, lane, config.player_laser_speed, pos);
    }
    LaserLane::ALL.len() as u32
}
