//! Session driver
//!
//! `Session` owns every piece of mutable game state. An external frame clock
//! calls [`Session::step`] once per display frame and stops scheduling
//! frames as soon as it answers [`Frame::Stop`].

use glam::Vec2;
use hecs::World;

use crate::components::*;
use crate::config::Config;
use crate::fsm::{FsmState, GameAction, GameFsm};
use crate::resources::*;
use crate::store::KeyValueStore;
use crate::surface::{explosion_at, Surface};
use crate::systems::*;

/// Whether the frame clock should schedule another step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Continue,
    Stop,
}

pub struct Session<C: Clock, S: KeyValueStore> {
    world: World,
    fsm: GameFsm,
    config: Config,
    clock: C,
    store: S,
    rng: GameRng,
    input: InputState,
    score: Score,
    schedule: SpawnSchedule,
    last_fire_ms: Option<f64>,
    events: Events,
}

impl<C: Clock, S: KeyValueStore> Session<C, S> {
    /// Create an idle session. The high score is read from `store` here and
    /// nowhere else.
    pub fn new(config: Config, clock: C, store: S, rng: GameRng) -> Self {
        let high = store.get(&config.high_score_key).unwrap_or(0);
        Self {
            world: World::new(),
            fsm: GameFsm::new(),
            schedule: SpawnSchedule::new(&config),
            config,
            clock,
            store,
            rng,
            input: InputState::new(),
            score: Score::new(high),
            last_fire_ms: None,
            events: Events::new(),
        }
    }

    /// Begin a session from Idle or GameOver. Returns false if refused.
    pub fn start(&mut self, surface: &mut dyn Surface) -> bool {
        if !self.fsm.can_transition(GameAction::Start) {
            tracing::trace!(state = %self.fsm.state(), "start ignored");
            return false;
        }
        self.fsm.transition(GameAction::Start);
        self.reset(surface);
        true
    }

    /// Pause a running session or resume a paused one. Returns the new state,
    /// or `None` outside a session.
    pub fn toggle_pause(&mut self) -> Option<FsmState> {
        let action = if self.fsm.is_running() {
            GameAction::Pause
        } else if self.fsm.is_paused() {
            GameAction::Resume
        } else {
            return None;
        };
        let result = self.fsm.transition(action);
        tracing::info!(score = self.score.current, state = %result.to_state, "pause toggled");
        Some(result.to_state)
    }

    /// Tear down whatever is on screen and run a fresh session
    pub fn restart(&mut self, surface: &mut dyn Surface) {
        self.fsm.transition(GameAction::Restart);
        self.reset(surface);
    }

    /// Handle a key press. Ignored unless the session is running.
    pub fn key_down(&mut self, key: &str, surface: &mut dyn Surface) {
        let Some(action) = Action::from_key(key) else {
            return;
        };
        if !self.fsm.is_running() {
            tracing::trace!(key, state = %self.fsm.state(), "key ignored");
            return;
        }
        match action {
            Action::Fire => {
                self.fire(surface);
            }
            direction => press(&mut self.input, direction),
        }
    }

    /// Handle a key release. Always clears the held flag so a key let go
    /// during a pause does not stay stuck.
    pub fn key_up(&mut self, key: &str) {
        if let Some(action) = Action::from_key(key) {
            release(&mut self.input, action);
        }
    }

    /// Run one frame. Does nothing and answers `Stop` unless running.
    pub fn step(&mut self, surface: &mut dyn Surface) -> Frame {
        if !self.fsm.is_running() {
            return Frame::Stop;
        }

        self.events.clear();
        let now_ms = self.clock.now_ms();

        // 1. Held directions
        move_player(&mut self.world, surface, &self.input, &self.config);

        // 2. Spawner
        spawn_obstacles(
            &mut self.world,
            surface,
            &self.config,
            &mut self.schedule,
            &mut self.rng,
            now_ms,
            &mut self.events,
        );

        // 3. Obstacles: fall, return fire, slip past
        move_obstacles(&mut self.world, surface, &self.config);
        fire_enemy_lasers(
            &mut self.world,
            surface,
            &self.config,
            now_ms,
            &mut self.events,
        );
        despawn_passed_obstacles(
            &mut self.world,
            surface,
            &self.config,
            &mut self.score,
            &mut self.schedule,
            &mut self.events,
        );

        // 4. Lasers
        move_player_lasers(&mut self.world, surface);
        move_enemy_lasers(&mut self.world, surface);
        despawn_spent_lasers(&mut self.world, surface, &self.config);

        // 5. Collisions
        let fatal = resolve_collisions(
            &mut self.world,
            surface,
            &self.config,
            &mut self.score,
            &mut self.schedule,
            &mut self.events,
        );

        match fatal {
            Some(cause) => {
                self.game_over(surface, cause);
                Frame::Stop
            }
            None => Frame::Continue,
        }
    }

    fn fire(&mut self, surface: &mut dyn Surface) -> u32 {
        let now_ms = self.clock.now_ms();
        if !cooled_down(self.last_fire_ms, now_ms, self.config.fire_cooldown_ms) {
            tracing::trace!("fire suppressed by cooldown");
            return 0;
        }
        self.last_fire_ms = Some(now_ms);
        fire_spread(&mut self.world, surface, &self.config)
    }

    fn reset(&mut self, surface: &mut dyn Surface) {
        crate::despawn_all(&mut self.world, surface);
        self.score.reset();
        self.schedule.reset(&self.config);
        self.last_fire_ms = None;
        self.input.clear();
        self.events.clear();
        crate::spawn_player(&mut self.world, surface, self.config.player_spawn());
        tracing::info!(high_score = self.score.high, "session started");
    }

    fn game_over(&mut self, surface: &mut dyn Surface, cause: Fatal) {
        self.fsm.transition(GameAction::Crash);
        self.input.clear();

        if self.score.record_high() {
            self.store.set(&self.config.high_score_key, self.score.high);
            tracing::info!(high_score = self.score.high, "new high score");
        }

        let size = Vec2::from(self.config.player_size);
        let center = crate::player_entity(&self.world)
            .and_then(|player| crate::entity_rect(&self.world, &*surface, player, size))
            .map(|rect| rect.center());
        if let Some(at) = center {
            surface.effect(explosion_at(at));
        }

        tracing::info!(score = self.score.current, ?cause, "game over");
    }

    pub fn state(&self) -> FsmState {
        self.fsm.state()
    }

    pub fn score(&self) -> u32 {
        self.score.current
    }

    pub fn high_score(&self) -> u32 {
        self.score.high
    }

    pub fn spawn_interval_ms(&self) -> u32 {
        self.schedule.interval_ms
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.world
            .query::<(&Player, &Position)>()
            .iter()
            .next()
            .map(|(_e, (_player, pos))| pos.0)
    }

    pub fn obstacle_count(&self) -> usize {
        self.count::<Obstacle>()
    }

    pub fn player_laser_count(&self) -> usize {
        self.count::<PlayerLaser>()
    }

    pub fn enemy_laser_count(&self) -> usize {
        self.count::<EnemyLaser>()
    }

    /// What happened during the most recent step
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn count<T: hecs::Component>(&self) -> usize {
        self.world.query::<&T>().iter().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, MemoryStore, ModelSurface, Params};

    fn session() -> (Session<ManualClock, MemoryStore>, ManualClock, ModelSurface) {
        let config = Config::new();
        let clock = ManualClock::new(1_000.0);
        let surface = ModelSurface::new(&config);
        let session = Session::new(config, clock.clone(), MemoryStore::new(), GameRng::new(1));
        (session, clock, surface)
    }

    #[test]
    fn test_new_session_is_idle() {
        let (mut session, _clock, mut surface) = session();
        assert_eq!(session.state(), FsmState::Idle);
        assert_eq!(session.step(&mut surface), Frame::Stop);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_high_score_read_at_startup() {
        let store = MemoryStore::with(Params::HIGH_SCORE_KEY, 420);
        let session = Session::new(Config::new(), ManualClock::new(0.0), store, GameRng::new(1));
        assert_eq!(session.high_score(), 420);
    }

    #[test]
    fn test_start_places_player() {
        let (mut session, _clock, mut surface) = session();
        assert!(session.start(&mut surface));
        assert_eq!(session.state(), FsmState::Running);
        assert_eq!(session.player_position(), Some(Vec2::new(50.0, 80.0)));
        assert_eq!(surface.len(), 1);
        assert!(!session.start(&mut surface), "start is refused mid-session");
    }

    #[test]
    fn test_keys_ignored_while_paused() {
        let (mut session, _clock, mut surface) = session();
        session.start(&mut surface);
        assert_eq!(session.toggle_pause(), Some(FsmState::Paused));

        session.key_down("ArrowRight", &mut surface);
        session.key_down(" ", &mut surface);
        assert!(!session.input().right);
        assert_eq!(session.player_laser_count(), 0);
        assert_eq!(session.step(&mut surface), Frame::Stop);

        assert_eq!(session.toggle_pause(), Some(FsmState::Running));
        assert_eq!(session.step(&mut surface), Frame::Continue);
    }

    #[test]
    fn test_held_keys_survive_pause_but_not_release() {
        let (mut session, _clock, mut surface) = session();
        session.start(&mut surface);
        session.key_down("d", &mut surface);
        session.toggle_pause();
        assert!(session.input().right);
        session.key_up("d");
        session.toggle_pause();
        assert!(!session.input().right);
    }

    #[test]
    fn test_toggle_pause_outside_session() {
        let (mut session, _clock, _surface) = session();
        assert_eq!(session.toggle_pause(), None);
        assert_eq!(session.state(), FsmState::Idle);
    }

    #[test]
    fn test_fire_cooldown() {
        let (mut session, clock, mut surface) = session();
        session.start(&mut surface);

        session.key_down(" ", &mut surface);
        assert_eq!(session.player_laser_count(), 3);

        clock.advance(199.0);
        session.key_down(" ", &mut surface);
        assert_eq!(session.player_laser_count(), 3);

        clock.advance(1.0);
        session.key_down(" ", &mut surface);
        assert_eq!(session.player_laser_count(), 6);
    }

    #[test]
    fn test_unknown_keys_change_nothing() {
        let (mut session, _clock, mut surface) = session();
        session.start(&mut surface);
        session.key_down("Enter", &mut surface);
        session.key_up("Escape");
        assert_eq!(*session.input(), InputState::new());
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn test_first_obstacle_spawns_on_first_frame() {
        let (mut session, clock, mut surface) = session();
        clock.advance(49_000.0);
        session.start(&mut surface);

        session.step(&mut surface);
        assert_eq!(session.obstacle_count(), 1);
        assert_eq!(session.events().obstacles_spawned, 1);

        clock.advance(1_999.0);
        session.step(&mut surface);
        assert_eq!(session.events().obstacles_spawned, 0);

        clock.advance(1.0);
        session.step(&mut surface);
        assert_eq!(session.events().obstacles_spawned, 1);
    }

    #[test]
    fn test_restart_spawns_on_first_frame_again() {
        let (mut session, clock, mut surface) = session();
        session.start(&mut surface);
        session.step(&mut surface);
        clock.advance(500.0);

        session.restart(&mut surface);
        session.step(&mut surface);
        assert_eq!(session.events().obstacles_spawned, 1);
    }
}
