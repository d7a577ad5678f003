//! Game State Machine
//!
//! Idle → Running ⇄ Paused, Running → GameOver → Running. Restart is
//! accepted from every state and always lands in Running.

use std::fmt;
use std::str::FromStr;

/// Game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmState {
    Idle,
    Running,
    Paused,
    GameOver,
}

impl FsmState {
    /// Running or Paused
    pub fn in_session(self) -> bool {
        matches!(self, FsmState::Running | FsmState::Paused)
    }
}

impl fmt::Display for FsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    Pause,
    Resume,
    Crash,
    Restart,
}

impl FromStr for GameAction {
    type Err = String;

    fn from_str(action: &str) -> Result<Self, Self::Err> {
        match action {
            "START" => Ok(GameAction::Start),
            "PAUSE" => Ok(GameAction::Pause),
            "RESUME" => Ok(GameAction::Resume),
            "CRASH" => Ok(GameAction::Crash),
            "RESTART" => Ok(GameAction::Restart),
            other => Err(format!("unknown game action {other:?}")),
        }
    }
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: FsmState,
    pub to_state: FsmState,
    pub action: GameAction,
}

/// Game Finite State Machine
#[derive(Debug, Clone)]
pub struct GameFsm {
    state: FsmState,
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            state: FsmState::Idle,
        }
    }

    /// Get current state
    pub fn state(&self) -> FsmState {
        self.state
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: GameAction) -> bool {
        self.get_next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: GameAction) -> Option<FsmState> {
        match (self.state, action) {
            (FsmState::Idle | FsmState::GameOver, GameAction::Start) => Some(FsmState::Running),

            (FsmState::Running, GameAction::Pause) => Some(FsmState::Paused),
            (FsmState::Running, GameAction::Crash) => Some(FsmState::GameOver),

            (FsmState::Paused, GameAction::Resume) => Some(FsmState::Running),

            (_, GameAction::Restart) => Some(FsmState::Running),

            // Invalid transition
            _ => None,
        }
    }

    /// Check if frames should be produced
    pub fn is_running(&self) -> bool {
        self.state == FsmState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == FsmState::Paused
    }
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let fsm = GameFsm::new();
        assert_eq!(fsm.state(), FsmState::Idle);
    }

    #[test]
    fn test_valid_transition() {
        let mut fsm = GameFsm::new();
        let result = fsm.transition(GameAction::Start);
        assert!(result.success);
        assert_eq!(result.from_state, FsmState::Idle);
        assert_eq!(fsm.state(), FsmState::Running);
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = GameFsm::new();
        let result = fsm.transition(GameAction::Pause);
        assert!(!result.success);
        assert_eq!(result.to_state, FsmState::Idle);
        assert_eq!(fsm.state(), FsmState::Idle);
    }

    #[test]
    fn test_start_rejected_mid_session() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::Start);
        assert!(!fsm.can_transition(GameAction::Start));
        fsm.transition(GameAction::Pause);
        assert!(!fsm.can_transition(GameAction::Start));
    }

    #[test]
    fn test_session_flow() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::Start);
        fsm.transition(GameAction::Pause);
        assert_eq!(fsm.state(), FsmState::Paused);
        assert!(!fsm.can_transition(GameAction::Crash));
        fsm.transition(GameAction::Resume);
        assert_eq!(fsm.state(), FsmState::Running);
        fsm.transition(GameAction::Crash);
        assert_eq!(fsm.state(), FsmState::GameOver);
        assert!(!fsm.can_transition(GameAction::Pause));
        fsm.transition(GameAction::Start);
        assert_eq!(fsm.state(), FsmState::Running);
    }

    #[test]
    fn test_restart_from_every_state() {
        for setup in [
            vec![],
            vec![GameAction::Start],
            vec![GameAction::Start, GameAction::Pause],
            vec![GameAction::Start, GameAction::Crash],
        ] {
            let mut fsm = GameFsm::new();
            for action in setup {
                fsm.transition(action);
            }
            assert!(fsm.transition(GameAction::Restart).success);
            assert_eq!(fsm.state(), FsmState::Running);
        }
    }

    #[test]
    fn test_in_session() {
        assert!(!FsmState::Idle.in_session());
        assert!(FsmState::Running.in_session());
        assert!(FsmState::Paused.in_session());
        assert!(!FsmState::GameOver.in_session());
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("START".parse::<GameAction>(), Ok(GameAction::Start));
        assert_eq!("RESTART".parse::<GameAction>(), Ok(GameAction::Restart));
        assert!("JUMP".parse::<GameAction>().is_err());
    }
}
