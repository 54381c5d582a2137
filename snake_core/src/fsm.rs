//! Game State Machine
//!
//! Owns the current game mode and the rules for moving between modes.

use serde::{Deserialize, Serialize};

/// Game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    Shop,
    Settings,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    TogglePause,
    Quit,
    /// Fatal collision reported by the collision detector
    Collide,
    Restart,
    OpenShop,
    OpenSettings,
    Back,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: GameState,
    pub to_state: GameState,
    pub action: GameAction,
}

/// Game Finite State Machine
#[derive(Debug, Clone)]
pub struct GameStateMachine {
    current: GameState,
    previous: GameState,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self {
            current: GameState::Menu,
            previous: GameState::Menu,
        }
    }

    pub fn current(&self) -> GameState {
        self.current
    }

    pub fn previous(&self) -> GameState {
        self.previous
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: GameAction) -> bool {
        self.get_next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.current;

        if let Some(next_state) = self.get_next_state(action) {
            self.previous = from_state;
            self.current = next_state;
            log::debug!("state {from_state:?} -> {next_state:?} on {action:?}");
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            log::trace!("rejected {action:?} in {from_state:?}");
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: GameAction) -> Option<GameState> {
        match (self.current, action) {
            // From Menu
            (GameState::Menu, GameAction::Start) => Some(GameState::Playing),
            (GameState::Menu, GameAction::OpenShop) => Some(GameState::Shop),
            (GameState::Menu, GameAction::OpenSettings) => Some(GameState::Settings),

            // From Playing
            (GameState::Playing, GameAction::TogglePause) => Some(GameState::Paused),
            (GameState::Playing, GameAction::Collide) => Some(GameState::GameOver),

            // From Paused
            (GameState::Paused, GameAction::TogglePause) => Some(GameState::Playing),
            (GameState::Paused, GameAction::Quit) => Some(GameState::Menu),

            // From GameOver
            (GameState::GameOver, GameAction::Restart) => Some(GameState::Menu),

            // Side menus
            (GameState::Shop, GameAction::Back) => Some(GameState::Menu),
            (GameState::Settings, GameAction::Back) => Some(GameState::Menu),

            // Invalid transition
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current == GameState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.current == GameState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.current == GameState::GameOver
    }
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
