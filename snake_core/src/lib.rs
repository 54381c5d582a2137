//! Deterministic simulation core for a grid snake game.
//!
//! Rendering, audio, menus and durable storage live outside this crate and
//! talk to it through the traits in [`resources`], [`store`],
//! [`systems::input`] and [`session`].

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod game_loop;
pub mod map;
pub mod params;
pub mod progress;
pub mod resources;
pub mod session;
pub mod settings;
pub mod shop;
pub mod snake;
pub mod store;
pub mod systems;

pub use components::*;
pub use config::{Config, Difficulty};
pub use error::{CoreError, CoreResult};
pub use events::{AudioCue, EventBus, EventKind, GameEvent, SubscriptionId};
pub use fsm::{GameAction, GameState, GameStateMachine, TransitionResult};
pub use game_loop::{FrameHandler, GameLoop};
pub use map::*;
pub use params::*;
pub use progress::{
    Achievement, Achievements, GameStats, Leaderboard, LeaderboardEntry, RoundProgress,
    Statistics,
};
pub use resources::*;
pub use session::{Frontend, Game, Renderer, Services, Snapshot};
pub use settings::Settings;
pub use shop::{Purchase, Skin, Wallet};
pub use snake::SnakeEntity;
pub use store::{MemoryStore, PersistenceStore};
pub use systems::*;
