//! One play session: the simulation components wired together.
//!
//! [`Game`] owns the snake, the arena, scoring, effects, the mode machine
//! and the player's progression. Hosts feed it fixed steps through
//! [`Game::update`] (usually via [`GameLoop`](crate::GameLoop)), send it
//! menu commands, and read [`Snapshot`]s back for drawing.

use std::rc::Rc;

use serde::Serialize;

use crate::components::{dir, ObjectKind, Vector2};
use crate::config::{Config, Difficulty};
use crate::error::CoreResult;
use crate::events::{AudioCue, EventBus, EventKind, GameEvent, SubscriptionId};
use crate::fsm::{GameAction, GameState, GameStateMachine, TransitionResult};
use crate::game_loop::FrameHandler;
use crate::map::Arena;
use crate::params::Params;
use crate::progress::{
    Achievement, Achievements, GameStats, Leaderboard, LeaderboardEntry, RoundProgress,
    Statistics,
};
use crate::resources::{Clock, GameRng};
use crate::settings::Settings;
use crate::shop::{Purchase, Skin, Wallet};
use crate::snake::SnakeEntity;
use crate::store::PersistenceStore;
use crate::systems::collision::{check_collision, CollisionKind, CollisionResult};
use crate::systems::effects::{Effect, EffectKind, EffectScheduler, EffectView};
use crate::systems::food::FoodSpawner;
use crate::systems::input::InputSource;
use crate::systems::movement::move_snake;
use crate::systems::scoring::ScoreTracker;

/// Collaborators injected by the host
pub struct Services {
    pub input: Box<dyn InputSource>,
    pub store: Rc<dyn PersistenceStore>,
    /// Monotonic session time for combos and round length
    pub clock: Rc<dyn Clock>,
    /// Calendar time for leaderboard dates
    pub wall_clock: Rc<dyn Clock>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub grid_size: i32,
    pub segments: Vec<Vector2>,
    pub direction: Vector2,
    pub food: Option<Vector2>,
    pub hazards: Vec<Vector2>,
    pub score: u32,
    pub high_score: u32,
    pub combo: u32,
    pub mode: GameState,
    pub currency: u32,
    pub current_skin: Skin,
    pub owned_skins: Vec<Skin>,
    pub settings: Settings,
    pub effects: Vec<EffectView>,
}

pub struct Game {
    config: Config,
    settings: Settings,
    fsm: GameStateMachine,
    initial_snake: SnakeEntity,
    snake: SnakeEntity,
    arena: Arena,
    spawner: FoodSpawner,
    scores: ScoreTracker,
    effects: EffectScheduler,
    wallet: Wallet,
    stats: Statistics,
    leaderboard: Leaderboard,
    achievements: Achievements,
    player_name: String,
    round_food: u32,
    bus: EventBus,
    input: Box<dyn InputSource>,
    store: Rc<dyn PersistenceStore>,
    clock: Rc<dyn Clock>,
    wall_clock: Rc<dyn Clock>,
}

impl Game {
    pub fn new(config: Config, services: Services) -> CoreResult<Self> {
        config.validate()?;

        let Services {
            input,
            store,
            clock,
            wall_clock,
        } = services;

        let initial_snake = SnakeEntity::spawn(
            config.spawn_head(),
            dir::RIGHT,
            config.initial_snake_length,
        )?;
        let settings = Settings::load(store.as_ref());
        let scores = ScoreTracker::new(clock.clone(), store.clone())
            .with_combo_timeout(config.combo_timeout_ms);
        let wallet = Wallet::load(store.clone());
        let spawner = FoodSpawner::new(config.grid_size, GameRng::new(config.rng_seed));
        let arena = Arena::new(&config.hazards);

        let mut game = Self {
            snake: initial_snake.clone(),
            initial_snake,
            settings,
            fsm: GameStateMachine::new(),
            arena,
            spawner,
            scores,
            effects: EffectScheduler::new(),
            wallet,
            stats: Statistics::load(store.clone()),
            leaderboard: Leaderboard::load(store.clone()),
            achievements: Achievements::load(store.clone()),
            player_name: Params::DEFAULT_PLAYER_NAME.to_string(),
            round_food: 0,
            bus: EventBus::new(),
            input,
            store,
            clock,
            wall_clock,
            config,
        };
        game.respawn_food();

        log::debug!(
            "game ready: {}x{} grid, difficulty {:?}, high score {}",
            game.config.grid_size,
            game.config.grid_size,
            game.settings.difficulty,
            game.scores.high_score()
        );
        Ok(game)
    }

    /// Advance the session by one fixed step.
    ///
    /// The snake only moves while Playing; effects run in every mode.
    pub fn update(&mut self, dt_ms: f64) {
        if self.fsm.is_playing() {
            let interval = self.settings.move_interval_ms();
            if move_snake(&mut self.snake, self.input.as_mut(), dt_ms, interval) {
                self.resolve_collision();
            }
        }
        self.effects.update(dt_ms);
    }

    fn resolve_collision(&mut self) {
        let objects = self.arena.objects();
        match check_collision(&self.snake, &objects, self.config.grid_size) {
            CollisionResult::Clear => {}
            CollisionResult::SelfHit => self.end_round(CollisionKind::SelfHit),
            CollisionResult::Wall => self.end_round(CollisionKind::Wall),
            CollisionResult::Object(entity) => match self.arena.kind_of(entity) {
                Some(ObjectKind::Food) => self.eat_food(),
                Some(ObjectKind::Hazard) => self.end_round(CollisionKind::Hazard),
                None => log::warn!("collided with unknown entity {entity:?}"),
            },
        }
    }

    fn eat_food(&mut self) {
        let at = self.snake.head();
        self.snake.grow();

        let update = self.scores.add_score(self.config.score_per_food);
        let coins = self.coins_for(self.config.score_per_food);
        let currency = self.wallet.add_currency(coins);
        let food = self.respawn_food();

        self.schedule(
            EffectKind::FoodSpawn {
                scale_start: Params::FOOD_SPAWN_SCALE_START,
                scale_end: Params::FOOD_SPAWN_SCALE_END,
            },
            food,
            Params::FOOD_SPAWN_MS,
        );
        self.schedule(
            EffectKind::ScorePopup {
                points: update.points,
            },
            at,
            Params::SCORE_POPUP_MS,
        );
        self.schedule(EffectKind::CoinPopup { coins }, at, Params::COIN_POPUP_MS);

        self.bus.emit(GameEvent::Collision(CollisionKind::Food));
        self.bus.emit(GameEvent::FoodEaten {
            at,
            points: update.points,
        });
        self.bus.emit(GameEvent::ScoreChanged {
            score: update.score,
            combo: update.combo,
        });
        self.bus.emit(GameEvent::CurrencyChanged(currency));
        self.play(AudioCue::Eat);

        self.stats.record_food();
        self.round_food += 1;
        let progress = RoundProgress {
            food_eaten: self.round_food,
            snake_length: self.snake.len() + usize::from(self.snake.has_pending_growth()),
            score: update.score,
            combo: update.combo,
        };
        for achievement in self.achievements.check(&progress) {
            self.bus.emit(GameEvent::AchievementUnlocked(achievement));
        }

        log::debug!(
            "ate food at {at}: +{} (combo {}), +{coins} coins, next food at {food}",
            update.points,
            update.combo
        );
    }

    fn end_round(&mut self, kind: CollisionKind) {
        self.bus.emit(GameEvent::Collision(kind));
        if !self.transition(GameAction::Collide).success {
            return;
        }

        self.scores.persist_high_score();
        self.record_round(true);
        self.play(AudioCue::MusicStop);
        self.play(AudioCue::Die);
        self.schedule(
            EffectKind::SnakeDeath {
                segments: self.snake.segments_vec(),
                stagger_ms: Params::SNAKE_DIE_STAGGER_MS,
            },
            self.snake.head(),
            Params::SNAKE_DIE_MS,
        );

        log::info!(
            "round over ({kind:?}) with score {}, best {}",
            self.scores.score(),
            self.scores.high_score()
        );
    }

    /// Fold the finished round into the lifetime records. Abandoned rounds
    /// count towards statistics but not the leaderboard.
    fn record_round(&mut self, completed: bool) {
        let now = self.clock.now();
        let score = self.scores.score();
        let length = self.snake.len();
        let play_time_ms = self.stats.round_time_ms(now).unwrap_or(0.0);
        if !self.stats.end_round(score, length, now) || !completed {
            return;
        }

        let entry = LeaderboardEntry {
            player_name: self.player_name.clone(),
            score,
            date_ms: self.wall_clock.now(),
            snake_length: length,
            play_time_ms,
        };
        if let Some(rank) = self.leaderboard.add_score(entry) {
            log::info!("{} placed #{} on the leaderboard with {score}", self.player_name, rank + 1);
            self.bus.emit(GameEvent::LeaderboardUpdated { rank, score });
        }
    }

    /// Coins paid for `points`, scaled by difficulty and rounded up
    fn coins_for(&self, points: u32) -> u32 {
        (points * self.settings.difficulty.score_multiplier()).div_ceil(10)
    }

    /// Place new food on a free cell and return it
    fn respawn_food(&mut self) -> Vector2 {
        let mut occupied = self.snake.segments_vec();
        occupied.extend(self.arena.hazard_cells());
        let cell = self.spawner.generate_valid_food(&occupied);
        self.arena.place_food(cell);
        cell
    }

    fn reset_round(&mut self) {
        self.snake = self.initial_snake.clone();
        self.scores.reset();
        self.effects.clear();
        self.round_food = 0;
        self.stats.start_round(self.clock.now());
        // Drop a turn requested before the round began
        let _ = self.input.current_direction();
        self.respawn_food();

        self.schedule(
            EffectKind::GameStart,
            self.config.spawn_head(),
            Params::GAME_START_MS,
        );
        self.bus.emit(GameEvent::ScoreChanged { score: 0, combo: 0 });
        self.play(AudioCue::MusicStart);

        log::info!(
            "round started on {:?}, move every {:.1}ms",
            self.settings.difficulty,
            self.settings.move_interval_ms()
        );
    }

    fn schedule(&mut self, kind: EffectKind, at: Vector2, duration_ms: f64) {
        if let Err(err) = self.effects.add_effect(Effect::new(kind, at, duration_ms)) {
            log::warn!("dropped effect: {err}");
        }
    }

    /// Emit an audio cue unless the player muted that channel
    fn play(&mut self, cue: AudioCue) {
        let enabled = match cue {
            AudioCue::MusicStart | AudioCue::MusicStop => self.settings.music_enabled,
            _ => self.settings.sound_enabled,
        };
        if enabled {
            self.bus.emit(GameEvent::Audio(cue));
        }
    }

    fn transition(&mut self, action: GameAction) -> TransitionResult {
        let result = self.fsm.transition(action);
        if result.success {
            self.bus.emit(GameEvent::StateChanged {
                from: result.from_state,
                to: result.to_state,
            });
        }
        result
    }

    // Commands. Each returns false (or None) when the current mode does
    // not accept it, leaving the session untouched.

    /// Menu -> Playing with a fresh round
    pub fn start(&mut self) -> bool {
        if !self.transition(GameAction::Start).success {
            return false;
        }
        self.reset_round();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        let result = self.transition(GameAction::TogglePause);
        if !result.success {
            return false;
        }
        match result.to_state {
            GameState::Paused => self.play(AudioCue::MusicStop),
            _ => self.play(AudioCue::MusicStart),
        }
        true
    }

    /// Abandon a paused round
    pub fn quit(&mut self) -> bool {
        if !self.transition(GameAction::Quit).success {
            return false;
        }
        self.scores.persist_high_score();
        self.record_round(false);
        true
    }

    /// GameOver -> Menu
    pub fn restart(&mut self) -> bool {
        self.transition(GameAction::Restart).success
    }

    pub fn open_shop(&mut self) -> bool {
        self.transition(GameAction::OpenShop).success
    }

    pub fn open_settings(&mut self) -> bool {
        self.transition(GameAction::OpenSettings).success
    }

    pub fn back(&mut self) -> bool {
        self.transition(GameAction::Back).success
    }

    /// Buy a skin; only available in the shop
    pub fn buy_skin(&mut self, skin: Skin) -> Option<Purchase> {
        if self.fsm.current() != GameState::Shop {
            return None;
        }
        let purchase = self.wallet.buy_skin(skin);
        if let Purchase::Bought { remaining } = purchase {
            self.bus.emit(GameEvent::SkinPurchased(skin));
            self.bus.emit(GameEvent::CurrencyChanged(remaining));
            self.play(AudioCue::Buy);
            self.schedule(
                EffectKind::SkinUnlocked { skin },
                self.config.spawn_head(),
                Params::SKIN_UNLOCK_MS,
            );
        }
        Some(purchase)
    }

    /// Select the next owned skin; available in the shop and settings
    pub fn cycle_skin(&mut self) -> Option<Skin> {
        if !matches!(self.fsm.current(), GameState::Shop | GameState::Settings) {
            return None;
        }
        let skin = self.wallet.cycle_skin();
        self.bus.emit(GameEvent::SkinSelected(skin));
        Some(skin)
    }

    /// Claim the daily coins. `now_ms` is wall-clock time (ms since the
    /// epoch), since the cooldown must survive restarts.
    pub fn claim_daily_reward(&mut self, now_ms: f64) -> Option<u32> {
        if self.fsm.current() != GameState::Shop {
            return None;
        }
        let coins = self.wallet.claim_daily_reward(now_ms)?;
        self.bus
            .emit(GameEvent::CurrencyChanged(self.wallet.currency()));
        self.play(AudioCue::Reward);
        self.schedule(
            EffectKind::DailyReward { coins },
            self.config.spawn_head(),
            Params::DAILY_REWARD_EFFECT_MS,
        );
        Some(coins)
    }

    pub fn can_claim_daily_reward(&self, now_ms: f64) -> bool {
        self.wallet.can_claim_daily_reward(now_ms)
    }

    /// Change difficulty from the menu or settings screen
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if !matches!(self.fsm.current(), GameState::Menu | GameState::Settings) {
            return false;
        }
        self.settings.difficulty = difficulty;
        self.settings.save(self.store.as_ref());
        true
    }

    pub fn toggle_sound(&mut self) -> Option<bool> {
        if self.fsm.current() != GameState::Settings {
            return None;
        }
        let enabled = self.settings.toggle_sound();
        self.settings.save(self.store.as_ref());
        Some(enabled)
    }

    pub fn toggle_music(&mut self) -> Option<bool> {
        if self.fsm.current() != GameState::Settings {
            return None;
        }
        let enabled = self.settings.toggle_music();
        self.settings.save(self.store.as_ref());
        Some(enabled)
    }

    /// Name recorded on leaderboard entries; blank names fall back to the default
    pub fn set_player_name(&mut self, name: &str) {
        let name = name.trim();
        self.player_name = if name.is_empty() {
            Params::DEFAULT_PLAYER_NAME.to_string()
        } else {
            name.to_string()
        };
    }

    /// Replace the live snake and food, e.g. to replay a recorded position
    pub fn load_round(&mut self, snake: SnakeEntity, food: Vector2) {
        self.snake = snake;
        self.arena.place_food(food);
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.config.grid_size,
            segments: self.snake.segments_vec(),
            direction: self.snake.direction(),
            food: self.arena.food_cell(),
            hazards: self.arena.hazard_cells(),
            score: self.scores.score(),
            high_score: self.scores.high_score(),
            combo: self.scores.combo(),
            mode: self.fsm.current(),
            currency: self.wallet.currency(),
            current_skin: self.wallet.current_skin(),
            owned_skins: self.wallet.owned().to_vec(),
            settings: self.settings,
            effects: self.effects.active(),
        }
    }

    pub fn state(&self) -> GameState {
        self.fsm.current()
    }

    pub fn snake(&self) -> &SnakeEntity {
        &self.snake
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn move_interval_ms(&self) -> f64 {
        self.settings.move_interval_ms()
    }

    pub fn stats(&self) -> &GameStats {
        self.stats.stats()
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        self.leaderboard.entries()
    }

    pub fn is_high_score(&self, score: u32) -> bool {
        self.leaderboard.is_high_score(score)
    }

    pub fn achievements(&self) -> &[Achievement] {
        self.achievements.unlocked()
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }
}

/// Consumes render snapshots; drawing itself lives outside the core
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot);
}

/// Pairs a game with a renderer so a [`GameLoop`](crate::GameLoop) can drive both
pub struct Frontend<R> {
    pub game: Game,
    pub renderer: R,
}

impl<R: Renderer> Frontend<R> {
    pub fn new(game: Game, renderer: R) -> Self {
        Self { game, renderer }
    }
}

impl<R: Renderer> FrameHandler for Frontend<R> {
    fn update(&mut self, dt_ms: f64) {
        self.game.update(dt_ms);
    }

    fn render(&mut self) {
        let snapshot = self.game.snapshot();
        self.renderer.draw(&snapshot);
    }
}
