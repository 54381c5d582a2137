/// Game tuning parameters for Snake
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const GRID_SIZE: i32 = 20;
    pub const INITIAL_SNAKE_LENGTH: usize = 3;

    // Timing (milliseconds)
    pub const TIME_STEP_MS: f64 = 1000.0 / 60.0; // fixed simulation step, 60 Hz

    // Score
    pub const SCORE_PER_FOOD: u32 = 10;
    pub const COMBO_TIMEOUT_MS: f64 = 2000.0;
    pub const COMBO_BONUS: f64 = 0.1; // +10% per combo step after the first

    // Effects (milliseconds)
    pub const FOOD_SPAWN_MS: f64 = 500.0;
    pub const FOOD_SPAWN_SCALE_START: f32 = 2.0;
    pub const FOOD_SPAWN_SCALE_END: f32 = 1.0;
    pub const SNAKE_DIE_MS: f64 = 1000.0;
    pub const SNAKE_DIE_STAGGER_MS: f64 = 50.0; // per-segment delay, applied by the renderer
    pub const SCORE_POPUP_MS: f64 = 1000.0;
    pub const COIN_POPUP_MS: f64 = 1500.0;
    pub const DAILY_REWARD_EFFECT_MS: f64 = 2000.0;
    pub const SKIN_UNLOCK_MS: f64 = 1500.0;
    pub const GAME_START_MS: f64 = 1000.0;

    // Shop
    pub const DAILY_REWARD: u32 = 50;
    pub const REWARD_COOLDOWN_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

    // Records
    pub const LEADERBOARD_SIZE: usize = 10;
    pub const ACHIEVEMENT_LENGTH: usize = 10;
    pub const ACHIEVEMENT_SCORE: u32 = 100;
    pub const ACHIEVEMENT_COMBO: u32 = 5;
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
}
