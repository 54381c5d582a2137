mod autopilot;
mod input;
mod renderer;
mod store;

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_core::{
    AudioCue, Clock, Config, Difficulty, DirectionBuffer, EpochClock, EventKind, Frontend, Game,
    GameEvent, GameLoop, GameState, ManualClock, Services, SystemClock,
};

use crate::autopilot::Autopilot;
use crate::input::KeyScript;
use crate::renderer::LogRenderer;
use crate::store::JsonFileStore;

#[derive(Parser)]
#[command(name = "snake_host")]
#[command(version, about = "Headless snake runner driving the simulation core")]
struct Cli {
    /// Grid size in cells (square)
    #[arg(long)]
    grid: Option<i32>,

    /// Difficulty to play on; defaults to the saved setting
    #[arg(long)]
    difficulty: Option<DifficultyArg>,

    /// Food placement seed
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file; CLI flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where progress (high score, coins, skins, settings) is saved
    #[arg(long, default_value = "snake_save.json")]
    save: PathBuf,

    /// Name recorded on leaderboard entries
    #[arg(long, default_value = "Player")]
    name: String,

    /// Rounds to play before exiting
    #[arg(long, default_value = "3")]
    rounds: u32,

    /// Host frame length in milliseconds
    #[arg(long, default_value = "16.0")]
    frame_ms: f64,

    /// Safety cap on host frames
    #[arg(long, default_value = "100000")]
    max_frames: u64,

    /// Scripted presses (w/a/s/d, '.' to skip), one per move; autopilot otherwise
    #[arg(long)]
    keys: Option<String>,

    /// Pace frames with the wall clock instead of simulated time
    #[arg(long)]
    realtime: bool,

    /// Visit the shop and claim the daily reward before playing
    #[arg(long)]
    claim_reward: bool,

    /// Dump the board at trace level every frame
    #[arg(long)]
    board: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Config::new(),
    };
    if let Some(grid) = cli.grid {
        config.grid_size = grid;
    }
    if let Some(seed) = cli.seed {
        config.rng_seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let store = Rc::new(JsonFileStore::open(&cli.save)?);

    let manual_clock = Rc::new(ManualClock::new(0.0));
    let clock: Rc<dyn Clock> = if cli.realtime {
        Rc::new(SystemClock::new())
    } else {
        manual_clock.clone()
    };

    let input = DirectionBuffer::new();
    let mut game = Game::new(
        config,
        Services {
            input: Box::new(input.clone()),
            store: store.clone(),
            clock: clock.clone(),
            wall_clock: Rc::new(EpochClock),
        },
    )?;
    game.set_player_name(&cli.name);

    game.bus_mut().on_collision(|kind| log::debug!("collision: {kind:?}"));
    game.bus_mut()
        .on_achievement(|a| log::info!("achievement unlocked: {} ({})", a.name(), a.description()));
    game.subscribe(EventKind::LeaderboardUpdated, |event| {
        if let GameEvent::LeaderboardUpdated { rank, score } = event {
            log::info!("new leaderboard entry #{} with {score}", rank + 1);
        }
    });
    game.subscribe(EventKind::Audio, |event| {
        if let GameEvent::Audio(cue) = event {
            match cue {
                AudioCue::MusicStart | AudioCue::MusicStop => log::debug!("music: {cue:?}"),
                _ => log::trace!("sound: {cue:?}"),
            }
        }
    });

    if let Some(difficulty) = cli.difficulty {
        game.set_difficulty(difficulty.into());
    }

    if cli.claim_reward {
        game.open_shop();
        match game.claim_daily_reward(EpochClock.now()) {
            Some(coins) => log::info!("daily reward: +{coins} coins"),
            None => log::info!("daily reward already claimed"),
        }
        game.back();
    }

    let mut script = cli.keys.as_deref().map(KeyScript::parse).transpose()?;
    let autopilot = Autopilot::new();

    let mut frontend = Frontend::new(game, LogRenderer::new(cli.board));
    let mut game_loop = GameLoop::with_time_step(clock, frontend.game.config().time_step_ms)?;
    game_loop.start();

    let frame = Duration::from_secs_f64(cli.frame_ms.max(0.0) / 1000.0);
    let mut rounds_started = 0;
    let mut last_head = None;

    for _ in 0..cli.max_frames {
        let game = &mut frontend.game;
        match game.state() {
            GameState::Menu if rounds_started >= cli.rounds => break,
            GameState::Menu => {
                game.start();
                rounds_started += 1;
                last_head = None;
            }
            GameState::GameOver => {
                game.restart();
                continue;
            }
            _ => {}
        }

        let snapshot = game.snapshot();
        let head = snapshot.segments.first().copied();
        match script.as_mut() {
            Some(script) => {
                // One scripted press per move
                if head != last_head {
                    if let Some(Some(direction)) = script.next_press() {
                        input.push(direction);
                    }
                }
            }
            None => {
                if let Some(direction) = autopilot.choose(&snapshot) {
                    input.push(direction);
                }
            }
        }
        last_head = head;

        if cli.realtime {
            std::thread::sleep(frame);
        } else {
            manual_clock.advance(cli.frame_ms);
        }
        game_loop.frame(&mut frontend);
    }
    game_loop.stop();

    let game = &frontend.game;
    let summary = game.snapshot();
    log::info!(
        "played {rounds_started} round(s) in {} frames: best {}, coins {}",
        frontend.renderer.frames(),
        summary.high_score,
        summary.currency
    );
    let stats = game.stats();
    log::info!(
        "lifetime: {} games, {} food, longest snake {}, average score {:.1}",
        stats.total_games,
        stats.food_eaten,
        stats.longest_snake,
        stats.average_score
    );
    for (rank, entry) in game.leaderboard().iter().enumerate() {
        log::info!(
            "#{:<2} {:<12} {:>5} (length {})",
            rank + 1,
            entry.player_name,
            entry.score,
            entry.snake_length
        );
    }
    store.flush()?;
    log::info!("progress saved to {}", store.path().display());
    Ok(())
}
