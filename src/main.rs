use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade::app::GameController;
use snake_arcade::audio::{AudioSink, Mute, TerminalBell};
use snake_arcade::game::{Difficulty, GameConfig, GameEngine};
use snake_arcade::modes::PlayMode;
use snake_arcade::storage::FileStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Snake in the terminal, with skins and high scores")]
struct Cli {
    /// Difficulty preselected on the menu (easy, medium, hard)
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Skin to use; remembered for later sessions
    #[arg(long)]
    skin: Option<String>,

    /// File holding high scores and preferences
    #[arg(long, default_value = "snake_store.json")]
    store: PathBuf,

    /// Grid width; the grid follows the terminal size when unset
    #[arg(long, requires = "height")]
    width: Option<usize>,

    /// Grid height
    #[arg(long, requires = "width")]
    height: Option<usize>,

    /// Milliseconds between frames
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let (config, fixed_grid) = match (cli.width, cli.height) {
        (Some(width), Some(height)) => (GameConfig::new(width, height), true),
        _ => (GameConfig::default(), false),
    };

    let store = FileStore::open(&cli.store);
    let audio: Box<dyn AudioSink> = if cli.mute {
        Box::new(Mute)
    } else {
        Box::new(TerminalBell::new())
    };

    let mut controller = GameController::new(GameEngine::new(config), Box::new(store), audio)
        .with_difficulty(cli.difficulty)
        .with_fixed_grid(fixed_grid);
    if let Some(skin) = &cli.skin {
        controller.select_skin(skin);
    }

    let mut play_mode = PlayMode::new(controller, Duration::from_millis(cli.frame_ms.max(1)));
    play_mode.run().await?;

    Ok(())
}
