//! Terminal Squash runner (default binary).
//!
//! Wires the JSON config, sprite and font assets, the save file and the
//! terminal platform together, then hands control to the game loop.
//!
//! Environment:
//! - `SQUASH_CONFIG`: config path when none is given on the command line
//! - `SQUASH_LOG`: log file; logging is off without it (stderr would draw
//!   over the alternate screen). Filter with `RUST_LOG`.
//! - `SQUASH_SEED`: fixed seed for hazard placement

use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use tui_squash::core::{Assets, Game, GameConfig, JsonLevelStore, Playfield};
use tui_squash::term::{BannerFont, StageView, TerminalPlatform, Viewport};

const DEFAULT_CONFIG: &str = "config.json";

fn main() -> Result<()> {
    init_logging()?;

    let config_path = config_path();
    let config = GameConfig::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let assets = Assets::load(&config.objects).context("loading sprites")?;
    let banner = BannerFont::load(&config.theme.font_location).context("loading banner font")?;

    let viewport = crossterm::terminal::size()
        .map(|(w, h)| Viewport::new(w, h))
        .unwrap_or(Viewport::new(80, 24));
    let (width, height) = if config.screen.fullscreen {
        (viewport.width, viewport.height)
    } else {
        config.screen.size
    };
    let field = Playfield::new(width, height);

    let mut store = JsonLevelStore::new(&config.objects.database);
    let title = config.game.title();
    let mut game = Game::from_store(config, assets, field, &store, seed());
    log::info!("{} on a {}x{} playfield", title, width, height);

    let mut platform = TerminalPlatform::new(StageView::new(banner), viewport);
    platform.enter(&title)?;

    let result = game.run(&mut platform, &mut store);

    // Always try to restore terminal state before reporting.
    if let Err(e) = platform.exit() {
        log::warn!("failed to restore terminal: {:#}", e);
    }
    result.context("game loop failed")?;
    Ok(())
}

fn config_path() -> PathBuf {
    env::args_os()
        .nth(1)
        .or_else(|| env::var_os("SQUASH_CONFIG"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

fn init_logging() -> Result<()> {
    let Some(path) = env::var_os("SQUASH_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", PathBuf::from(&path).display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn seed() -> u64 {
    if let Some(seed) = env::var("SQUASH_SEED").ok().and_then(|s| s.parse().ok()) {
        log::info!("using fixed seed {}", seed);
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
