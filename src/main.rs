//! Terminal runner (default binary).
//!
//! Runs the engine at a fixed tick rate: drain pending keys, tick once,
//! render the snapshot, sleep until the next tick. Configuration comes from
//! `BLOCKFALL_*` environment variables.

use std::env;
use std::fs::File;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::info;

use blockfall::core::{GameConfig, GameSnapshot, GameState};
use blockfall::input::poll_intents;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";

fn main() -> Result<()> {
    init_logging()?;

    let mut config = GameConfig::from_env();
    if config.seed.is_none() {
        config.seed = Some(time_seed());
    }
    let mut game = GameState::new(config).context("invalid game configuration")?;
    info!("starting with {:?}", game.config());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(
        "exit: score {}, level {}, lines {}",
        game.score(),
        game.level(),
        game.lines()
    );
    result
}

/// The terminal belongs to the game, so logs only go to a file
/// (`BLOCKFALL_LOG_PATH`). Without one, logging stays off unless `RUST_LOG`
/// asks for it.
fn init_logging() -> Result<()> {
    let mut builder = match env::var_os(ENV_LOG_PATH) {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("cannot open log file {:?}", path))?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let tick = game.config().tick_duration();
    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut next_tick = Instant::now();

    loop {
        let input = poll_intents()?;
        if input.resized {
            term.invalidate();
        }
        if input.restart {
            game.restart();
        }

        game.tick(&input.batch());
        // A finished game ignores ticks, so quit is checked here too.
        if input.quit() || game.quit_requested() {
            return Ok(());
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        next_tick += tick;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else {
            // Running behind: drop the backlog instead of fast-forwarding.
            next_tick = now;
        }
    }
}
