//! Terminal falling-block game (default binary).
//!
//! Drives the engine with a real-time tick whose interval shrinks with the
//! level, forwards key presses as commands, and draws through the diffing
//! terminal renderer.

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use blockfall::core::{Engine, EngineConfig};
use blockfall::input::{is_restart, should_quit, Bindings};
use blockfall::term::{Canvas, GameView, TerminalRenderer, Viewport};
use blockfall::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about)]
struct Args {
    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    width: usize,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: usize,

    /// Seed for pieces and hidden key letters. Random if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Use arrow keys and space instead of hidden letter bindings.
    #[arg(long)]
    classic_keys: bool,

    /// Write logs to this file. Logging is off without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// off | error | warn | info | debug | trace (RUST_LOG overrides).
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn engine_config(&self, round: u64) -> EngineConfig {
        let config = EngineConfig::new(self.width, self.height);
        match self.seed {
            // Each restart gets its own sequence, still reproducible from the seed.
            Some(seed) => config.with_seed(seed.wrapping_add(round)),
            None => config,
        }
    }
}

fn init_logger(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args)?;
    args.engine_config(0).validate()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, args: &Args) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut bindings = if args.classic_keys {
        Bindings::Classic
    } else {
        Bindings::hidden(&mut rng)
    };

    let mut round = 0;
    let mut engine = Engine::from_config(&args.engine_config(round))?;
    engine.advance();
    info!("new game on a {}x{} board", args.width, args.height);

    let view = GameView::default();
    let mut canvas = Canvas::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(
            &engine.snapshot(),
            &bindings.legend(),
            Viewport::new(w, h),
            &mut canvas,
        );
        term.draw(&canvas)?;

        // Input with timeout until the next tick.
        let timeout = engine
            .tick_interval()
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit at score {}", engine.score());
                        return Ok(());
                    }

                    if engine.is_game_over() {
                        if is_restart(key) {
                            round += 1;
                            engine = Engine::from_config(&args.engine_config(round))?;
                            engine.advance();
                            bindings.redeal(&mut rng);
                            last_tick = Instant::now();
                            info!("restart #{}", round);
                        }
                        continue;
                    }

                    if let Some(action) = bindings.resolve(key) {
                        let changed = engine.apply_action(action);
                        debug!("{} -> {}", action.as_str(), changed);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick. The board freezes once the game is over.
        if !engine.is_game_over() && last_tick.elapsed() >= engine.tick_interval() {
            last_tick = Instant::now();
            engine.advance();
        }

        if let Some(lock) = engine.take_last_event() {
            if lock.level_up {
                info!(
                    "level {} (tick {:?})",
                    engine.level(),
                    engine.tick_interval()
                );
            }
        }
    }
}
