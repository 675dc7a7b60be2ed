use std::io::stdout;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::rngs::SmallRng;
use rand::{thread_rng, RngCore, SeedableRng};

mod config;
mod engine;
mod error;
mod tui;
mod tui48;

use config::Config;
use engine::session::Session;
use tui::crossterm::{Crossterm, CrosstermEvents};
use tui48::Tui48;

/// Slide tiles, merge equal pairs, reach the target.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of rows and columns on the board.
    #[arg(long, default_value_t = config::DEFAULT_SIZE)]
    size: usize,

    /// Tile value that wins the game.
    #[arg(long, default_value_t = config::DEFAULT_TARGET)]
    target: u32,

    /// Ticks a spawned tile takes to grow to full size.
    #[arg(long, default_value_t = config::DEFAULT_ANIMATION_TICKS)]
    animation_ticks: u32,

    /// Ticks per second.
    #[arg(long, default_value_t = config::DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// Seed for tile placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "./slide48.log")]
    log_file: PathBuf,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(args.verbose.log_level_filter())
        .chain(fern::log_file(&args.log_file)?)
        .apply()?;

    let config = Config::new(args.size, args.target, args.animation_ticks, args.tick_rate)?;
    log::info!(
        "starting {}x{} game, target {}",
        config.size(),
        config.size(),
        config.target()
    );

    let rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(SmallRng::seed_from_u64(seed)),
        None => Box::new(SmallRng::from_rng(thread_rng())?),
    };
    let session = Session::new(config, rng);

    let w = stdout().lock();
    let renderer = Crossterm::new(Box::new(w))?;
    let event_source = CrosstermEvents::default();
    Tui48::new(session, renderer, event_source).run()?;

    Ok(())
}
