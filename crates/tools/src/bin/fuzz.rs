use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use crawl_core::{Direction, Game, Intent};
use crawl_tools::config_file::load_config;
use crawl_tools::init_logging;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short = 'n', long, default_value_t = 1000)]
    steps: u32,
    /// Independent runs, seeded `seed`, `seed + 1`, ...
    #[arg(short, long, default_value_t = 1)]
    runs: u32,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = load_config(args.config.as_deref())?;

    // Mostly movement; the rest exercises the other intents now and then.
    let intents = [
        Intent::Move(Direction::North),
        Intent::Move(Direction::East),
        Intent::Move(Direction::South),
        Intent::Move(Direction::West),
        Intent::Move(Direction::North),
        Intent::Move(Direction::East),
        Intent::Move(Direction::South),
        Intent::Move(Direction::West),
        Intent::ToggleDarkness,
        Intent::Resize { width: 640, height: 480 },
    ];

    for run in 0..args.runs {
        let seed = args.seed.wrapping_add(u64::from(run));
        println!("Starting fuzz run on seed {} for {} steps...", seed, args.steps);
        let mut game = Game::new(seed, config.clone()).context("Failed to start a game")?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for step in 0..args.steps {
            let intent = if rng.next_u64() % 500 == 0 {
                Intent::NewGame
            } else {
                choose(&mut rng, &intents)
            };
            game.apply_intent(&intent).with_context(|| format!("step {step}: {intent:?}"))?;

            let state = game.state();
            state
                .check_invariants()
                .with_context(|| format!("Invariant failed at step {step} after {intent:?}"))?;
            if state.player().and_then(|player| player.pos).is_none() {
                bail!("Invariant failed at step {step}: player left unplaced");
            }
            if state.level() > game.config().rules.boss_level {
                bail!("Invariant failed at step {step}: dungeon {} past the boss", state.level());
            }
        }
        let level = game.state().level();
        let hash = game.snapshot_hash();
        println!("Seed {} finished on dungeon {level} with hash {hash}", game.seed());
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
