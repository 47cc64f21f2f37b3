use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use crawl_core::mapgen::MapGenerator;
use crawl_core::{
    Direction, Game, GameConfig, InputJournal, Intent, MoveOutcome, RunOutcome, replay_to_end,
};
use crawl_tools::config_file::load_config;
use crawl_tools::render::{describe, render_grid, render_view, status_line};
use crawl_tools::init_logging;
use log::info;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file overriding generation parameters and rules
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// More log output: -v for debug, -vv for trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the full map generated for one level of a run
    Generate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 1)]
        level: u32,
    },
    /// Play on stdin: w/a/s/d move, t toggles darkness, n starts over, q quits
    Play {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Write the intent journal here when the session ends
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Walk the player randomly and report how the run went
    Simulate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 1000)]
        steps: u32,
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Re-run a recorded journal and print its final hash
    Replay {
        /// Path to the journal JSON file to replay
        #[arg(short, long)]
        journal: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Generate { seed, level } => generate(config, seed, level),
        Command::Play { seed, record } => play(config, seed, record.as_deref()),
        Command::Simulate { seed, steps, record } => {
            simulate(config, seed, steps, record.as_deref())
        }
        Command::Replay { journal } => replay(&config, &journal),
    }
}

fn generate(config: GameConfig, seed: u64, level: u32) -> Result<()> {
    let generator = MapGenerator::new(seed, config.generation);
    let grid = generator
        .generate(level)
        .with_context(|| format!("Failed to generate level {level} for seed {seed}"))?;
    print!("{}", render_grid(&grid));
    info!("{} floor cells", grid.floor_count());
    Ok(())
}

fn key_intent(key: char) -> Option<Intent> {
    match key.to_ascii_lowercase() {
        'w' => Some(Intent::Move(Direction::North)),
        'a' => Some(Intent::Move(Direction::West)),
        's' => Some(Intent::Move(Direction::South)),
        'd' => Some(Intent::Move(Direction::East)),
        't' => Some(Intent::ToggleDarkness),
        'n' => Some(Intent::NewGame),
        _ => None,
    }
}

fn play(config: GameConfig, seed: u64, record: Option<&Path>) -> Result<()> {
    let mut game = Game::new(seed, config).context("Failed to start a game")?;
    println!("{}", status_line(game.state()));
    print!("{}", render_view(game.state(), game.config()));

    'session: for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        for key in line.chars() {
            if key.eq_ignore_ascii_case(&'q') {
                break 'session;
            }
            let Some(intent) = key_intent(key) else {
                continue;
            };
            game.apply_intent(&intent).with_context(|| format!("{intent:?} failed"))?;
            for event in game.drain_log() {
                println!("{}", describe(&event));
            }
        }
        println!("{}", status_line(game.state()));
        print!("{}", render_view(game.state(), game.config()));
    }

    if let Some(path) = record {
        write_journal(game.journal(), path)?;
    }
    Ok(())
}

fn simulate(config: GameConfig, seed: u64, steps: u32, record: Option<&Path>) -> Result<()> {
    let mut game = Game::new(seed, config).context("Failed to start a game")?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (mut fights, mut deaths, mut victories, mut deepest) = (0_u32, 0_u32, 0_u32, 1_u32);

    for _ in 0..steps {
        let direction = Direction::ALL[(rng.next_u64() % 4) as usize];
        match game.move_player(direction)? {
            MoveOutcome::Fought { .. } | MoveOutcome::EnemyDefeated { .. } => fights += 1,
            MoveOutcome::Finished(RunOutcome::Defeat) => deaths += 1,
            MoveOutcome::Finished(RunOutcome::Victory) => victories += 1,
            MoveOutcome::Descended { level } => deepest = deepest.max(level),
            _ => {}
        }
    }

    println!("Simulation complete.");
    println!("Steps: {steps}");
    println!("Fights: {fights} | Deaths: {deaths} | Victories: {victories}");
    println!("Deepest dungeon: {deepest}");
    println!("{}", status_line(game.state()));
    println!("Snapshot Hash: {}", game.snapshot_hash());

    if let Some(path) = record {
        write_journal(game.journal(), path)?;
    }
    Ok(())
}

fn replay(config: &GameConfig, path: &Path) -> Result<()> {
    let journal_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    let journal =
        InputJournal::from_json(&journal_data).context("Failed to deserialize journal JSON")?;

    let result = replay_to_end(config, &journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Inputs: {}", journal.inputs.len());
    println!("Dungeon: {} | Player level: {}", result.final_level, result.player_level);
    println!("Transitions: {}", result.transitions_applied);
    println!("Snapshot Hash: {}", result.snapshot_hash);
    Ok(())
}

fn write_journal(journal: &InputJournal, path: &Path) -> Result<()> {
    let json = journal.to_json().context("Failed to serialize journal")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
    info!("journal with {} inputs written to {}", journal.inputs.len(), path.display());
    Ok(())
}
