//! Mythic Realms - headless runner
//!
//! Plays a game where the player side only ends turns, printing a line per
//! turn and the final statistics.
//!
//! Usage:
//!   cargo run -- --race elf --difficulty hard --seed 7 --turns 40
//!   cargo run -- --config game.toml --snapshot end.json

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mythic_realms::core::types::{Difficulty, Race};
use mythic_realms::{EndTurnReport, Game, GameConfig, GameStats, Result};

#[derive(Parser, Debug)]
#[command(name = "mythic_realms")]
#[command(about = "Run a headless Mythic Realms game")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player race: human, elf or orc
    #[arg(long)]
    race: Option<Race>,

    /// easy, normal or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    #[arg(long)]
    seed: Option<u64>,

    /// Most end-turns to play
    #[arg(long)]
    turns: Option<u32>,

    /// Map width and height in hexes
    #[arg(long)]
    size: Option<i32>,

    /// Play without the AI opponent
    #[arg(long)]
    no_ai: bool,

    /// Write the final game state as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(GameConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(race) = self.race {
            config.race = race;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(turns) = self.turns {
            config.max_turns = turns;
        }
        if let Some(size) = self.size {
            config.map_size = size;
        }
        if self.no_ai {
            config.ai_enabled = false;
        }
        Ok((config, self.snapshot))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mythic_realms=info")))
        .init();

    let (config, snapshot) = Args::parse().into_config()?;
    let mut game = Game::new(&config)?;

    println!("\n=== MYTHIC REALMS ===");
    println!(
        "{} on {} | seed {} | {}x{} map | AI {}",
        config.race,
        config.difficulty,
        config.seed,
        config.map_size,
        config.map_size,
        if config.ai_enabled { "on" } else { "off" }
    );
    println!();

    for _ in 0..config.max_turns {
        let report = game.end_turn()?;
        print_turn(&game, &report);
        if game.is_over() {
            break;
        }
    }

    match &game.outcome {
        Some(outcome) if outcome.is_victory() => println!("\nVICTORY: {}", outcome.reason()),
        Some(outcome) => println!("\nDEFEAT: {}", outcome.reason()),
        None => println!("\nStopped after {} turns with no result.", game.turn()),
    }
    print_stats(&game.stats());

    if let Some(path) = snapshot {
        std::fs::write(&path, game.to_json()?)?;
        println!("\nSnapshot written to {}", path.display());
    }
    Ok(())
}

fn print_turn(game: &Game, report: &EndTurnReport) {
    println!(
        "Turn {:3} | pop {:2}/{:2} | {}",
        report.turn,
        game.player.population.current,
        game.player.population.cap,
        game.player.resources
    );
    for done in &report.pipeline.completed_buildings {
        println!("  built {}", done.kind.name());
    }
    for tech in &report.pipeline.completed_techs {
        println!("  researched {}", tech);
    }
    for line in &report.unit_logs {
        println!("  {}", line);
    }
    if let Some(event) = &report.storyteller.event {
        println!("  [{}] {}: {}", event.category.name(), event.name, event.text);
        if !event.result.is_empty() {
            println!("    {}", event.result);
        }
    }
    if let Some(quest) = &report.storyteller.new_quest {
        println!("  new quest: {} ({} turns)", quest.name, quest.turns_remaining);
    }
    for quest in &report.storyteller.completed_quests {
        println!("  quest complete: {}", quest.name);
    }
    for quest in &report.storyteller.failed_quests {
        println!("  quest failed: {}", quest.name);
    }
    if let Some(ai) = &report.ai {
        for line in &ai.logs {
            println!("  {}", line);
        }
    }
}

fn print_stats(stats: &GameStats) {
    println!("\n--- Final Stats ---");
    println!("Race: {} ({})", stats.race, stats.difficulty);
    println!("Turns: {}", stats.turns);
    println!("Population: {}/{}", stats.population, stats.population_cap);
    println!("Buildings: {} (max level {})", stats.buildings, stats.max_building_level);
    println!("Units: {} ({} heroes)", stats.units, stats.heroes);
    println!("Techs researched: {}", stats.techs_researched);
    println!("Quests completed: {}", stats.quests_completed);
    println!("Events: {}", stats.events_experienced);
    println!("Resources: {} total", stats.total_resources);
    if let Some(enemy) = &stats.enemy {
        println!("Enemy: {} with {} buildings, {} units", enemy.race, enemy.buildings, enemy.units);
    }
}
