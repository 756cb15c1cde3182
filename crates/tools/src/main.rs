use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use delve_core::{
    GameConfig, GeneratedLevel, Item, Position, ReplayResult, Species, Terrain, generate,
    replay_json,
};
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one level and print it
    Preview {
        #[arg(short, long, default_value = "abc123")]
        seed: String,
        /// Overrides `map_width` from the config
        #[arg(long)]
        width: Option<usize>,
        /// Overrides `map_height` from the config
        #[arg(long)]
        height: Option<usize>,
        /// TOML file with a `GameConfig`; missing fields keep their defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the level as JSON instead of ASCII
        #[arg(long)]
        json: bool,
    },
    /// Replay a recorded action journal and print its final fingerprint
    Replay {
        /// Path to the journal JSON file to replay
        #[arg(short, long)]
        journal: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GameConfig::from_toml_str(&text)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn glyph(level: &GeneratedLevel, pos: Position) -> char {
    if pos == level.spawn {
        return '@';
    }
    let Some(cell) = level.map.cell(pos) else {
        return ' ';
    };
    if let Some(species) = cell.spawn_marker {
        return match species {
            Species::Rat => 'r',
            Species::Goblin => 'g',
            Species::Ghost => 'G',
        };
    }
    if let Some(item) = cell.item {
        return match item {
            Item::Gold { .. } => '$',
            Item::Potion(_) => '!',
            Item::Weapon(_) => ')',
            Item::Armor(_) => '[',
        };
    }
    match cell.terrain {
        Terrain::Floor => '.',
        Terrain::Wall => '#',
        Terrain::Stairs => '>',
        Terrain::Empty => ' ',
    }
}

fn render_ascii(level: &GeneratedLevel) -> String {
    let map = &level.map;
    let mut out = String::with_capacity((map.width() + 1) * map.height());
    for row in 0..map.height() {
        let line: String = (0..map.width())
            .map(|col| glyph(level, Position::new(row as i32, col as i32)))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn preview(
    seed: &str,
    width: Option<usize>,
    height: Option<usize>,
    config: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let width = width.unwrap_or(config.map_width);
    let height = height.unwrap_or(config.map_height);
    let level = generate(seed, width, height, &config.generation)
        .with_context(|| format!("Failed to generate a {width}x{height} level for {seed:?}"))?;
    info!("generated {width}x{height} level for seed {seed:?}");

    if json {
        println!("{}", serde_json::to_string_pretty(&level)?);
    } else {
        print!("{}", render_ascii(&level));
    }
    Ok(())
}

fn replay(path: &Path) -> Result<()> {
    let journal_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    let result: ReplayResult =
        replay_json(&journal_data).with_context(|| "Replay failed during execution")?;

    println!("Replay complete.");
    println!("Final Turn: {}", result.final_turn);
    println!("Status: {:?}", result.final_status);
    println!("Actions: {} applied, {} ignored", result.applied, result.ignored);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Commands::Preview { seed, width, height, config, json } => {
            preview(&seed, width, height, config.as_deref(), json)
        }
        Commands::Replay { journal } => replay(&journal),
    }
}
