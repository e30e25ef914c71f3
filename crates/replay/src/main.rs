//! Command-line replayer.
//!
//! Runs a JSON command script from a seed against a content pack and prints
//! the player log, a short summary and the SHA-256 digest of the final state.
//!
//! ```text
//! replay --seed demo-001 --script run.json --pack trial --mode pages
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_content::{ConfigLoader, ContentRegistry, PackLoader};
use game_core::{
    Command, GameConfig, GameEngine, GeneratorState, MapMode, RunState, compute_commands_root,
};

/// Replay a command script deterministically
#[derive(Parser)]
#[command(name = "replay")]
#[command(about = "Replay a deck-run command script from a seed", long_about = None)]
#[command(version)]
struct Cli {
    /// Run seed; a `NewRun` with this seed is prepended to the script
    #[arg(short, long)]
    seed: String,

    /// JSON array of commands, e.g. `[{"type":"PlayCard","index":0}]`
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Embedded pack to activate
    #[arg(long, value_name = "ID", conflicts_with = "pack_dir")]
    pack: Option<String>,

    /// Directory holding a pack's RON files
    #[arg(long, value_name = "DIR")]
    pack_dir: Option<PathBuf>,

    /// Balance overrides (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Progression model, overriding the config
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Print the full final state as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Grid,
    Pages,
}

impl From<ModeArg> for MapMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Grid => MapMode::Grid,
            ModeArg::Pages => MapMode::Pages,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = load_registry(&cli)?;
    let config = load_config(&cli)?;
    let commands = load_script(&cli)?;

    let engine = GameEngine::new(registry.env(&config));
    let mut state = RunState::menu();
    let mut rng = GeneratorState::seed(&cli.seed);

    for (step, command) in commands.iter().enumerate() {
        let printed = state.log.len();
        (state, rng) = engine
            .apply(&state, command, rng)
            .with_context(|| format!("step {step} ({}) failed", command.tag()))?;
        if !cli.json {
            for line in &state.log[printed..] {
                println!("{line}");
            }
        }
    }

    let digest = state.digest().context("Failed to encode final state")?;
    tracing::info!(
        pack = registry.active_id(),
        commands = commands.len(),
        root = %hex::encode(compute_commands_root(&commands)),
        "replay finished"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_summary(&state, &digest);
    }
    Ok(())
}

fn load_registry(cli: &Cli) -> Result<ContentRegistry> {
    let mut registry = ContentRegistry::with_builtin()?;
    if let Some(dir) = &cli.pack_dir {
        let pack = PackLoader::load(dir)?;
        let id = pack.id.clone();
        registry.register(pack);
        registry.activate(&id)?;
    } else if let Some(id) = &cli.pack {
        registry.activate(id)?;
    }
    Ok(registry)
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    Ok(match cli.mode {
        Some(mode) => config.with_map_mode(mode.into()),
        None => config,
    })
}

/// The script with `NewRun` prepended.
fn load_script(cli: &Cli) -> Result<Vec<Command>> {
    let mut commands = vec![Command::NewRun {
        seed: cli.seed.clone(),
    }];
    if let Some(path) = &cli.script {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script: Vec<Command> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse script JSON {}", path.display()))?;
        commands.extend(script);
    }
    Ok(commands)
}

fn print_summary(state: &RunState, digest: &[u8; 32]) {
    let player = &state.player;
    println!();
    println!("phase:  {}", state.phase);
    println!("hp:     {}/{}", player.hp, player.max_hp);
    println!("gold:   {}", player.gold);
    println!("deck:   {} cards", state.master_deck.len());
    println!("digest: {}", hex::encode(digest));
}
