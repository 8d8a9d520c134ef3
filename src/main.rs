//! Duel Engine - Main Binary
//!
//! Runs AI games through the hosting layer, tournaments, and snapshot
//! inspection.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use duel_engine::{
    core::{Side, Sided},
    game::{GameSnapshot, OutputFormat, RuleConfig, Strategy, VerbosityLevel},
    host::{drive, Advance, ChannelTransport, GameService, MemoryStore, ServiceConfig},
    loader::{starter_deck, starter_library, DeckList, TemplateLibrary},
    notify::{side_view, RevealPolicy},
    tournament::{run_and_report, TourneyConfig},
};
use std::path::{Path, PathBuf};

/// AI strategy for a side
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Always attack the enemy hero
    Rush,
    /// Trade with enemy creatures
    Control,
    /// Coin flip between the two
    Balanced,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Rush => Strategy::Rush,
            StrategyArg::Control => Strategy::Control,
            StrategyArg::Balanced => Strategy::Balanced,
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    /// One JSON object per line
    Json,
}

impl From<LogFormatArg> for OutputFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => OutputFormat::Text,
            LogFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Duel Engine - turn-based two-sided card game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one AI vs AI game through the game service
    Simulate {
        #[arg(long, value_enum, default_value = "rush")]
        strategy_a: StrategyArg,

        #[arg(long, value_enum, default_value = "control")]
        strategy_b: StrategyArg,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Rule configuration (JSON); defaults apply to missing fields
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Template library (JSON); the built-in starter set otherwise
        #[arg(long, value_name = "FILE")]
        library: Option<PathBuf>,

        /// Deck list for side A (JSON)
        #[arg(long, value_name = "FILE")]
        deck_a: Option<PathBuf>,

        /// Deck list for side B (JSON)
        #[arg(long, value_name = "FILE")]
        deck_b: Option<PathBuf>,

        /// Hide the opponent's hand and both decks in side updates
        #[arg(long)]
        conceal: bool,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "minimal", short = 'v')]
        verbosity: VerbosityArg,

        #[arg(long, value_enum, default_value = "text")]
        log_format: LogFormatArg,

        /// Write the final game state to this snapshot file
        #[arg(long, value_name = "FILE")]
        snapshot_output: Option<PathBuf>,

        /// Give up after this many service invocations
        #[arg(long, default_value_t = 100_000)]
        max_invocations: usize,
    },

    /// Run many games in parallel and report win rates
    Tourney {
        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, value_enum, default_value = "rush")]
        strategy_a: StrategyArg,

        #[arg(long, value_enum, default_value = "control")]
        strategy_b: StrategyArg,

        /// Games running longer than this count as unfinished
        #[arg(long, default_value_t = 200)]
        max_turns: u32,
    },

    /// Print one side's view of a snapshot as JSON
    Inspect {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// side_a or side_b
        #[arg(long)]
        side: Side,

        #[arg(long)]
        conceal: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            strategy_a,
            strategy_b,
            seed,
            rules,
            library,
            deck_a,
            deck_b,
            conceal,
            verbosity,
            log_format,
            snapshot_output,
            max_invocations,
        } => {
            let library = load_library(library.as_deref())?;
            let decks = Sided::new(
                load_deck(deck_a.as_deref(), "Pyromancer")?,
                load_deck(deck_b.as_deref(), "Warden")?,
            );
            let rules = load_rules(rules.as_deref())?;
            let config = ServiceConfig {
                reveal: reveal_policy(conceal),
                verbosity: verbosity.into(),
                log_format: log_format.into(),
                ..ServiceConfig::default()
            };
            let autopilot = Sided::new(Some(strategy_a.into()), Some(strategy_b.into()));
            run_simulate(
                library,
                decks,
                rules,
                seed.unwrap_or_else(rand::random),
                config,
                autopilot,
                snapshot_output,
                max_invocations,
            )
            .await?
        }
        Commands::Tourney {
            games,
            seed,
            strategy_a,
            strategy_b,
            max_turns,
        } => {
            let config = TourneyConfig {
                games,
                seed,
                strategies: Sided::new(strategy_a.into(), strategy_b.into()),
                decks: Sided::new(starter_deck("Pyromancer"), starter_deck("Warden")),
                rules: RuleConfig::default(),
                max_turns,
            };
            run_and_report(&starter_library(), &config)?;
        }
        Commands::Inspect {
            snapshot,
            side,
            conceal,
        } => {
            let snapshot = GameSnapshot::load_from_file(&snapshot)
                .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
            let view = side_view(&snapshot.game_state, side, reveal_policy(conceal));
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_simulate(
    library: TemplateLibrary,
    decks: Sided<DeckList>,
    rules: RuleConfig,
    seed: u64,
    config: ServiceConfig,
    autopilot: Sided<Option<Strategy>>,
    snapshot_output: Option<PathBuf>,
    max_invocations: usize,
) -> Result<()> {
    println!("=== Duel Engine ===");
    println!(
        "{} ({}) vs {} ({}), seed {seed}\n",
        decks[Side::SideA].hero,
        describe(autopilot[Side::SideA]),
        decks[Side::SideB].hero,
        describe(autopilot[Side::SideB]),
    );

    let service = GameService::new(MemoryStore::new(), ChannelTransport::new(), library)
        .with_config(config);
    let game_id = service
        .create_game(
            &decks[Side::SideA],
            &decks[Side::SideB],
            rules,
            seed,
            autopilot.clone(),
        )
        .context("creating game")?;

    let outcome = drive(&service, game_id, max_invocations).await?;
    let state = service.peek(game_id)?;
    match outcome {
        Advance::Finished { winner } => {
            println!("\n=== Game Over ===");
            println!("Winner: {winner} ({})", state.heroes[winner].name);
        }
        _ => println!("\nGame stopped without a winner"),
    }
    println!("Turns played: {}", state.turn);
    for side in Side::ALL {
        println!("{side} hero health: {}", state.heroes[side].health);
    }

    if let Some(path) = snapshot_output {
        GameSnapshot::new(state)
            .with_autopilot(autopilot)
            .save_to_file(&path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        println!("Snapshot saved to {}", path.display());
    }
    Ok(())
}

fn describe(strategy: Option<Strategy>) -> String {
    strategy.map_or_else(|| "human".to_string(), |s| s.to_string())
}

fn reveal_policy(conceal: bool) -> RevealPolicy {
    if conceal {
        RevealPolicy::Conceal
    } else {
        RevealPolicy::PassThrough
    }
}

fn load_library(path: Option<&Path>) -> Result<TemplateLibrary> {
    match path {
        Some(path) => TemplateLibrary::load_from_file(path)
            .with_context(|| format!("loading library {}", path.display())),
        None => Ok(starter_library()),
    }
}

fn load_deck(path: Option<&Path>, default_hero: &str) -> Result<DeckList> {
    match path {
        Some(path) => DeckList::load_from_file(path)
            .with_context(|| format!("loading deck {}", path.display())),
        None => Ok(starter_deck(default_hero)),
    }
}

fn load_rules(path: Option<&Path>) -> Result<RuleConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading rules {}", path.display()))?;
            Ok(serde_json::from_str(&json)?)
        }
        None => Ok(RuleConfig::default()),
    }
}
