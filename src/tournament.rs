//! Tournament mode for running many AI games in parallel and collecting statistics
//!
//! Games are independent, so they run on the rayon pool with no shared
//! mutable state; results are tallied once every game is done.

use crate::core::{Side, Sided};
use crate::game::{
    Dispatcher, GameEndReason, GameLoop, GameOverReason, RuleConfig, Strategy, VerbosityLevel,
};
use crate::loader::{DeckList, GameInitializer, TemplateLibrary};
use crate::Result;
use rayon::prelude::*;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TourneyConfig {
    pub games: usize,
    /// Master seed; each game derives its own from this and its index
    pub seed: u64,
    pub strategies: Sided<Strategy>,
    pub decks: Sided<DeckList>,
    pub rules: RuleConfig,
    /// Games still running after this many turns count as unfinished
    pub max_turns: u32,
}

/// Statistics collected during a tournament
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourneyStats {
    pub games: usize,
    pub wins: Sided<usize>,
    pub unfinished: usize,
    pub hero_destroyed: usize,
    pub decked_out: usize,
    pub conceded: usize,
    pub total_turns: u64,
}

impl TourneyStats {
    fn record(&mut self, winner: Option<Side>, end_reason: GameEndReason, turns: u32) {
        self.games += 1;
        self.total_turns += u64::from(turns);
        match winner {
            Some(side) => self.wins[side] += 1,
            None => self.unfinished += 1,
        }
        match end_reason {
            GameEndReason::Finished(GameOverReason::HeroDestroyed) => self.hero_destroyed += 1,
            GameEndReason::Finished(GameOverReason::DeckedOut) => self.decked_out += 1,
            GameEndReason::Finished(GameOverReason::Conceded) => self.conceded += 1,
            _ => {}
        }
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }

    pub fn win_rate(&self, side: Side) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            100.0 * self.wins[side] as f64 / self.games as f64
        }
    }
}

/// Seed for one game of a tournament
pub fn game_seed(master: u64, game_idx: usize) -> u64 {
    master.wrapping_add((game_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play `config.games` games in parallel
pub fn run_tourney(library: &TemplateLibrary, config: &TourneyConfig) -> Result<TourneyStats> {
    let dispatcher = Dispatcher::standard();

    let outcomes = (0..config.games)
        .into_par_iter()
        .map(|game_idx| {
            let mut game = GameInitializer::new(library).init_game(
                &config.decks[Side::SideA],
                &config.decks[Side::SideB],
                config.rules.clone(),
                game_seed(config.seed, game_idx),
            )?;
            let result = GameLoop::new(&mut game, &dispatcher)
                .with_verbosity(VerbosityLevel::Silent)
                .with_max_turns(config.max_turns)
                .with_autopilot(Side::SideA, config.strategies[Side::SideA])
                .with_autopilot(Side::SideB, config.strategies[Side::SideB])
                .run_game();
            Ok(result)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut stats = TourneyStats::default();
    for result in outcomes {
        stats.record(result.winner, result.end_reason, result.turns_played);
    }
    Ok(stats)
}

/// Print a tournament summary
pub fn print_summary(config: &TourneyConfig, stats: &TourneyStats, elapsed: Duration) {
    println!("\n=== Tournament Complete ===");
    println!("Total games played: {}", stats.games);
    println!("Elapsed time: {:.2}s", elapsed.as_secs_f64());
    if elapsed.as_secs_f64() > 0.0 {
        println!(
            "Games per second: {:.2}",
            stats.games as f64 / elapsed.as_secs_f64()
        );
    }

    println!("\n=== Side Statistics ===");
    for side in Side::ALL {
        println!(
            "{side} ({}, {}): {} ({:.1}%)",
            config.decks[side].hero,
            config.strategies[side],
            stats.wins[side],
            stats.win_rate(side)
        );
    }
    if stats.unfinished > 0 {
        println!("Unfinished: {}", stats.unfinished);
    }

    println!("\n=== Endings ===");
    println!("  Hero destroyed: {}", stats.hero_destroyed);
    println!("  Decked out: {}", stats.decked_out);
    println!("  Conceded: {}", stats.conceded);
    println!("Average game length: {:.1} turns", stats.average_turns());
}

/// Run and time a tournament, printing the summary
pub fn run_and_report(library: &TemplateLibrary, config: &TourneyConfig) -> Result<TourneyStats> {
    println!("=== Duel Engine - Tournament Mode ===\n");
    println!(
        "Running {} games, seed {}, strategies: {} vs {}",
        config.games,
        config.seed,
        config.strategies[Side::SideA],
        config.strategies[Side::SideB]
    );
    let start = Instant::now();
    let stats = run_tourney(library, config)?;
    print_summary(config, &stats, start.elapsed());
    Ok(stats)
}
