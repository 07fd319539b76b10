//! Auto command - seeded self-play with random moves
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), summarize()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use hex2048_core::{Direction, Game, GameConfig, Outcome, SpawnRules};
use hex2048_server::MAX_SIDE;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct AutoArgs {
    /// Board radius
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u32).range(0..i64::from(MAX_SIDE)))]
    pub radius: u32,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Give up on a game after this many turns
    #[arg(long, default_value = "10000")]
    pub max_turns: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    outcome: Outcome,
    turns: u32,
    moves: u32,
    score: u32,
    best_tile: u32,
}

/// Aggregated results
#[derive(Clone, Debug, Serialize)]
struct AutoSummary {
    games: Vec<GameRecord>,
    wins: usize,
    losses: usize,
    stalled: usize,
    avg_moves: f32,
    avg_score: f32,
    best_tile: u32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run auto command
///
/// 1. Play every game (in parallel, each with its own seed)
/// 2. Summarize
/// 3. Report
pub fn run(args: AutoArgs, seed: Option<u64>, rules: SpawnRules) -> Result<()> {
    rules.validate()?;
    let base_seed = seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Playing {} games on radius {} (base seed {})",
        args.games,
        args.radius,
        base_seed
    );

    let games = play_games(&args, base_seed, &rules);
    let summary = summarize(games);

    report_results(&summary, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_games(args: &AutoArgs, base_seed: u64, rules: &SpawnRules) -> Vec<GameRecord> {
    (0..args.games)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i as u64);
            play_single_game(i + 1, seed, args.radius, args.max_turns, rules)
        })
        .collect()
}

fn report_results(summary: &AutoSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("\n=== RESULTS ===");
    for game in &summary.games {
        println!(
            "Game {:>3}: {:<8} moves {:>5}  score {:>7}  best {:>5}  (seed {})",
            game.game_number,
            outcome_label(game.outcome),
            game.moves,
            game.score,
            game.best_tile,
            game.seed
        );
    }
    println!();
    println!(
        "Won: {}  Lost: {}  Stalled: {}",
        summary.wins, summary.losses, summary.stalled
    );
    println!(
        "Average moves: {:.1}  Average score: {:.1}  Best tile: {}",
        summary.avg_moves, summary.avg_score, summary.best_tile
    );

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play random directions until the game ends, stalls, or runs out of turns
fn play_single_game(
    game_number: usize,
    seed: u64,
    radius: u32,
    max_turns: u32,
    rules: &SpawnRules,
) -> GameRecord {
    let config = GameConfig {
        radius,
        seed: Some(seed),
        rules: rules.clone(),
    };
    let mut game = Game::local(&config);
    let mut rng = ChaCha8Rng::seed_from_u64(seed.rotate_left(32));

    game.start();
    while !game.grid().game_over() && game.turns() < max_turns {
        // Nothing was granted, so no slide can ever change the board
        if !game.grid().can_move() && !game.grid().is_full() {
            break;
        }
        if let Some(&direction) = Direction::ALL.choose(&mut rng) {
            game.play(direction);
        }
    }

    let turns = game.turns();
    let grid = game.finish();
    GameRecord {
        game_number,
        seed,
        outcome: grid.outcome(),
        turns,
        moves: grid.moves(),
        score: grid.score(),
        best_tile: grid.max_value(),
    }
}

fn summarize(games: Vec<GameRecord>) -> AutoSummary {
    let count = |o: Outcome| games.iter().filter(|g| g.outcome == o).count();
    let wins = count(Outcome::Won);
    let losses = count(Outcome::Lost);
    let stalled = count(Outcome::Playing);

    let n = games.len().max(1) as f32;
    let avg_moves = games.iter().map(|g| g.moves as f32).sum::<f32>() / n;
    let avg_score = games.iter().map(|g| g.score as f32).sum::<f32>() / n;
    let best_tile = games.iter().map(|g| g.best_tile).max().unwrap_or(0);

    AutoSummary {
        games,
        wins,
        losses,
        stalled,
        avg_moves,
        avg_score,
        best_tile,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Playing => "stalled",
        Outcome::Won => "won",
        Outcome::Lost => "lost",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_game_terminates() {
        let record = play_single_game(1, 99, 1, 10_000, &SpawnRules::default());
        assert!(record.turns <= 10_000);
        assert!(record.best_tile >= 2);
        // A radius-1 board fills long before anyone reaches 2048
        assert_eq!(record.outcome, Outcome::Lost);
    }

    #[test]
    fn test_games_are_reproducible() {
        let rules = SpawnRules::default();
        let a = play_single_game(1, 7, 2, 500, &rules);
        let b = play_single_game(1, 7, 2, 500, &rules);
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.score, b.score);
        assert_eq!(a.outcome, b.outcome);
    }

    #[test]
    fn test_max_turns_stalls() {
        let record = play_single_game(1, 3, 4, 5, &SpawnRules::default());
        assert_eq!(record.turns, 5);
        assert_eq!(record.outcome, Outcome::Playing);
    }

    #[test]
    fn test_summary_counts() {
        let args = AutoArgs {
            radius: 1,
            games: 4,
            max_turns: 10_000,
            json: false,
        };
        let summary = summarize(play_games(&args, 1, &SpawnRules::default()));
        assert_eq!(summary.games.len(), 4);
        assert_eq!(summary.wins + summary.losses + summary.stalled, 4);
        assert!(summary.best_tile >= 2);
    }
}
