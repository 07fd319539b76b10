//! Play command - interactive game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_session() - the input/turn/render loop
//! - Level 3: handle_line() - one line of key presses
//! - Level 4: key and command parsing

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use hex2048_core::{Game, GameConfig, Grid, SpawnRules, TileSource};
use hex2048_server::{HttpSource, MAX_SIDE};

use crate::render::draw_grid;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board radius (cells from the center to an edge)
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u32).range(0..i64::from(MAX_SIDE)))]
    pub radius: u32,

    /// Ask a running spawn server for tiles, e.g. http://localhost:13337
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_colour: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Pick the tile source (spawn server or in-process)
/// 2. Run the session on stdin/stdout
/// 3. Log the final board
pub fn run(args: PlayArgs, seed: Option<u64>, rules: SpawnRules) -> Result<()> {
    let config = GameConfig {
        radius: args.radius,
        seed,
        rules,
    };
    let colour = !args.no_colour;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Keys: q=nw w=n e=ne a=sw s=s d=se, 'quit' to leave")?;

    let grid = match &args.server_url {
        Some(url) => {
            let source = HttpSource::new(url)?;
            tracing::info!("Requesting tiles from {}", source.base_url());
            if config.seed.is_some() {
                tracing::warn!("--seed only affects local games; the server spawns with its own");
            }
            play_session(Game::new(&config, source), stdin.lock(), &mut out, colour)?
        }
        None => play_session(Game::local(&config), stdin.lock(), &mut out, colour)?,
    };

    tracing::info!(
        "Game ended: {:?}, score {}, best tile {}",
        grid.outcome(),
        grid.score(),
        grid.max_value()
    );

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Feed input lines to the game until it ends, input runs out, or the player quits
pub fn play_session<S: TileSource>(
    mut game: Game<S>,
    input: impl BufRead,
    out: &mut impl Write,
    colour: bool,
) -> Result<Grid> {
    game.start();
    draw_grid(out, game.grid(), colour)?;

    for line in input.lines() {
        let line = line?;
        if is_quit(&line) {
            break;
        }

        if handle_line(&mut game, &line) {
            draw_grid(out, game.grid(), colour)?;
        }
        if game.grid().game_over() {
            break;
        }
    }

    Ok(game.finish())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Press every key on the line; returns whether any key was bound
fn handle_line<S: TileSource>(game: &mut Game<S>, line: &str) -> bool {
    let mut pressed = false;
    for key in line.chars().filter(|c| !c.is_whitespace()) {
        if game.grid().game_over() {
            break;
        }
        match game.press(key) {
            Some(turn) => {
                pressed = true;
                tracing::debug!(
                    direction = %turn.direction,
                    moved = turn.summary.moved,
                    spawned = turn.spawned.len(),
                    "turn"
                );
            }
            None => tracing::debug!("Ignoring unbound key {key:?}"),
        }
    }
    pressed
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "quit" | "exit" | "x")
}

// ============================================================================
// TESTS
// ============================================================================
