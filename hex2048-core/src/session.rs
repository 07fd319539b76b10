//! Game session: a grid wired to the service that grants new tiles
//!
//! A turn is always slide, then ask for tiles, then hand the grid back to
//! whoever renders it. The tile source may fail or grant nothing; either way
//! the game carries on.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::direction::Direction;
use crate::grid::{Grid, Outcome, SlideSummary};
use crate::spawn::{spawn_tiles, SpawnRules};
use crate::tile::{decode_records, TileRecord};

/// Anything that can grant new tiles for a board.
///
/// `tiles_json` is the output of [`Grid::non_empty_tiles`]. `Ok(None)` means
/// no tiles were granted.
pub trait TileSource {
    fn request(
        &mut self,
        side_length: u32,
        tiles_json: &str,
    ) -> anyhow::Result<Option<Vec<TileRecord>>>;
}

/// In-process tile source backed by [`spawn_tiles`]
pub struct LocalSource {
    rules: SpawnRules,
    rng: ChaCha8Rng,
}

impl LocalSource {
    pub fn new(rules: SpawnRules, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rules, rng }
    }
}

impl TileSource for LocalSource {
    fn request(
        &mut self,
        side_length: u32,
        tiles_json: &str,
    ) -> anyhow::Result<Option<Vec<TileRecord>>> {
        if side_length == 0 {
            anyhow::bail!("side length must be at least 1");
        }
        let occupied = decode_records(tiles_json)?;
        Ok(spawn_tiles(
            &self.rules,
            side_length - 1,
            &occupied,
            &mut self.rng,
        ))
    }
}

/// Session configuration.
///
/// `seed` and `rules` drive the in-process source built by [`Game::local`];
/// a remote source spawns with whatever the service was started with.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub radius: u32,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
    pub rules: SpawnRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            radius: 2,
            seed: None,
            rules: SpawnRules::default(),
        }
    }
}

/// What happened during one turn
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    pub direction: Direction,
    pub summary: SlideSummary,
    /// Tiles the source granted and the grid accepted
    pub spawned: Vec<TileRecord>,
    pub outcome: Outcome,
}

/// One running game
pub struct Game<S: TileSource> {
    grid: Grid,
    source: S,
    turns: u32,
}

impl Game<LocalSource> {
    /// Game spawning in-process with the config's rules and seed
    pub fn local(config: &GameConfig) -> Self {
        let source = LocalSource::new(config.rules.clone(), config.seed);
        Self::new(config, source)
    }
}

impl<S: TileSource> Game<S> {
    /// Game on a `config.radius` board fed by `source`
    pub fn new(config: &GameConfig, source: S) -> Self {
        Self {
            grid: Grid::new(config.radius),
            source,
            turns: 0,
        }
    }

    /// Request the opening tiles
    pub fn start(&mut self) -> Vec<TileRecord> {
        let spawned = self.spawn();
        tracing::debug!(count = spawned.len(), "opening tiles");
        spawned
    }

    /// Play the direction bound to `key`; unbound keys do nothing
    pub fn press(&mut self, key: char) -> Option<Turn> {
        Direction::from_key(key).map(|d| self.play(d))
    }

    /// Slide, then ask the source for new tiles
    pub fn play(&mut self, direction: Direction) -> Turn {
        let summary = self.grid.slide_grid(direction);
        let spawned = self.spawn();
        self.turns += 1;

        Turn {
            direction,
            summary,
            spawned,
            outcome: self.grid.outcome(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Directions attempted so far, including ones that changed nothing
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// End the session and keep the final board
    pub fn finish(self) -> Grid {
        tracing::debug!(
            turns = self.turns,
            score = self.grid.score(),
            outcome = ?self.grid.outcome(),
            "session finished"
        );
        self.grid
    }

    fn spawn(&mut self) -> Vec<TileRecord> {
        if self.grid.game_over() {
            return Vec::new();
        }

        let granted = match self.request_tiles() {
            Ok(Some(tiles)) => tiles,
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("Tile request failed, continuing without new tiles: {err:#}");
                Vec::new()
            }
        };

        granted
            .into_iter()
            .filter(|&record| self.grid.create_tile(record))
            .collect()
    }

    fn request_tiles(&mut self) -> anyhow::Result<Option<Vec<TileRecord>>> {
        let tiles_json = self.grid.non_empty_tiles()?;
        self.source.request(self.grid.side_length(), &tiles_json)
    }
}
