//! Grid state and the slide/merge engine

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::board::{compare_cubes, hexagon_coordinates, Axis, Cube, SortOrder};
use crate::direction::Direction;
use crate::error::Result;
use crate::tile::{encode_records, Tile, TileRecord};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Reaching a tile of this value wins the game
pub const WIN_VALUE: u32 = 2048;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

/// What a single slide did to the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideSummary {
    pub direction: Direction,
    /// Any tile changed cell or merged
    pub moved: bool,
    pub merges: usize,
    pub score_gained: u32,
}

impl SlideSummary {
    fn idle(direction: Direction) -> Self {
        Self {
            direction,
            moved: false,
            merges: 0,
            score_gained: 0,
        }
    }
}

/// Lines of cells for one direction, nearest the destination edge first
type Traversal = Vec<Vec<Cube>>;

// ============================================================================
// GRID
// ============================================================================

/// Hexagonal board holding the live tiles
#[derive(Clone, Debug)]
pub struct Grid {
    radius: u32,
    /// All cells, column by column
    hexagon_coordinates: Vec<Cube>,
    cells: FxHashSet<Cube>,
    /// Indexed by [`Direction::index`]
    traversal_order: [Traversal; 6],
    tiles: Vec<Tile>,
    outcome: Outcome,
    /// Whether the latest slide changed the board (true before the first one)
    moved_last_slide: bool,
    score: u32,
    moves: u32,
}

impl Grid {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn new(radius: u32) -> Self {
        let hexagon_coordinates = hexagon_coordinates(radius);
        let cells = hexagon_coordinates.iter().copied().collect();
        let traversal_order = build_traversal_order(&hexagon_coordinates, radius);

        Self {
            radius,
            hexagon_coordinates,
            cells,
            traversal_order,
            tiles: Vec::new(),
            outcome: Outcome::Playing,
            moved_last_slide: true,
            score: 0,
            moves: 0,
        }
    }

    /// Place tiles directly, ignoring the spawn guard.
    ///
    /// Records `create_tile` would refuse for their cell or value are skipped.
    pub fn from_records(radius: u32, records: &[TileRecord]) -> Self {
        let mut grid = Self::new(radius);
        for record in records {
            if grid.accepts_placement(record) {
                grid.tiles.push(Tile::new(record.position(), record.value));
            }
        }
        grid
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Board side length, as sent to the spawn service
    pub fn side_length(&self) -> u32 {
        self.radius + 1
    }

    pub fn hexagon_coordinates(&self) -> &[Cube] {
        &self.hexagon_coordinates
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn game_over(&self) -> bool {
        self.outcome != Outcome::Playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of slides that changed the board
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn contains(&self, position: Cube) -> bool {
        self.cells.contains(&position)
    }

    pub fn get_tile(&self, position: Cube) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.curr_pos == position)
    }

    /// Cells with `x == index`, sorted by `(x, y, z)`
    pub fn get_column(&self, index: i32) -> Vec<Cube> {
        let mut column: Vec<Cube> = self
            .hexagon_coordinates
            .iter()
            .copied()
            .filter(|c| c.x == index)
            .collect();
        column.sort_by(|a, b| compare_cubes(a, b, [SortOrder::Ascending; 3]));
        column
    }

    /// Precomputed slide order for a direction
    pub fn traversal(&self, direction: Direction) -> &[Vec<Cube>] {
        &self.traversal_order[direction.index()]
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() == self.hexagon_coordinates.len()
    }

    pub fn max_value(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).max().unwrap_or(0)
    }

    /// Whether some direction would still change the board
    pub fn can_move(&self) -> bool {
        (!self.tiles.is_empty() && !self.is_full()) || self.has_matching_neighbours()
    }

    pub fn tile_records(&self) -> Vec<TileRecord> {
        self.tiles.iter().map(Tile::record).collect()
    }

    /// Live tiles as a JSON array of `{x, y, z, value}`
    pub fn non_empty_tiles(&self) -> Result<String> {
        encode_records(&self.tile_records())
    }

    // ========================================================================
    // SPAWNING
    // ========================================================================

    /// Add a tile on behalf of the spawn service.
    ///
    /// Silently ignored when the game is over, the cell is off the board or
    /// taken, the value is not a power of two in `2..=WIN_VALUE`, or the
    /// latest slide changed nothing. Returns whether the tile was placed.
    pub fn create_tile(&mut self, record: TileRecord) -> bool {
        if self.game_over() {
            tracing::debug!(?record, "spawn ignored: game over");
            return false;
        }
        if !self.contains(record.position()) {
            tracing::debug!(?record, "spawn ignored: off the board");
            return false;
        }
        if !self.tile_moved() {
            tracing::debug!(?record, "spawn ignored: last slide changed nothing");
            return false;
        }
        if !self.accepts_placement(&record) {
            return false;
        }

        self.tiles.push(Tile::new(record.position(), record.value));
        true
    }

    /// The latest slide moved something (vacuously true on an empty board)
    fn tile_moved(&self) -> bool {
        self.tiles.is_empty() || self.moved_last_slide
    }

    fn accepts_placement(&self, record: &TileRecord) -> bool {
        let position = record.position();
        if !self.contains(position) {
            tracing::debug!(?record, "placement ignored: off the board");
            false
        } else if self.get_tile(position).is_some() {
            tracing::debug!(?record, "placement ignored: cell taken");
            false
        } else if !record.value.is_power_of_two() || !(2..=WIN_VALUE).contains(&record.value) {
            tracing::debug!(?record, "placement ignored: bad value");
            false
        } else {
            true
        }
    }

    // ========================================================================
    // SLIDING
    // ========================================================================

    /// Slide every tile as far as it goes in `direction`, merging equal pairs
    pub fn slide_grid(&mut self, direction: Direction) -> SlideSummary {
        let mut summary = SlideSummary::idle(direction);
        if self.game_over() {
            return summary;
        }

        for tile in &mut self.tiles {
            tile.merged_from = None;
            tile.save_position();
        }

        let Grid {
            traversal_order,
            tiles,
            cells,
            ..
        } = self;
        for line in &traversal_order[direction.index()] {
            for &cell in line {
                slide_tile(tiles, cells, cell, direction, &mut summary);
            }
        }

        // Merged tiles carry no previous position, so they count as changed.
        summary.moved = self
            .tiles
            .iter()
            .any(|t| t.previous_pos != Some(t.curr_pos));
        self.moved_last_slide = summary.moved;
        if summary.moved {
            self.moves += 1;
            self.score = self.score.saturating_add(summary.score_gained);
        }

        self.outcome = self.evaluate_outcome();
        tracing::trace!(
            %direction,
            moved = summary.moved,
            merges = summary.merges,
            outcome = ?self.outcome,
            "slide"
        );
        summary
    }

    /// Win on a 2048 tile; loss on a full board with no equal neighbours
    fn evaluate_outcome(&self) -> Outcome {
        if self.tiles.iter().any(|t| t.value >= WIN_VALUE) {
            Outcome::Won
        } else if self.is_full() && !self.can_move() {
            Outcome::Lost
        } else {
            Outcome::Playing
        }
    }

    fn has_matching_neighbours(&self) -> bool {
        let values: FxHashMap<Cube, u32> =
            self.tiles.iter().map(|t| (t.curr_pos, t.value)).collect();

        self.tiles.iter().any(|tile| {
            Direction::ALL.iter().any(|&d| {
                values.get(&tile.curr_pos.neighbor(d)) == Some(&tile.value)
            })
        })
    }
}

// ============================================================================
// SLIDE HELPERS
// ============================================================================

fn tile_index(tiles: &[Tile], position: Cube) -> Option<usize> {
    tiles.iter().position(|t| t.curr_pos == position)
}

/// Move the tile on `start` (if any) until it hits the edge or another tile
fn slide_tile(
    tiles: &mut Vec<Tile>,
    cells: &FxHashSet<Cube>,
    start: Cube,
    direction: Direction,
    summary: &mut SlideSummary,
) {
    let Some(index) = tile_index(tiles, start) else {
        return;
    };

    loop {
        let next = tiles[index].curr_pos.neighbor(direction);
        if !cells.contains(&next) {
            return;
        }

        let Some(target) = tile_index(tiles, next) else {
            tiles[index].update_position(next);
            continue;
        };

        if tiles[target].value == tiles[index].value && !tiles[target].is_merged() {
            // Remove the higher index first so the lower one stays valid.
            let (high, low) = if index > target {
                (index, target)
            } else {
                (target, index)
            };
            let removed_high = tiles.remove(high);
            let removed_low = tiles.remove(low);
            let (mut mover, resting) = if high == index {
                (removed_high, removed_low)
            } else {
                (removed_low, removed_high)
            };
            mover.update_position(resting.curr_pos);

            let merged = Tile::merged(mover, resting);
            summary.merges += 1;
            summary.score_gained = summary.score_gained.saturating_add(merged.value);
            tiles.push(merged);
        }
        return;
    }
}

// ============================================================================
// TRAVERSAL ORDER
// ============================================================================

/// Cells sharing each value of `axis`, one line per value
fn axis_slices(cells: &[Cube], radius: u32, axis: Axis) -> Traversal {
    let orders = match axis {
        Axis::X => [SortOrder::Ascending, SortOrder::Ascending, SortOrder::Ascending],
        Axis::Y | Axis::Z => [SortOrder::Ascending, SortOrder::Descending, SortOrder::Ascending],
    };
    let radius = radius as i32;

    (-radius..=radius)
        .map(|value| {
            let mut line: Vec<Cube> = cells
                .iter()
                .copied()
                .filter(|c| c.get(axis) == value)
                .collect();
            line.sort_by(|a, b| compare_cubes(a, b, orders));
            line
        })
        .collect()
}

/// Slices run in ascending x (or y for the x axis); the directions that
/// travel toward the high end take them reversed.
fn build_traversal_order(cells: &[Cube], radius: u32) -> [Traversal; 6] {
    Direction::ALL.map(|direction| {
        let mut lines = axis_slices(cells, radius, direction.axis());
        if matches!(direction, Direction::N | Direction::NE | Direction::SE) {
            lines.iter_mut().for_each(|line| line.reverse());
        }
        lines
    })
}

// ============================================================================
// TESTS
// ============================================================================
