//! Tile spawning policy shared by the HTTP service and local play

use rand::seq::index::sample;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{hexagon_coordinates, Cube};
use crate::tile::TileRecord;

/// How many tiles to grant and with which values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    /// Tiles granted when the board is empty
    pub opening_tiles: usize,
    /// Tiles granted after every move
    pub tiles_per_turn: usize,
    /// Chance that a granted tile is a 4 instead of a 2
    pub four_probability: f64,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            opening_tiles: 3,
            tiles_per_turn: 1,
            four_probability: 0.1,
        }
    }
}

impl SpawnRules {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rules: SpawnRules = serde_json::from_str(&content)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.four_probability) {
            anyhow::bail!(
                "four_probability must be within [0, 1], got {}",
                self.four_probability
            );
        }
        Ok(())
    }
}

/// Pick new tiles for a board of `radius` given the occupied cells.
///
/// Returns `None` when there is nowhere to put a tile. Occupied records that
/// fall outside the board are ignored.
pub fn spawn_tiles<R: Rng>(
    rules: &SpawnRules,
    radius: u32,
    occupied: &[TileRecord],
    rng: &mut R,
) -> Option<Vec<TileRecord>> {
    let taken: FxHashSet<Cube> = occupied.iter().map(TileRecord::position).collect();
    let free: Vec<Cube> = hexagon_coordinates(radius)
        .into_iter()
        .filter(|c| !taken.contains(c))
        .collect();

    if free.is_empty() {
        return None;
    }

    let wanted = if occupied.is_empty() {
        rules.opening_tiles
    } else {
        rules.tiles_per_turn
    };
    let count = wanted.min(free.len());

    let tiles = sample(rng, free.len(), count)
        .into_iter()
        .map(|i| {
            let value = if rng.gen_bool(rules.four_probability) { 4 } else { 2 };
            TileRecord::new(free[i], value)
        })
        .collect();

    Some(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_opening_spawn() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let tiles = spawn_tiles(&SpawnRules::default(), 2, &[], &mut rng).unwrap();
        assert_eq!(tiles.len(), 3);
        for t in &tiles {
            assert!(t.position().is_within(2));
            assert!(t.value == 2 || t.value == 4);
        }
        let distinct: FxHashSet<Cube> = tiles.iter().map(TileRecord::position).collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_turn_spawn_avoids_taken_cells() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let occupied: Vec<TileRecord> = hexagon_coordinates(1)
            .into_iter()
            .filter(|c| *c != Cube::ORIGIN)
            .map(|c| TileRecord::new(c, 2))
            .collect();

        let tiles = spawn_tiles(&SpawnRules::default(), 1, &occupied, &mut rng).unwrap();
        assert_eq!(tiles, vec![TileRecord::new(Cube::ORIGIN, tiles[0].value)]);
    }

    #[test]
    fn test_full_board_spawns_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let occupied: Vec<TileRecord> = hexagon_coordinates(1)
            .into_iter()
            .map(|c| TileRecord::new(c, 2))
            .collect();
        assert_eq!(spawn_tiles(&SpawnRules::default(), 1, &occupied, &mut rng), None);
    }

    #[test]
    fn test_opening_capped_by_free_cells() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let tiles = spawn_tiles(&SpawnRules::default(), 0, &[], &mut rng).unwrap();
        assert_eq!(tiles.len(), 1);
    }

    #[test]
    fn test_seeded_spawns_repeat() {
        let rules = SpawnRules::default();
        let a = spawn_tiles(&rules, 3, &[], &mut ChaCha8Rng::seed_from_u64(42));
        let b = spawn_tiles(&rules, 3, &[], &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_only_fours() {
        let rules = SpawnRules {
            four_probability: 1.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let tiles = spawn_tiles(&rules, 2, &[], &mut rng).unwrap();
        assert!(tiles.iter().all(|t| t.value == 4));
    }

    #[test]
    fn test_rules_validation() {
        let rules = SpawnRules {
            four_probability: 1.5,
            ..Default::default()
        };
        assert!(rules.validate().is_err());
        assert!(SpawnRules::default().validate().is_ok());

        let partial: SpawnRules = serde_json::from_str(r#"{"tiles_per_turn": 2}"#).unwrap();
        assert_eq!(partial.tiles_per_turn, 2);
        assert_eq!(partial.opening_tiles, 3);
    }
}
