//! Server state management
//!
//! Shared spawn rules and the random source behind every grant.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use hex2048_core::{spawn_tiles, SpawnRules, TileRecord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Server-wide shared state
pub struct ServerState {
    pub rules: SpawnRules,
    rng: Mutex<ChaCha8Rng>,
    requests: AtomicU64,
}

impl ServerState {
    pub fn new(rules: SpawnRules, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            rules,
            rng: Mutex::new(rng),
            requests: AtomicU64::new(0),
        }
    }

    /// Grant tiles for a board, advancing the shared rng
    pub fn grant(&self, radius: u32, occupied: &[TileRecord]) -> Option<Vec<TileRecord>> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        // rng state stays valid even if a holder panicked
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        spawn_tiles(&self.rules, radius, occupied, &mut *rng)
    }

    /// Number of spawn requests served
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(SpawnRules::default(), None)
    }
}
