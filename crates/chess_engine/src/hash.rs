//! Position fingerprints and the repetition cache
//!
//! Fingerprints are Zobrist hashes of the placement, side to move, castling
//! rights and legal en passant square. Move counters are not part of the key,
//! so a position reached again later in the game hashes identically.

use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Chess, EnPassantMode};
use std::collections::HashSet;

/// Fingerprint of a position
pub fn position_hash(pos: &Chess) -> Zobrist64 {
    pos.zobrist_hash(EnPassantMode::Legal)
}

/// Positions the engine has already played from.
///
/// Grows for the lifetime of the engine; nothing is ever removed.
#[derive(Debug, Default, Clone)]
pub struct RepetitionCache {
    seen: HashSet<Zobrist64>,
}

impl RepetitionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position. Returns `false` if it was already known.
    pub fn insert(&mut self, pos: &Chess) -> bool {
        self.seen.insert(position_hash(pos))
    }

    pub fn contains(&self, pos: &Chess) -> bool {
        self.seen.contains(&position_hash(pos))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{apply_uci, new_game};

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(position_hash(&new_game()), position_hash(&new_game()));
    }

    #[test]
    fn test_hash_changes_after_move() {
        let start = new_game();
        let mut pos = start.clone();
        apply_uci(&mut pos, "g1f3").unwrap();
        assert_ne!(position_hash(&start), position_hash(&pos));
    }

    #[test]
    fn test_same_position_different_path() {
        // Knights out and back: placement repeats with higher move counters
        let start = new_game();
        let mut pos = start.clone();
        for token in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            apply_uci(&mut pos, token).unwrap();
        }
        assert_eq!(position_hash(&start), position_hash(&pos));
    }

    #[test]
    fn test_cache_grows_monotonically() {
        let mut cache = RepetitionCache::new();
        let mut pos = new_game();
        assert!(cache.is_empty());

        assert!(cache.insert(&pos));
        assert!(!cache.insert(&pos));
        assert_eq!(cache.len(), 1);

        apply_uci(&mut pos, "e2e4").unwrap();
        assert!(!cache.contains(&pos));
        cache.insert(&pos);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&new_game()));
    }
}
