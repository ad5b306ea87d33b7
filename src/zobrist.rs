//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes. Castling rights and
//! en-passant file are each hashed through a single direct-indexed table keyed by
//! the full rights nibble / file value, rather than a composition of independent
//! per-bit keys; a composed XOR would cancel itself out if two different rights
//! bits toggled across a position's lifetime, which a direct table cannot do.

use std::sync::LazyLock;

use rand::Rng;

use crate::types::{Color, Piece};

pub struct ZobristKeys {
    /// piece_keys[color][piece][square]
    pub piece_keys: [[[u64; 64]; 6]; 2],
    pub side_key: u64,
    /// indexed by the raw castling-rights nibble, 0..16
    pub castle_keys: [u64; 16],
    /// indexed by en-passant target file, 0..8 (no-ep-target case contributes 0)
    pub ep_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = rand::thread_rng();
        let mut piece_keys = [[[0u64; 64]; 6]; 2];
        for color in piece_keys.iter_mut() {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.r#gen();
                }
            }
        }
        let side_key = rng.r#gen();
        let mut castle_keys = [0u64; 16];
        for key in castle_keys.iter_mut() {
            *key = rng.r#gen();
        }
        let mut ep_keys = [0u64; 8];
        for key in ep_keys.iter_mut() {
            *key = rng.r#gen();
        }
        ZobristKeys {
            piece_keys,
            side_key,
            castle_keys,
            ep_keys,
        }
    }

    #[inline]
    pub fn piece(&self, color: Color, piece: Piece, sq_index: usize) -> u64 {
        self.piece_keys[color.index()][piece.index()][sq_index]
    }

    #[inline]
    pub fn castle(&self, rights: u8) -> u64 {
        self.castle_keys[rights as usize]
    }

    #[inline]
    pub fn en_passant(&self, file: u8) -> u64 {
        self.ep_keys[file as usize]
    }
}

pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_keys_are_pairwise_distinct() {
        let mut seen = std::collections::HashSet::new();
        for color in 0..2 {
            for piece in 0..6 {
                for sq in 0..64 {
                    let key = ZOBRIST.piece_keys[color][piece][sq];
                    assert!(seen.insert(key), "duplicate zobrist key");
                }
            }
        }
    }

    #[test]
    fn castle_and_ep_tables_are_direct_indexed() {
        assert_eq!(ZOBRIST.castle_keys.len(), 16);
        assert_eq!(ZOBRIST.ep_keys.len(), 8);
    }
}
