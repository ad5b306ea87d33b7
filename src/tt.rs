//! Transposition table.
//!
//! Fixed-height, direct-mapped, always-replace: the entry that previously
//! occupied a hash's slot is discarded unconditionally on the next store to
//! that slot, trading some cache-hit rate for a table with no generation
//! bookkeeping and O(1) worst-case store.

use crate::types::{Bound, Move};

pub const DEFAULT_HEIGHT: usize = 4 * 1024 * 1024;

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: u32,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Move,
}

pub struct TranspositionTable {
    table: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    pub fn new(height: usize) -> Self {
        let height = height.max(1).next_power_of_two();
        TranspositionTable {
            table: vec![None; height],
            mask: height - 1,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    pub fn store(&mut self, hash: u64, depth: u32, score: i32, bound: Bound, best_move: Move) {
        let index = self.index(hash);
        self.table[index] = Some(TTEntry {
            hash,
            depth,
            score,
            bound,
            best_move,
        });
    }

    /// Probe for `hash` at or above `depth`. On a fail-soft-bound entry, the
    /// stored score is clamped against `alpha`/`beta` before being handed
    /// back: an Alpha (upper) bound only resolves the search if the stored
    /// score is already <= alpha, and conversely for a Beta (lower) bound.
    pub fn probe(
        &self,
        hash: u64,
        depth: u32,
        alpha: i32,
        beta: i32,
    ) -> Option<(i32, Option<Move>)> {
        let slot = self.table[self.index(hash)].as_ref()?;
        if slot.hash != hash {
            return None;
        }
        let best_move = if slot.best_move.is_blank() {
            None
        } else {
            Some(slot.best_move)
        };
        if slot.depth < depth {
            return None;
        }
        match slot.bound {
            Bound::Exact => Some((slot.score, best_move)),
            Bound::Alpha if slot.score <= alpha => Some((alpha, best_move)),
            Bound::Beta if slot.score >= beta => Some((beta, best_move)),
            _ => None,
        }
    }

    /// The stored move for `hash` regardless of depth or bound, for move
    /// ordering even when the score itself can't resolve the search.
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        let slot = self.table[self.index(hash)].as_ref()?;
        if slot.hash != hash || slot.best_move.is_blank() {
            None
        } else {
            Some(slot.best_move)
        }
    }

    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|slot| *slot = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn mv() -> Move {
        Move::new(Square::new(1, 4), Square::new(3, 4), None)
    }

    #[test]
    fn exact_bound_resolves_regardless_of_window() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(42, 4, 17, Bound::Exact, mv());
        assert_eq!(tt.probe(42, 4, -100, 100), Some((17, Some(mv()))));
    }

    #[test]
    fn alpha_bound_only_resolves_below_alpha() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(7, 4, 10, Bound::Alpha, mv());
        assert_eq!(tt.probe(7, 4, 10, 100), Some((10, Some(mv()))));
        assert_eq!(tt.probe(7, 4, 5, 100), None);
    }

    #[test]
    fn shallower_stored_depth_does_not_resolve() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(9, 2, 17, Bound::Exact, mv());
        assert_eq!(tt.probe(9, 4, -100, 100), None);
    }

    #[test]
    fn always_replace_overwrites_on_collision() {
        let mut tt = TranspositionTable::new(2);
        tt.store(1, 2, 5, Bound::Exact, mv());
        tt.store(1, 6, 99, Bound::Exact, mv());
        assert_eq!(tt.probe(1, 6, -100, 100), Some((99, Some(mv()))));
    }
}
