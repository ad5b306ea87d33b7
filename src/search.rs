//! Iterative-deepening negamax search with alpha-beta pruning.
//!
//! `search_root` drives the top-level iteration; `alpha_beta` is the
//! recursive negamax worker. Both consult the opening book before doing any
//! tree work, and both respect a shared [`crate::sync::StopFlag`] set by the
//! wall-clock alarm ([`crate::timer`]) or by an explicit interrupt.

use std::time::Instant;

use log::debug;

use crate::board::Position;
use crate::book::OpeningBook;
use crate::eval::evaluate;
use crate::history::History;
use crate::levels::Weights;
use crate::sync::StopFlag;
use crate::tt::TranspositionTable;
use crate::types::{Bound, Color, GameEnd, Move, Piece};

/// Mirrors the original engine's `MAX_HEU`: a score magnitude no real
/// evaluation reaches, used as both the initial alpha-beta window and the
/// checkmate/draw-avoidance terminal score.
pub const MAX: i32 = 999_999;

pub struct SearchContext<'a> {
    pub weights: &'a Weights,
    pub book: Option<&'a OpeningBook>,
    pub tt: &'a mut TranspositionTable,
    pub stop: StopFlag,
    /// Leaf/node visits in the current `search_root` call, for the
    /// per-iteration debug log line. Not consulted by search logic itself.
    pub nodes: u64,
}

pub fn search_root(
    pos: &Position,
    history: &History,
    max_depth: u32,
    ctx: &mut SearchContext,
) -> Move {
    let perspective = pos.side_to_move;

    if let Some(book) = ctx.book {
        if let Some(mv) = book.query(&history.peek_moves()) {
            return mv;
        }
    }

    let mut last_completed: Option<Move> = None;
    let mut ply = 2;
    let started = Instant::now();
    while ply <= max_depth.max(2) {
        let result = alpha_beta(pos, history, -MAX, MAX, ply, perspective, ctx);
        if ctx.stop.is_stopped() {
            if last_completed.is_none() {
                last_completed = Some(result);
            }
            break;
        }
        debug!(
            "ply {ply} depth complete: score={} nodes={} elapsed={:?}",
            result.eval,
            ctx.nodes,
            started.elapsed()
        );
        last_completed = Some(result);
        ply += 2;
    }

    last_completed.unwrap_or_else(Move::blank)
}

fn piece_value(p: Piece) -> i32 {
    match p {
        Piece::Pawn => 1,
        Piece::Knight | Piece::Bishop => 3,
        Piece::Rook => 5,
        Piece::Queen => 9,
        Piece::King => 100,
    }
}

/// MVV/LVA ordering: score each capture `value[attacker] / value[victim]`,
/// descending, ties broken by input order; the transposition table's move (if
/// any) is then promoted to the front.
fn order_moves(moves: Vec<Move>, pos: &Position, hash_move: Option<Move>) -> Vec<Move> {
    let mut scored: Vec<(f64, usize, Move)> = moves
        .into_iter()
        .enumerate()
        .map(|(i, mv)| {
            let score = match (pos.piece_at(mv.from), pos.piece_at(mv.to)) {
                (Some((_, attacker)), Some((_, victim))) => {
                    piece_value(attacker) as f64 / piece_value(victim) as f64
                }
                _ => f64::MIN,
            };
            (score, i, mv)
        })
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap().then(a.1.cmp(&b.1)));
    let mut ordered: Vec<Move> = scored.into_iter().map(|(_, _, mv)| mv).collect();

    if let Some(hm) = hash_move {
        if let Some(idx) = ordered
            .iter()
            .position(|m| m.from == hm.from && m.to == hm.to && m.promotion == hm.promotion)
        {
            let hm = ordered.remove(idx);
            ordered.insert(0, hm);
        }
    }
    ordered
}

fn alpha_beta(
    pos: &Position,
    history: &History,
    mut alpha: i32,
    beta: i32,
    depth: u32,
    perspective: Color,
    ctx: &mut SearchContext,
) -> Move {
    ctx.nodes += 1;

    if let Some(book) = ctx.book {
        if let Some(mv) = book.query(&history.peek_moves()) {
            return mv;
        }
    }

    if let Some((score, best_move)) = ctx.tt.probe(pos.hash, depth, alpha, beta) {
        let mut m = best_move.unwrap_or_else(Move::blank);
        m.eval = score;
        return m;
    }

    if depth == 0 {
        let mut m = Move::blank();
        m.eval = evaluate(pos, perspective, ctx.weights);
        return m;
    }

    let hash_move = ctx.tt.best_move(pos.hash);
    let legal = order_moves(pos.generate_legal_moves(false), pos, hash_move);

    let original_alpha = alpha;
    let mut best: Option<Move> = None;
    let mut bound = Bound::Alpha;

    for mv in legal {
        let mut m = mv;
        let child_pos = pos.apply_move(mv);
        let mut child_history = history.clone();
        child_history.push(*pos, mv);
        let end = child_pos.game_end(&child_history);

        m.eval = match end {
            GameEnd::CheckMate => {
                if child_pos.side_to_move == perspective {
                    -MAX
                } else {
                    MAX
                }
            }
            GameEnd::StaleMate
            | GameEnd::Repetition
            | GameEnd::FiftyMove
            | GameEnd::InsufficientMaterial => -MAX,
            GameEnd::InProgress => {
                let child = alpha_beta(
                    &child_pos,
                    &child_history,
                    -beta,
                    -alpha,
                    depth - 1,
                    perspective,
                    ctx,
                );
                -child.eval
            }
        };

        if m.eval >= beta {
            best = Some(m);
            bound = Bound::Beta;
            break;
        } else if m.eval > alpha {
            best = Some(m);
            alpha = m.eval;
            bound = Bound::Exact;
        } else if best.map(|b| m.eval > b.eval).unwrap_or(true) {
            best = Some(m);
        }

        if ctx.stop.is_stopped() {
            break;
        }
    }

    let best = best.unwrap_or_else(|| {
        let mut m = Move::blank();
        m.eval = evaluate(pos, perspective, ctx.weights);
        m
    });

    if ctx.stop.is_stopped() {
        return best;
    }

    let final_bound = if bound == Bound::Exact && best.eval <= original_alpha {
        Bound::Alpha
    } else {
        bound
    };
    ctx.tt.store(pos.hash, depth, best.eval, final_bound, best);
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::default_level;
    use crate::tt::TranspositionTable;

    #[test]
    fn finds_mate_in_one() {
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        let history = History::new();
        let weights = default_level().weights;
        let mut tt = TranspositionTable::new(1024);
        let mut ctx = SearchContext {
            weights: &weights,
            book: None,
            tt: &mut tt,
            stop: StopFlag::new(),
            nodes: 0,
        };
        let mv = search_root(&pos, &history, 2, &mut ctx);
        assert_eq!(mv.from, crate::types::Square::from_coord("d1").unwrap());
        assert_eq!(mv.to, crate::types::Square::from_coord("d8").unwrap());
    }

    #[test]
    fn book_move_short_circuits_search() {
        let mut book = OpeningBook::empty();
        let e4 = Move::from_coord("e2e4").unwrap();
        book.add_line(&[e4]);
        let pos = Position::start_position();
        let history = History::new();
        let weights = default_level().weights;
        let mut tt = TranspositionTable::new(1024);
        let mut ctx = SearchContext {
            weights: &weights,
            book: Some(&book),
            tt: &mut tt,
            stop: StopFlag::new(),
            nodes: 0,
        };
        let mv = search_root(&pos, &history, 4, &mut ctx);
        assert_eq!(mv.from, e4.from);
        assert_eq!(mv.to, e4.to);
    }
}
