//! FEN round-trip and position-invariant coverage (see invariants 1-3).

use chessd_bot::board::Position;
use chessd_bot::history::History;
use chessd_bot::types::Move;

#[test]
fn fen_round_trips_for_a_variety_of_positions() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }
}

#[test]
fn rank_width_violations_are_rejected() {
    assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
    assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
}

/// Invariant 1: hash after a sequence of moves equals the hash obtained by
/// round-tripping through FEN (which always fully recomputes from scratch).
#[test]
fn hash_matches_a_full_recompute_after_several_moves() {
    let mut pos = Position::start_position();
    let mut history = History::new();
    for coord in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"] {
        let mv = Move::from_coord(coord).unwrap();
        pos.make_move(mv, &mut history);
    }
    let recomputed = Position::from_fen(&pos.to_fen()).unwrap();
    assert_eq!(pos.hash, recomputed.hash);
}

/// Invariant 2: make then unmake restores the position bitwise.
#[test]
fn make_unmake_round_trips_through_a_full_game_opening() {
    let mut pos = Position::start_position();
    let mut history = History::new();
    let coords = [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "f3g5", "d7d5", "e4d5", "f6d5",
    ];
    let mut snapshots = Vec::new();
    for coord in coords {
        snapshots.push(pos);
        let mv = Move::from_coord(coord).unwrap();
        pos.make_move(mv, &mut history);
    }
    for expected in snapshots.into_iter().rev() {
        pos.unmake_move(&mut history);
        assert_eq!(pos, expected);
    }
}

/// Invariant 3: every rotated occupancy orientation covers the same set of
/// squares as the 0-degree orientation (just permuted), so popcounts agree.
#[test]
fn rotated_occupancies_agree_in_popcount_with_the_base_orientation() {
    let pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let base = pos.occ[chessd_bot::board::BOTH][0].count_ones();
    for orientation in 1..4 {
        assert_eq!(pos.occ[chessd_bot::board::BOTH][orientation].count_ones(), base);
    }
}

#[test]
fn start_position_has_exactly_twenty_legal_moves() {
    let pos = Position::start_position();
    assert_eq!(pos.generate_legal_moves(false).len(), 20);
}
