//! CECP protocol scenarios (see §8), driven straight at the line dispatcher
//! rather than over a real pipe.

use chessd_bot::book::OpeningBook;
use chessd_bot::cecp::dispatch_line;
use chessd_bot::coordinator::{spawn_search_worker, Shared, Status};
use chessd_bot::levels::default_level;
use chessd_bot::types::{Color, GameEnd};

fn harness() -> std::sync::Arc<Shared> {
    let mut level = default_level();
    level.max_depth = 2;
    level.max_seconds = 5;
    Shared::new(&level, Some(OpeningBook::empty()))
}

fn send(shared: &Shared, line: &str) -> String {
    let mut out = Vec::new();
    dispatch_line(shared, line, &mut out);
    String::from_utf8(out).unwrap()
}

#[test]
fn usermove_reply_returns_the_move_to_white() {
    let shared = harness();
    let worker = spawn_search_worker(shared.clone());

    send(&shared, "new");
    let reply = send(&shared, "usermove e2e4");

    assert!(reply.starts_with("move "), "expected a move line, got {reply:?}");
    assert_eq!(shared.position.lock().unwrap().side_to_move, Color::White);

    shared.set_status(Status::Quit);
    worker.join().unwrap();
}

#[test]
fn draw_offer_is_refused_while_material_remains() {
    let shared = harness();
    let worker = spawn_search_worker(shared.clone());

    send(&shared, "setboard 8/8/8/8/8/8/P7/k6K w - - 0 1");
    let go_reply = send(&shared, "go");
    assert!(go_reply.starts_with("move "), "expected a move line, got {go_reply:?}");

    let draw_reply = send(&shared, "draw");
    assert!(!draw_reply.contains("offer draw"));

    shared.set_status(Status::Quit);
    worker.join().unwrap();
}

#[test]
fn go_finds_the_mating_move_and_announces_checkmate() {
    let shared = harness();
    let worker = spawn_search_worker(shared.clone());

    send(&shared, "setboard 7k/5Q2/5K2/8/8/8/8/8 w - - 0 1");
    let reply = send(&shared, "go");

    assert!(reply.contains("1-0 {White has won by checkmate}"), "got {reply:?}");

    shared.set_status(Status::Quit);
    worker.join().unwrap();
}

#[test]
fn bare_kings_announce_draw_by_lack_of_material() {
    let shared = harness();
    let worker = spawn_search_worker(shared.clone());

    send(&shared, "setboard 8/8/8/8/8/8/8/k6K w - - 0 1");
    let reply = send(&shared, "go");

    assert!(reply.contains("1/2-1/2 {Draw by lack of material}"), "got {reply:?}");

    shared.set_status(Status::Quit);
    worker.join().unwrap();
}

#[test]
fn forced_move_sequence_populates_the_transposition_table() {
    let shared = harness();
    let worker = spawn_search_worker(shared.clone());

    send(&shared, "new");
    send(&shared, "force");
    for coord in [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "f3g5", "d7d5", "e4d5", "f6d5", "g5f7",
        "e8f7", "d1f3", "f7e6",
    ] {
        send(&shared, &format!("usermove {coord}"));
    }

    let pos = *shared.position.lock().unwrap();
    let history = shared.history.lock().unwrap().clone();
    let end = pos.game_end(&history);
    assert_ne!(end, GameEnd::CheckMate);
    assert_ne!(end, GameEnd::StaleMate);
    drop(history);

    send(&shared, "go");
    assert!(shared.tt.lock().unwrap().best_move(pos.hash).is_some());

    shared.set_status(Status::Quit);
    worker.join().unwrap();
}

#[test]
fn ping_echoes_its_argument() {
    let shared = harness();
    let reply = send(&shared, "ping 42");
    assert_eq!(reply, "pong 42\n");
}
