//! CECP (xboard) protocol: the I/O worker. Reads one command per line,
//! mutates shared board/history state directly for commands that change the
//! game, and hands off to the search worker (via [`crate::coordinator`]) for
//! commands that request a move.
//!
//! [`dispatch_line`] is the actual command handler, taking an arbitrary
//! `Write` sink instead of talking to stdout directly, so tests can drive it
//! with an in-memory buffer instead of spawning the binary over a real pipe.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use log::warn;

use crate::board::Position;
use crate::coordinator::{Shared, Status};
use crate::types::{GameEnd, Move};

const FEATURE_LINE: &str = "feature ping=1 setboard=1 playother=1 san=0 usermove=1 time=0 draw=1 \
sigint=0 sigterm=0 reuse=1 analyze=0 myname=\"chessd-bot\" variants=\"normal\" colors=0 ics=0 \
name=1 pause=0 done=1";

const NOOP_COMMANDS: &[&str] = &[
    "hard", "easy", "post", "nopost", "analyze", "name", "rating", "ics", "computer", "random",
    "edit", "hint", "bk", "result", "white", "black", "time", "otim", "pause", "resume",
];

pub fn run_io_loop(shared: Arc<Shared>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        dispatch_line(&shared, &line, &mut stdout);
        stdout.flush().ok();
        if shared.status() == Status::Quit {
            break;
        }
    }
}

/// Handle one command line, writing any response lines to `out`. Mutates
/// `shared` in place; commands that request a move block on the search
/// worker via [`Shared::wait_until_idle`].
pub fn dispatch_line(shared: &Shared, line: &str, out: &mut impl Write) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&cmd) = parts.first() else { return };

    if NOOP_COMMANDS.contains(&cmd) {
        return;
    }

    match cmd {
        "xboard" => {}
        "protover" => {
            if parts.get(1) == Some(&"2") {
                writeln!(out, "{FEATURE_LINE}").ok();
            }
        }
        "accepted" | "rejected" => {}
        "new" => {
            *shared.position.lock().unwrap() = Position::start_position();
            shared.history.lock().unwrap().clear();
            shared.set_status(Status::Nop);
        }
        "variant" => {
            // Only "normal" is supported; anything else is silently ignored
            // rather than rejected, matching the other no-op commands.
        }
        "quit" => shared.set_status(Status::Quit),
        "force" => shared.set_status(Status::Force),
        "go" => {
            shared.set_status(Status::Search);
            shared.wait_until_idle();
            emit_move_and_game_over(shared, out);
        }
        "playother" => shared.set_status(Status::Nop),
        "level" => {
            if parts.len() >= 4 {
                configure_level_clock(shared, parts[1], parts[2], parts[3]);
            }
        }
        "st" => {
            if let Some(n) = parts.get(1).and_then(|s| s.parse::<u32>().ok()) {
                *shared.max_seconds.lock().unwrap() = n;
            }
        }
        "sd" => {
            if let Some(n) = parts.get(1).and_then(|s| s.parse::<u32>().ok()) {
                if n >= 2 {
                    *shared.max_depth.lock().unwrap() = n;
                }
            }
        }
        "usermove" => {
            if let Some(token) = parts.get(1) {
                handle_usermove(shared, token, out);
            }
        }
        "?" => shared.stop.stop(),
        "ping" => {
            if let Some(n) = parts.get(1) {
                writeln!(out, "pong {n}").ok();
            }
        }
        "draw" => {
            let pos = *shared.position.lock().unwrap();
            let history = shared.history.lock().unwrap();
            if pos.game_end(&history).is_draw() {
                writeln!(out, "offer draw").ok();
            }
        }
        "setboard" => {
            let fen = parts[1..].join(" ");
            match Position::from_fen(&fen) {
                Ok(pos) => {
                    *shared.position.lock().unwrap() = pos;
                    shared.history.lock().unwrap().clear();
                    shared.disable_book();
                }
                Err(_) => {
                    warn!("setboard rejected malformed FEN: {fen}");
                    writeln!(out, "Illegal move: {line}").ok();
                }
            }
        }
        "undo" => unmake(shared, 1),
        "remove" => unmake(shared, 2),
        _ => {
            warn!("unrecognized command: {line}");
            writeln!(out, "Error (unknown command): {line}").ok();
        }
    }
}

fn configure_level_clock(shared: &Shared, mps: &str, base: &str, inc: &str) {
    let mps: u32 = mps.parse().unwrap_or(0).max(1);
    // `base` is minutes[:seconds]; only the minutes form is accepted here.
    let base_seconds: u32 = base.parse::<u32>().unwrap_or(0) * 60;
    let inc: u32 = inc.parse().unwrap_or(0);
    let candidate = base_seconds / mps + inc;
    let mut current = shared.max_seconds.lock().unwrap();
    if candidate < *current {
        *current = candidate;
    }
}

fn handle_usermove(shared: &Shared, token: &str, out: &mut impl Write) {
    let Some(mv) = Move::from_coord(token) else {
        warn!("usermove token did not parse as a coordinate move: {token}");
        writeln!(out, "Illegal move: {token}").ok();
        return;
    };

    let applied = {
        let mut pos_guard = shared.position.lock().unwrap();
        let legal = pos_guard.generate_legal_moves(false);
        let matched = legal
            .into_iter()
            .find(|m| m.from == mv.from && m.to == mv.to && m.promotion == mv.promotion);
        match matched {
            Some(m) => {
                let before = *pos_guard;
                *pos_guard = pos_guard.apply_move(m);
                drop(pos_guard);
                shared.history.lock().unwrap().push(before, m);
                true
            }
            None => false,
        }
    };

    if !applied {
        warn!("usermove is not a legal move in the current position: {token}");
        writeln!(out, "Illegal move: {token}").ok();
        return;
    }

    if shared.status() != Status::Force {
        shared.set_status(Status::Search);
        shared.wait_until_idle();
        emit_move_and_game_over(shared, out);
    }
}

fn unmake(shared: &Shared, count: u32) {
    let mut pos_guard = shared.position.lock().unwrap();
    let mut history_guard = shared.history.lock().unwrap();
    for _ in 0..count {
        if let Some((prev, _)) = history_guard.pop() {
            *pos_guard = prev;
        } else {
            break;
        }
    }
}

fn emit_move_and_game_over(shared: &Shared, out: &mut impl Write) {
    if let Some(mv) = *shared.last_move.lock().unwrap() {
        if !mv.is_blank() {
            writeln!(out, "move {}", mv.to_coord()).ok();
        }
    }

    let pos = *shared.position.lock().unwrap();
    let history = shared.history.lock().unwrap();
    match pos.game_end(&history) {
        GameEnd::CheckMate => {
            let winner_is_white = pos.side_to_move == crate::types::Color::Black;
            if winner_is_white {
                writeln!(out, "1-0 {{White has won by checkmate}}").ok();
            } else {
                writeln!(out, "0-1 {{Black has won by checkmate}}").ok();
            }
        }
        GameEnd::StaleMate => {
            writeln!(out, "1/2-1/2 {{Stalemate}}").ok();
        }
        GameEnd::Repetition => {
            writeln!(out, "1/2-1/2 {{Draw by three fold repetition rule}}").ok();
        }
        GameEnd::FiftyMove => {
            writeln!(out, "1/2-1/2 {{Draw by 50 movements rule}}").ok();
        }
        GameEnd::InsufficientMaterial => {
            writeln!(out, "1/2-1/2 {{Draw by lack of material}}").ok();
        }
        GameEnd::InProgress => {}
    }
}
