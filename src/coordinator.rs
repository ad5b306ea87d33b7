//! Two-worker coordination: the I/O worker (see [`crate::cecp`]) mutates
//! shared position/history state directly and flips `status` to hand search
//! off to the search worker spawned here; the search worker waits on a
//! condition variable while `Nop`/`Force` and runs [`crate::search::search_root`]
//! while `Search`.

use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::board::Position;
use crate::book::OpeningBook;
use crate::history::History;
use crate::levels::{LevelRecord, Weights};
use crate::search::{search_root, SearchContext};
use crate::sync::StopFlag;
use crate::timer::DeadlineTimer;
use crate::tt::TranspositionTable;
use crate::types::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Nop,
    Force,
    Search,
    Ponder,
    Quit,
}

pub struct Shared {
    pub status: Mutex<Status>,
    pub cv: Condvar,
    pub position: Mutex<Position>,
    pub history: Mutex<History>,
    pub tt: Mutex<TranspositionTable>,
    pub stop: StopFlag,
    pub weights: Mutex<Weights>,
    pub book: Mutex<Option<OpeningBook>>,
    pub max_depth: Mutex<u32>,
    pub max_seconds: Mutex<u32>,
    pub last_move: Mutex<Option<Move>>,
}

impl Shared {
    pub fn new(level: &LevelRecord, book: Option<OpeningBook>) -> Arc<Shared> {
        Arc::new(Shared {
            status: Mutex::new(Status::Nop),
            cv: Condvar::new(),
            position: Mutex::new(Position::start_position()),
            history: Mutex::new(History::new()),
            tt: Mutex::new(TranspositionTable::new(crate::tt::DEFAULT_HEIGHT)),
            stop: StopFlag::new(),
            weights: Mutex::new(level.weights),
            book: Mutex::new(if level.book_enabled() { book } else { None }),
            max_depth: Mutex::new(level.max_depth),
            max_seconds: Mutex::new(level.max_seconds),
            last_move: Mutex::new(None),
        })
    }

    pub fn set_status(&self, status: Status) {
        *self.status.lock().unwrap() = status;
        self.cv.notify_all();
    }

    pub fn status(&self) -> Status {
        *self.status.lock().unwrap()
    }

    /// Block until the search worker leaves `Search`/`Ponder`, used by the I/O
    /// worker after requesting a think.
    pub fn wait_until_idle(&self) {
        let mut guard = self.status.lock().unwrap();
        while matches!(*guard, Status::Search | Status::Ponder) {
            guard = self.cv.wait(guard).unwrap();
        }
    }

    /// Disables the opening book for the rest of the game, per `setboard`'s
    /// contract: the history needed to walk the book tree has been discarded.
    pub fn disable_book(&self) {
        *self.book.lock().unwrap() = None;
    }
}

pub fn spawn_search_worker(shared: Arc<Shared>) -> JoinHandle<()> {
    thread::spawn(move || loop {
        let mut guard = shared.status.lock().unwrap();
        loop {
            match *guard {
                Status::Search => break,
                Status::Quit => return,
                _ => guard = shared.cv.wait(guard).unwrap(),
            }
        }
        drop(guard);

        let pos = *shared.position.lock().unwrap();
        let history = shared.history.lock().unwrap().clone();
        let weights = *shared.weights.lock().unwrap();
        let max_depth = *shared.max_depth.lock().unwrap();
        let max_seconds = *shared.max_seconds.lock().unwrap();

        shared.stop.reset();
        let timer = DeadlineTimer::start(Duration::from_secs(max_seconds as u64), shared.stop.clone());

        let best_move = {
            let book_guard = shared.book.lock().unwrap();
            let mut tt_guard = shared.tt.lock().unwrap();
            let mut ctx = SearchContext {
                weights: &weights,
                book: book_guard.as_ref(),
                tt: &mut tt_guard,
                stop: shared.stop.clone(),
                nodes: 0,
            };
            search_root(&pos, &history, max_depth, &mut ctx)
        };

        if let Some(timer) = timer {
            timer.cancel();
        }

        if !best_move.is_blank() {
            let mut pos_guard = shared.position.lock().unwrap();
            let before = *pos_guard;
            *pos_guard = pos_guard.apply_move(best_move);
            drop(pos_guard);
            shared.history.lock().unwrap().push(before, best_move);
        }
        *shared.last_move.lock().unwrap() = Some(best_move);

        shared.set_status(Status::Nop);
    })
}
