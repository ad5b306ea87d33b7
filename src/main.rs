//! Entry point: parses CLI flags, assembles the shared search/position state,
//! and hands off to the CECP I/O loop and its search worker.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use chessd_bot::book::OpeningBook;
use chessd_bot::cecp::run_io_loop;
use chessd_bot::coordinator::{spawn_search_worker, Shared, Status};
use chessd_bot::error::EngineError;
use chessd_bot::levels::{default_level, LevelRecord};
use chessd_bot::xml;

/// chessd-bot: a CECP (xboard) chess engine.
#[derive(Parser, Debug)]
#[command(name = "chessd-bot", version, about)]
struct Cli {
    /// Named difficulty level from levels.xml (falls back to the built-in
    /// "aspirant" level if the file is absent or the name is unknown).
    #[arg(short = 'l', long = "level")]
    level: Option<String>,

    /// 1..100 factor linearly scaling the level's bonus/factor weights.
    #[arg(long = "level-factor")]
    level_factor: Option<i32>,

    /// Path to a levels.xml-shaped level-record file.
    #[arg(long = "levels-file", default_value = "levels.xml")]
    levels_file: String,

    /// Path to an eco.xml-shaped opening book file.
    #[arg(long = "book-file", default_value = "eco.xml")]
    book_file: String,

    /// Diagnostic transposition-table sizing knob; the logical table stays
    /// fixed-height regardless of this value.
    #[arg(long = "hash-mb", default_value_t = 64)]
    hash_mb: usize,

    #[arg(long = "book", overrides_with = "no_book")]
    book: bool,

    #[arg(long = "no-book", overrides_with = "book")]
    no_book: bool,
}

fn load_level(cli: &Cli) -> Result<LevelRecord, EngineError> {
    let levels = match fs::read_to_string(&cli.levels_file) {
        Ok(text) => xml::parse_levels(&text)?,
        Err(_) => Vec::new(),
    };

    let base = match &cli.level {
        Some(name) => levels
            .into_iter()
            .find(|l| &l.name == name)
            .unwrap_or_else(default_level),
        None => levels.into_iter().next().unwrap_or_else(default_level),
    };

    Ok(match cli.level_factor {
        Some(factor) => base.scaled(factor),
        None => base,
    })
}

fn load_book(cli: &Cli) -> Result<Option<OpeningBook>, EngineError> {
    let Ok(text) = fs::read_to_string(&cli.book_file) else {
        return Ok(None);
    };
    let openings = xml::parse_openings(&text)?;
    let mut book = OpeningBook::empty();
    for line in openings {
        book.add_line(&line);
    }
    Ok(Some(book))
}

fn run() -> Result<(), EngineError> {
    env_logger::init();
    let cli = Cli::parse();

    let mut level = load_level(&cli)?;
    if cli.no_book {
        level.strength = 0;
    } else if cli.book {
        level.strength = 100;
    }
    info!(
        "starting with level '{}' (depth {}, {}s, strength {})",
        level.name, level.max_depth, level.max_seconds, level.strength
    );

    let book = load_book(&cli)?;
    let shared = Shared::new(&level, book);
    // `--hash-mb` only feeds a diagnostic counter; the logical TT height is
    // fixed regardless of this value.
    let _ = cli.hash_mb;

    let worker = spawn_search_worker(shared.clone());
    run_io_loop(shared.clone());
    shared.set_status(Status::Quit);
    worker.join().ok();
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("fatal: {e}");
            eprintln!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}
