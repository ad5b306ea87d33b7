//! Error taxonomy.
//!
//! `EngineError` covers startup/configuration failures that unwind the process.
//! Protocol errors and illegal moves are deliberately NOT `EngineError` variants:
//! they are recoverable, reported to the peer, and handled locally by the
//! command dispatcher as plain `Result<(), String>`/enum values.

use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    Fen(FenError),
    Io(std::io::Error),
    Config(ConfigError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Fen(e) => write!(f, "invalid FEN: {e}"),
            EngineError::Io(e) => write!(f, "I/O error: {e}"),
            EngineError::Config(e) => write!(f, "configuration error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Fen(e) => Some(e),
            EngineError::Io(e) => Some(e),
            EngineError::Config(e) => Some(e),
        }
    }
}

impl From<FenError> for EngineError {
    fn from(e: FenError) -> Self {
        EngineError::Fen(e)
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e)
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Config(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    TooFewFields,
    /// A rank did not sum to exactly 8 files.
    RankWidth,
    BadPieceChar(char),
    BadSideToMove(char),
    BadCastling(char),
    BadEnPassant(String),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields => write!(f, "FEN has too few fields"),
            FenError::RankWidth => write!(f, "rank does not sum to 8 files"),
            FenError::BadPieceChar(c) => write!(f, "unrecognized piece character '{c}'"),
            FenError::BadSideToMove(c) => write!(f, "unrecognized side-to-move character '{c}'"),
            FenError::BadCastling(c) => write!(f, "unrecognized castling character '{c}'"),
            FenError::BadEnPassant(s) => write!(f, "unrecognized en-passant target '{s}'"),
        }
    }
}

impl std::error::Error for FenError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A levels/book record file was present but malformed.
    Xml(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Xml(msg) => write!(f, "malformed record file: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
