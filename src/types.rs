//! Core value types shared across the engine: colors, pieces, squares and moves.
//!
//! Square coordinates follow the wire contract: rank 0-7 with rank 0 = rank 1,
//! file 0-7 with file 0 = the h-file and file 7 = the a-file. Square index = rank*8+file.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Piece {
        match idx {
            0 => Piece::Pawn,
            1 => Piece::Knight,
            2 => Piece::Bishop,
            3 => Piece::Rook,
            4 => Piece::Queen,
            5 => Piece::King,
            _ => panic!("invalid piece index {idx}"),
        }
    }

    pub fn to_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        if color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    pub fn from_char(c: char) -> Option<(Color, Piece)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((color, piece))
    }
}

/// A square index in `rank*8+file` form, file 0 = h-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    #[inline]
    pub fn new(rank: u8, file: u8) -> Square {
        debug_assert!(rank < 8 && file < 8);
        Square(rank * 8 + file)
    }

    #[inline]
    pub fn from_index(idx: usize) -> Square {
        Square(idx as u8)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// File letter for coordinate notation: file 0 = 'h', file 7 = 'a'.
    pub fn file_char(self) -> char {
        (b'h' - self.file()) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank()) as char
    }

    pub fn file_from_char(c: char) -> Option<u8> {
        if !('a'..='h').contains(&c) {
            return None;
        }
        Some(b'h' - c as u8)
    }

    pub fn rank_from_char(c: char) -> Option<u8> {
        if !('1'..='8').contains(&c) {
            return None;
        }
        Some(c as u8 - b'1')
    }

    /// Parse a bare two-character coordinate such as "e4".
    pub fn from_coord(s: &str) -> Option<Square> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return None;
        }
        let file = Square::file_from_char(chars[0])?;
        let rank = Square::rank_from_char(chars[1])?;
        Some(Square::new(rank, file))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

/// A value-type move record. No ownership of board state; `eval` is a transient
/// slot used by search and move ordering, not part of move identity.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
    pub eval: i32,
}

impl Move {
    pub fn new(from: Square, to: Square, promotion: Option<Piece>) -> Move {
        Move {
            from,
            to,
            promotion,
            eval: 0,
        }
    }

    pub fn blank() -> Move {
        Move {
            from: Square(0),
            to: Square(0),
            promotion: None,
            eval: 0,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.from == self.to
    }

    /// `<src-file><src-rank><dst-file><dst-rank>[<promo>]`, e.g. `e2e4`, `e7e8q`.
    pub fn to_coord(self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(p) = self.promotion {
            s.push(match p {
                Piece::Queen => 'q',
                Piece::Rook => 'r',
                Piece::Bishop => 'b',
                Piece::Knight => 'n',
                _ => 'q',
            });
        }
        s
    }

    pub fn from_coord(s: &str) -> Option<Move> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return None;
        }
        let from_file = Square::file_from_char(chars[0])?;
        let from_rank = Square::rank_from_char(chars[1])?;
        let to_file = Square::file_from_char(chars[2])?;
        let to_rank = Square::rank_from_char(chars[3])?;
        let promotion = if chars.len() == 5 {
            match chars[4] {
                'q' => Some(Piece::Queen),
                'r' => Some(Piece::Rook),
                'b' => Some(Piece::Bishop),
                'n' => Some(Piece::Knight),
                _ => return None,
            }
        } else {
            None
        };
        Some(Move::new(
            Square::new(from_rank, from_file),
            Square::new(to_rank, to_file),
            promotion,
        ))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coord())
    }
}

/// Bound kind stored in a transposition entry, per the fail-soft adjustment policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Alpha,
    Beta,
    Exact,
    Invalid,
}

/// Result of the generic end-of-game predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnd {
    InProgress,
    CheckMate,
    StaleMate,
    Repetition,
    FiftyMove,
    InsufficientMaterial,
}

impl GameEnd {
    pub fn is_over(self) -> bool {
        !matches!(self, GameEnd::InProgress)
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameEnd::StaleMate
                | GameEnd::Repetition
                | GameEnd::FiftyMove
                | GameEnd::InsufficientMaterial
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_file_orientation_matches_wire_contract() {
        assert_eq!(Square::file_from_char('h'), Some(0));
        assert_eq!(Square::file_from_char('a'), Some(7));
        assert_eq!(Square::new(0, 0).file_char(), 'h');
        assert_eq!(Square::new(0, 7).file_char(), 'a');
    }

    #[test]
    fn move_coord_round_trip() {
        let m = Move::new(Square::new(1, 3), Square::new(3, 3), None);
        assert_eq!(m.to_coord(), "e2e4");
        assert_eq!(Move::from_coord("e2e4"), Some(m));
    }

    #[test]
    fn move_coord_round_trip_with_promotion() {
        let m = Move::new(Square::new(6, 3), Square::new(7, 3), Some(Piece::Queen));
        assert_eq!(m.to_coord(), "e7e8q");
        assert_eq!(Move::from_coord("e7e8q"), Some(m));
    }
}
