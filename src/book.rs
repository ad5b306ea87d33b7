//! Opening book: a tree of known opening lines, indexed by the move played at
//! each ply. Transpositions merge into one child (two lines sharing a prefix
//! share a node); a blank child with no move marks a line that ends before its
//! next move, i.e. the opening is exhausted from there.
//!
//! Lines are authored as whitespace-separated coordinate moves (`e2e4 e7e5
//! g1f3 ...`) rather than SAN: the engine already has a coordinate-move
//! parser for CECP traffic, and reusing it avoids a second move-text grammar
//! purely to read a data file.

use rand::Rng;

use crate::types::Move;

fn moves_match(a: Move, b: Move) -> bool {
    a.from == b.from && a.to == b.to && a.promotion == b.promotion
}

struct BookNode {
    /// `None` only for the tree root and for a blank terminus child.
    mv: Option<Move>,
    children: Vec<BookNode>,
}

impl BookNode {
    fn leaf(mv: Option<Move>) -> BookNode {
        BookNode {
            mv,
            children: Vec::new(),
        }
    }
}

pub struct OpeningBook {
    root: BookNode,
}

impl OpeningBook {
    pub fn empty() -> OpeningBook {
        OpeningBook {
            root: BookNode::leaf(None),
        }
    }

    pub fn load_from_coord_lines(text: &str) -> OpeningBook {
        let mut book = OpeningBook::empty();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let moves: Vec<Move> = line.split_whitespace().filter_map(Move::from_coord).collect();
            if !moves.is_empty() {
                book.add_line(&moves);
            }
        }
        book
    }

    pub fn add_line(&mut self, moves: &[Move]) {
        let mut node = &mut self.root;
        for &mv in moves {
            let idx = match node
                .children
                .iter()
                .position(|c| c.mv.is_some_and(|cm| moves_match(cm, mv)))
            {
                Some(i) => i,
                None => {
                    node.children.push(BookNode::leaf(Some(mv)));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx];
        }
        if !node.children.iter().any(|c| c.mv.is_none()) {
            node.children.push(BookNode::leaf(None));
        }
    }

    /// Given the moves played so far from the start position, return a
    /// randomly-chosen next move from the book, or `None` if the game has
    /// left book (a played move had no matching child) or the matched node
    /// has no children (including landing on a blank terminus).
    pub fn query(&self, played: &[Move]) -> Option<Move> {
        let mut node = &self.root;
        for &mv in played {
            node = node
                .children
                .iter()
                .find(|c| c.mv.is_some_and(|cm| moves_match(cm, mv)))?;
        }
        if node.children.is_empty() {
            return None;
        }
        let idx = rand::thread_rng().gen_range(0..node.children.len());
        node.children[idx].mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn mv(from: &str, to: &str) -> Move {
        Move::new(
            Square::from_coord(from).unwrap(),
            Square::from_coord(to).unwrap(),
            None,
        )
    }

    #[test]
    fn empty_book_never_suggests_a_move() {
        let book = OpeningBook::empty();
        assert_eq!(book.query(&[]), None);
    }

    #[test]
    fn shared_prefix_lines_merge_into_one_node() {
        let mut book = OpeningBook::empty();
        book.add_line(&[mv("e2", "e4"), mv("e7", "e5")]);
        book.add_line(&[mv("e2", "e4"), mv("c7", "c5")]);
        assert_eq!(book.root.children.len(), 1);
        assert_eq!(book.root.children[0].children.len(), 2);
    }

    #[test]
    fn query_follows_played_moves_then_picks_a_known_reply() {
        let mut book = OpeningBook::empty();
        book.add_line(&[mv("e2", "e4"), mv("e7", "e5")]);
        let reply = book.query(&[mv("e2", "e4")]);
        assert_eq!(reply, Some(mv("e7", "e5")));
    }

    #[test]
    fn leaving_book_returns_none() {
        let mut book = OpeningBook::empty();
        book.add_line(&[mv("e2", "e4"), mv("e7", "e5")]);
        assert_eq!(book.query(&[mv("d2", "d4")]), None);
    }

    #[test]
    fn reaching_the_blank_terminus_only_yields_none() {
        let mut book = OpeningBook::empty();
        book.add_line(&[mv("e2", "e4")]);
        assert_eq!(book.query(&[mv("e2", "e4")]), None);
    }
}
