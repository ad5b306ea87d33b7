//! Evaluation weights and named difficulty levels.
//!
//! `Weights` is the flat record §4.D draws its factors and bonuses from. It is
//! read-only once a game starts: the CLI selects a named `LevelRecord` and the
//! numeric `--level` adjustment (if any) is applied once, at startup.

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weights {
    pub pawn_val: i32,
    pub bishop_val: i32,
    pub knight_val: i32,
    pub rook_val: i32,
    pub queen_val: i32,
    pub king_val: i32,

    pub factor_material: i32,
    pub factor_development: i32,
    pub factor_pawn: i32,
    pub factor_bishop: i32,
    pub factor_king: i32,
    pub factor_knight: i32,
    pub factor_queen: i32,
    pub factor_rook: i32,

    pub bonus_early_queen_move: i32,
    pub bonus_early_bishop_stuck: i32,
    pub bonus_early_knight_stuck: i32,
    pub bonus_has_castled: i32,
    pub bonus_hasnt_castled: i32,

    pub bonus_passed_pawn: i32,
    pub bonus_isolated_pawn: i32,
    pub bonus_backward_pawn: i32,
    pub bonus_doubled_pawn: i32,
    pub bonus_tripled_pawn: i32,

    pub bonus_doubled_bishop: i32,
    pub bonus_fianchetto_bishop: i32,

    pub bonus_knight_on_edge: i32,
    pub bonus_knight_on_hole: i32,

    pub bonus_rook_open_file: i32,
    pub bonus_rook_halfopen_file: i32,
    pub bonus_queen_open_file: i32,
    pub bonus_queen_halfopen_file: i32,

    pub bonus_center_control: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelRecord {
    pub name: String,
    pub max_depth: u32,
    pub max_seconds: u32,
    /// 0..=100; gates opening-book use (see `book_threshold`) and scales a
    /// `--level` numeric adjustment.
    pub strength: u8,
    pub weights: Weights,
}

/// Strength at or above which the opening book is consulted.
pub const BOOK_THRESHOLD: u8 = 50;

impl LevelRecord {
    pub fn book_enabled(&self) -> bool {
        self.strength >= BOOK_THRESHOLD
    }

    /// Linearly scale every bonus/factor field (not the piece values or the
    /// clock/depth fields) by `factor`/100, per the `--level` CLI adjustment.
    pub fn scaled(&self, factor: i32) -> LevelRecord {
        let s = |v: i32| v * factor / 100;
        let w = &self.weights;
        let weights = Weights {
            pawn_val: w.pawn_val,
            bishop_val: w.bishop_val,
            knight_val: w.knight_val,
            rook_val: w.rook_val,
            queen_val: w.queen_val,
            king_val: w.king_val,
            factor_material: s(w.factor_material),
            factor_development: s(w.factor_development),
            factor_pawn: s(w.factor_pawn),
            factor_bishop: s(w.factor_bishop),
            factor_king: s(w.factor_king),
            factor_knight: s(w.factor_knight),
            factor_queen: s(w.factor_queen),
            factor_rook: s(w.factor_rook),
            bonus_early_queen_move: s(w.bonus_early_queen_move),
            bonus_early_bishop_stuck: s(w.bonus_early_bishop_stuck),
            bonus_early_knight_stuck: s(w.bonus_early_knight_stuck),
            bonus_has_castled: s(w.bonus_has_castled),
            bonus_hasnt_castled: s(w.bonus_hasnt_castled),
            bonus_passed_pawn: s(w.bonus_passed_pawn),
            bonus_isolated_pawn: s(w.bonus_isolated_pawn),
            bonus_backward_pawn: s(w.bonus_backward_pawn),
            bonus_doubled_pawn: s(w.bonus_doubled_pawn),
            bonus_tripled_pawn: s(w.bonus_tripled_pawn),
            bonus_doubled_bishop: s(w.bonus_doubled_bishop),
            bonus_fianchetto_bishop: s(w.bonus_fianchetto_bishop),
            bonus_knight_on_edge: s(w.bonus_knight_on_edge),
            bonus_knight_on_hole: s(w.bonus_knight_on_hole),
            bonus_rook_open_file: s(w.bonus_rook_open_file),
            bonus_rook_halfopen_file: s(w.bonus_rook_halfopen_file),
            bonus_queen_open_file: s(w.bonus_queen_open_file),
            bonus_queen_halfopen_file: s(w.bonus_queen_halfopen_file),
            bonus_center_control: s(w.bonus_center_control),
        };
        LevelRecord {
            name: self.name.clone(),
            max_depth: self.max_depth,
            max_seconds: self.max_seconds,
            strength: self.strength,
            weights,
        }
    }
}

/// Built-in level used when no `levels.xml` is present, and the fallback entry
/// in any loaded list whose lookup by name fails.
pub fn default_level() -> LevelRecord {
    LevelRecord {
        name: "aspirant".to_string(),
        max_depth: 4,
        max_seconds: 5,
        strength: 40,
        weights: Weights {
            pawn_val: 100,
            bishop_val: 325,
            knight_val: 320,
            rook_val: 500,
            queen_val: 900,
            king_val: 20000,
            factor_material: 1,
            factor_development: 1,
            factor_pawn: 1,
            factor_bishop: 1,
            factor_king: 1,
            factor_knight: 1,
            factor_queen: 1,
            factor_rook: 1,
            bonus_early_queen_move: -15,
            bonus_early_bishop_stuck: -10,
            bonus_early_knight_stuck: -10,
            bonus_has_castled: 20,
            bonus_hasnt_castled: -15,
            bonus_passed_pawn: 25,
            bonus_isolated_pawn: -12,
            bonus_backward_pawn: -8,
            bonus_doubled_pawn: -10,
            bonus_tripled_pawn: -20,
            bonus_doubled_bishop: 15,
            bonus_fianchetto_bishop: 10,
            bonus_knight_on_edge: -8,
            bonus_knight_on_hole: 12,
            bonus_rook_open_file: 15,
            bonus_rook_halfopen_file: 8,
            bonus_queen_open_file: 6,
            bonus_queen_halfopen_file: 3,
            bonus_center_control: 2,
        },
    }
}

/// One `<level name="..." ...><search .../><heuristic .../></level>` record's
/// flattened attributes, as handed back by [`crate::xml::parse_levels`].
pub struct RawLevelAttrs<'a> {
    pub name: &'a str,
    pub attrs: Vec<(&'a str, &'a str)>,
}

pub fn record_from_attrs(raw: &RawLevelAttrs) -> Result<LevelRecord, ConfigError> {
    let get = |key: &str| -> Result<i32, ConfigError> {
        raw.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .ok_or_else(|| ConfigError::Xml(format!("level '{}' missing '{key}'", raw.name)))?
            .1
            .parse::<i32>()
            .map_err(|_| ConfigError::Xml(format!("level '{}' has non-integer '{key}'", raw.name)))
    };

    let weights = Weights {
        pawn_val: get("pawn_val")?,
        bishop_val: get("bishop_val")?,
        knight_val: get("knight_val")?,
        rook_val: get("rook_val")?,
        queen_val: get("queen_val")?,
        king_val: get("king_val")?,
        factor_material: get("factor_material")?,
        factor_development: get("factor_development")?,
        factor_pawn: get("factor_pawn")?,
        factor_bishop: get("factor_bishop")?,
        factor_king: get("factor_king")?,
        factor_knight: get("factor_knight")?,
        factor_queen: get("factor_queen")?,
        factor_rook: get("factor_rook")?,
        bonus_early_queen_move: get("bonus_early_queen_move")?,
        bonus_early_bishop_stuck: get("bonus_early_bishop_stuck")?,
        bonus_early_knight_stuck: get("bonus_early_knight_stuck")?,
        bonus_has_castled: get("bonus_has_castled")?,
        bonus_hasnt_castled: get("bonus_hasnt_castled")?,
        bonus_passed_pawn: get("bonus_passed_pawn")?,
        bonus_isolated_pawn: get("bonus_isolated_pawn")?,
        bonus_backward_pawn: get("bonus_backward_pawn")?,
        bonus_doubled_pawn: get("bonus_doubled_pawn")?,
        bonus_tripled_pawn: get("bonus_tripled_pawn")?,
        bonus_doubled_bishop: get("bonus_doubled_bishop")?,
        bonus_fianchetto_bishop: get("bonus_fianchetto_bishop")?,
        bonus_knight_on_edge: get("bonus_knight_on_edge")?,
        bonus_knight_on_hole: get("bonus_knight_on_hole")?,
        bonus_rook_open_file: get("bonus_rook_open_file")?,
        bonus_rook_halfopen_file: get("bonus_rook_halfopen_file")?,
        bonus_queen_open_file: get("bonus_queen_open_file")?,
        bonus_queen_halfopen_file: get("bonus_queen_halfopen_file")?,
        bonus_center_control: get("bonus_center_control")?,
    };

    Ok(LevelRecord {
        name: raw.name.to_string(),
        max_depth: get("max_depth")? as u32,
        max_seconds: get("max_seconds")? as u32,
        strength: get("strength").unwrap_or(40).clamp(0, 100) as u8,
        weights,
    })
}
