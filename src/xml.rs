//! Hand-rolled attribute/tag scanner for `levels.xml` and the opening book
//! file. Deliberately not a general XML parser: both external files have a
//! single, fixed, flat-attribute shape, so a full parser would buy nothing a
//! linear scan over `<tag k="v" .../>` doesn't already give us.
//!
//! The book file's `<move .../>` tags carry a `coord` attribute rather than
//! the donor's `san` attribute: translating SAN to a concrete move needs the
//! board position to resolve ambiguity (see the donor's `san_to_move`), and
//! this reader has no board context. The engine's coordinate-move parser
//! already exists for CECP traffic, so the book format reuses it instead of
//! growing a second, context-aware grammar.

use crate::error::ConfigError;
use crate::levels::{record_from_attrs, LevelRecord, RawLevelAttrs};
use crate::types::Move;

/// Slices out the attribute text of every `<tag ...>` (self-closing or not)
/// at the top level of `text`, in document order.
fn tag_bodies<'a>(text: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}");
    let mut bodies = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(&open) {
        let after_name = &rest[start + open.len()..];
        // Guard against matching a longer tag name sharing this prefix.
        if !after_name.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/') {
            rest = after_name;
            continue;
        }
        let Some(end) = after_name.find('>') else {
            break;
        };
        let body = after_name[..end].trim_end_matches('/');
        bodies.push(body);
        rest = &after_name[end + 1..];
    }
    bodies
}

/// Parses `key="value"` pairs out of a tag's attribute text.
fn parse_attrs(body: &str) -> Vec<(&str, &str)> {
    let mut attrs = Vec::new();
    let mut rest = body;
    while let Some(eq) = rest.find('=') {
        let key = rest[..eq].trim();
        let after_eq = &rest[eq + 1..];
        let Some(quote_start) = after_eq.find('"') else {
            break;
        };
        let after_quote = &after_eq[quote_start + 1..];
        let Some(quote_end) = after_quote.find('"') else {
            break;
        };
        if !key.is_empty() {
            attrs.push((key, &after_quote[..quote_end]));
        }
        rest = &after_quote[quote_end + 1..];
    }
    attrs
}

/// Parses a `<chessdbot><level name="…"><search .../><heuristic .../></level>…</chessdbot>`
/// document into one `LevelRecord` per `<level>`, folding its `<search>` and
/// `<heuristic>` child attributes (plus its own `name`/`strength`) into a
/// single flat attribute set.
pub fn parse_levels(text: &str) -> Result<Vec<LevelRecord>, ConfigError> {
    let mut records = Vec::new();
    for level_body in tag_bodies(text, "level") {
        let level_attrs = parse_attrs(level_body);
        let name = level_attrs
            .iter()
            .find(|(k, _)| *k == "name")
            .map(|(_, v)| *v)
            .ok_or_else(|| ConfigError::Xml("<level> missing 'name'".to_string()))?;

        let level_start = text
            .find(level_body)
            .ok_or_else(|| ConfigError::Xml("internal scan error".to_string()))?;
        let level_end = text[level_start..]
            .find("</level>")
            .map(|i| level_start + i)
            .unwrap_or(text.len());
        let level_slice = &text[level_start..level_end];

        let mut attrs = level_attrs;
        for child_tag in ["search", "heuristic"] {
            for body in tag_bodies(level_slice, child_tag) {
                attrs.extend(parse_attrs(body));
            }
        }

        records.push(record_from_attrs(&RawLevelAttrs { name, attrs })?);
    }
    Ok(records)
}

/// Parses `<…><opening><move coord="…"/>…</opening>…</…>` into one move
/// sequence per `<opening>`. A malformed or unparseable coordinate token is a
/// `ConfigError`, matching `levels.xml`'s fatal-on-malformed contract.
pub fn parse_openings(text: &str) -> Result<Vec<Vec<Move>>, ConfigError> {
    let mut openings = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("<opening") {
        let body_start = &rest[start..];
        let end = body_start
            .find("</opening>")
            .ok_or_else(|| ConfigError::Xml("unterminated <opening>".to_string()))?;
        let opening_slice = &body_start[..end];

        let mut moves = Vec::new();
        for body in tag_bodies(opening_slice, "move") {
            let attrs = parse_attrs(body);
            let coord = attrs
                .iter()
                .find(|(k, _)| *k == "coord")
                .map(|(_, v)| *v)
                .ok_or_else(|| ConfigError::Xml("<move> missing 'coord'".to_string()))?;
            let mv = Move::from_coord(coord)
                .ok_or_else(|| ConfigError::Xml(format!("unparseable move '{coord}'")))?;
            moves.push(mv);
        }
        openings.push(moves);
        rest = &body_start[end + "</opening>".len()..];
    }
    Ok(openings)
}
