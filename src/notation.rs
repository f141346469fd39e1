//! Damage-notation parsing.
//!
//! Action damage is entered on the sheet as text like "1W6+2" or
//! "2d8-1". The die glyph between count and side count is the localized
//! abbreviation and is matched case-insensitively. Dice segments carry
//! no sign; bare integers become signed bonus terms.

use crate::dice::{Pool, PoolTerm};

/// Largest die size a damage notation may name.
pub const MAX_NOTATION_SIDES: u32 = 1000;

/// Largest dice count a damage notation may name.
pub const MAX_NOTATION_COUNT: u32 = 1000;

/// Split a notation string into signed segments: "1W6+2-1" becomes
/// ["1W6", "+2", "-1"].
fn segments(notation: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    for (index, ch) in notation.char_indices() {
        if (ch == '+' || ch == '-') && index > start {
            result.push(&notation[start..index]);
            start = index;
        }
    }
    if start < notation.len() {
        result.push(&notation[start..]);
    }
    result
}

fn parse_segment(segment: &str, glyph: &str) -> Option<PoolTerm> {
    let (sign, body) = match segment.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, segment.strip_prefix('+').unwrap_or(segment)),
    };
    if body.is_empty() {
        return None;
    }

    let lowered = body.to_lowercase();
    let glyph_lowered = glyph.to_lowercase();

    if let Some(position) = lowered.find(&glyph_lowered) {
        let count_str = &lowered[..position];
        let sides_str = &lowered[position + glyph_lowered.len()..];
        let count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str.parse().ok()?
        };
        let sides: u32 = sides_str.parse().ok()?;
        if count == 0 || sides == 0 {
            return None;
        }
        // User input; keep it inside what the evaluator can roll.
        if count > MAX_NOTATION_COUNT || sides > MAX_NOTATION_SIDES {
            return None;
        }
        Some(PoolTerm::Dice { sides, count })
    } else {
        let value: i32 = body.parse().ok()?;
        Some(PoolTerm::Bonus { bonus: sign * value })
    }
}

/// Whether a string is a well-formed damage notation: at least one
/// segment, and every segment either dice or a flat integer.
pub fn is_damage_notation_valid(notation: &str, glyph: &str) -> bool {
    let trimmed = notation.trim();
    if trimmed.is_empty() {
        return false;
    }
    let parts = segments(trimmed);
    !parts.is_empty() && parts.iter().all(|part| parse_segment(part, glyph).is_some())
}

/// Parse a damage notation into a pool. Unparseable segments are
/// dropped; a fully invalid string parses to an empty pool.
pub fn parse_damage_notation(notation: &str, glyph: &str) -> Pool {
    segments(notation.trim())
        .into_iter()
        .filter_map(|segment| parse_segment(segment, glyph))
        .collect()
}
