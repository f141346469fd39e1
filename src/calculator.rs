//! Dice scaling: from an attribute or ability rating to a dice pool.
//!
//! Every full 10 points of rating buys exactly one upgrade step. The die
//! progression keeps the expected value growing smoothly: the largest
//! non-d12 die is upgraded first, and once everything is a d12 one of
//! them splits into two d6s, so the pool never shrinks in expectation
//! and never grows unboundedly in count.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dice::{DiceError, Pool, PoolTerm};
use crate::hone::HoneLevel;

/// Die sizes in order of improvement.
pub const DIE_PROGRESSION: [u32; 6] = [2, 4, 6, 8, 10, 12];

/// Fallback die glyph for callers without a localization context.
pub const DEFAULT_DIE_GLYPH: &str = "d";

/// Structured output of [`compute_dice_pool`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolBreakdown {
    /// Die count per side count.
    pub dice: BTreeMap<u32, u32>,
    /// Flat bonus derived from the rating.
    pub bonus: i32,
    /// The full rollable pool, largest dice first, bonus last, then any
    /// hone-level additions.
    pub pool: Pool,
    /// Human-readable notation, e.g. "1d8+3" or "1W8+3+W4+2".
    pub notation: String,
}

fn next_size(sides: u32) -> u32 {
    match sides {
        2 => 4,
        4 => 6,
        6 => 8,
        8 => 10,
        10 => 12,
        other => other,
    }
}

fn remove_one(dice: &mut BTreeMap<u32, u32>, sides: u32) {
    if let Some(count) = dice.get_mut(&sides) {
        *count -= 1;
        if *count == 0 {
            dice.remove(&sides);
        }
    }
}

/// Derive the die multiset for a rating.
///
/// Starts from a single d2 and applies one upgrade step per full 10
/// points: upgrade the largest non-d12 die, else split a d12 into two
/// d6s, else (degenerate, nothing upgradable at all) add another d2.
pub fn derive_dice_counts(rating: i32) -> Result<BTreeMap<u32, u32>, DiceError> {
    if rating < 0 {
        return Err(DiceError::NegativeRating(rating));
    }

    let mut dice = BTreeMap::new();
    dice.insert(2, 1);

    let mut remaining = rating;
    while remaining >= 10 {
        let upgradable = DIE_PROGRESSION[..DIE_PROGRESSION.len() - 1]
            .iter()
            .rev()
            .find(|&&sides| dice.contains_key(&sides))
            .copied();

        if let Some(sides) = upgradable {
            remove_one(&mut dice, sides);
            *dice.entry(next_size(sides)).or_insert(0) += 1;
        } else if dice.contains_key(&12) {
            remove_one(&mut dice, 12);
            *dice.entry(6).or_insert(0) += 2;
        } else {
            *dice.entry(2).or_insert(0) += 1;
        }

        remaining -= 10;
    }

    Ok(dice)
}

/// Flat bonus for a rating: zero below 15, then +1 every 10 points
/// (15 => +1, 25 => +2, ...).
pub fn derive_bonus(rating: i32) -> Result<i32, DiceError> {
    if rating < 0 {
        return Err(DiceError::NegativeRating(rating));
    }
    Ok((rating - 5).div_euclid(10).max(0))
}

/// Build the rollable pool for a rating and hone level, largest dice
/// first, bonus last, hone additions after that.
pub fn build_pool(rating: i32, hone: HoneLevel) -> Result<Pool, DiceError> {
    let dice = derive_dice_counts(rating)?;
    let bonus = derive_bonus(rating)?;

    let mut pool = Vec::with_capacity(dice.len() + 3);
    for (&sides, &count) in dice.iter().rev() {
        pool.push(PoolTerm::Dice { sides, count });
    }
    if bonus > 0 {
        pool.push(PoolTerm::Bonus { bonus });
    }
    pool.extend_from_slice(hone.pool_additions());

    Ok(pool)
}

/// Compute dice, bonus, pool, and notation for a rating.
///
/// `glyph` is the localized die abbreviation the notation uses between
/// count and side count (e.g. "d", or "W" on a German sheet).
pub fn compute_dice_pool(
    rating: i32,
    hone: HoneLevel,
    glyph: &str,
) -> Result<PoolBreakdown, DiceError> {
    let dice = derive_dice_counts(rating)?;
    let bonus = derive_bonus(rating)?;

    let mut pool = Vec::with_capacity(dice.len() + 3);
    let mut notation_parts = Vec::with_capacity(dice.len() + 2);
    for (&sides, &count) in dice.iter().rev() {
        pool.push(PoolTerm::Dice { sides, count });
        notation_parts.push(format!("{count}{glyph}{sides}"));
    }
    if bonus > 0 {
        pool.push(PoolTerm::Bonus { bonus });
        notation_parts.push(bonus.to_string());
    }
    pool.extend_from_slice(hone.pool_additions());
    let hone_notation = hone.notation(glyph);
    if !hone_notation.is_empty() {
        notation_parts.push(hone_notation);
    }

    Ok(PoolBreakdown {
        dice,
        bonus,
        pool,
        notation: notation_parts.join("+"),
    })
}
