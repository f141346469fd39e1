//! Dice pool terms and the pool evaluator.
//!
//! A [`Pool`] is an ordered list of dice groups, flat bonuses, and
//! roll-time modifiers. Evaluation rolls every dice term, keeps the
//! individual die results for display, and sums all parts in order.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::selection::RollSelection;

/// Error type for dice derivation and rolling.
#[derive(Debug, Error)]
pub enum DiceError {
    #[error("Die size must be at least 1, got {0}")]
    InvalidDieSize(u32),
    #[error("Attribute rating cannot be negative, got {0}")]
    NegativeRating(i32),
    #[error("Unknown hone level id: {0}")]
    UnknownHoneLevel(u8),
    #[error("Cannot evaluate an empty pool")]
    EmptyPool,
}

/// Direction of a roll-time modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModifierKind {
    Advantage,
    Disadvantage,
}

impl ModifierKind {
    pub fn name(&self) -> &'static str {
        match self {
            ModifierKind::Advantage => "Advantage",
            ModifierKind::Disadvantage => "Disadvantage",
        }
    }
}

/// One term of a rollable pool.
///
/// Dice terms are rolled, bonus terms add a flat amount derived from the
/// rating, and modifier terms carry the signed nudge the user picked at
/// roll time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PoolTerm {
    Dice { sides: u32, count: u32 },
    Bonus { bonus: i32 },
    Modifier { kind: ModifierKind, value: i32 },
}

impl PoolTerm {
    /// Notation segment for this term, using the localized die glyph
    /// (e.g. "d" or "W").
    pub fn notation(&self, glyph: &str) -> String {
        match self {
            PoolTerm::Dice { sides, count } => format!("{count}{glyph}{sides}"),
            PoolTerm::Bonus { bonus } => bonus.to_string(),
            PoolTerm::Modifier { value, .. } => {
                if *value >= 0 {
                    format!("+{value}")
                } else {
                    value.to_string()
                }
            }
        }
    }
}

impl fmt::Display for PoolTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation("d"))
    }
}

/// Ordered sequence of pool terms representing one rollable expression.
pub type Pool = Vec<PoolTerm>;

/// Result of evaluating a single pool term.
///
/// `rolls` holds the individual die values for dice terms and is empty
/// for bonus and modifier terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartResult {
    pub term: PoolTerm,
    pub rolls: Vec<i32>,
    pub sum: i32,
}

/// Itemized result of evaluating a whole pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    pub parts: Vec<PartResult>,
    pub sum: i32,
}

/// Roll a single die, uniform in `[1, sides]`.
pub fn roll_die(sides: u32) -> Result<i32, DiceError> {
    roll_die_with_rng(&mut rand::thread_rng(), sides)
}

/// Roll a single die with a specific RNG (useful for testing).
///
/// Sides above `i32::MAX` are rejected rather than wrapped: part sums
/// are `i32` and a wrapped range would be empty.
pub fn roll_die_with_rng<R: Rng>(rng: &mut R, sides: u32) -> Result<i32, DiceError> {
    if sides == 0 || sides > i32::MAX as u32 {
        return Err(DiceError::InvalidDieSize(sides));
    }
    Ok(rng.gen_range(1..=sides as i32))
}

/// Evaluate a pool into itemized part results and a grand total.
///
/// An empty pool is an error, not a zero-sum success: "nothing to roll"
/// must stay distinguishable from "rolled and got 0".
pub fn evaluate_pool(pool: &[PoolTerm]) -> Result<RollOutcome, DiceError> {
    evaluate_pool_with_rng(&mut rand::thread_rng(), pool)
}

/// Evaluate a pool with a specific RNG (useful for testing).
pub fn evaluate_pool_with_rng<R: Rng>(
    rng: &mut R,
    pool: &[PoolTerm],
) -> Result<RollOutcome, DiceError> {
    if pool.is_empty() {
        return Err(DiceError::EmptyPool);
    }

    let mut parts = Vec::with_capacity(pool.len());
    let mut sum = 0i32;

    for term in pool {
        let part = match term {
            PoolTerm::Dice { sides, count } => {
                let mut rolls = Vec::with_capacity(*count as usize);
                for _ in 0..*count {
                    rolls.push(roll_die_with_rng(rng, *sides)?);
                }
                let part_sum = rolls.iter().sum();
                PartResult {
                    term: *term,
                    rolls,
                    sum: part_sum,
                }
            }
            PoolTerm::Bonus { bonus } => PartResult {
                term: *term,
                rolls: Vec::new(),
                sum: *bonus,
            },
            PoolTerm::Modifier { value, .. } => PartResult {
                term: *term,
                rolls: Vec::new(),
                sum: *value,
            },
        };

        sum += part.sum;
        parts.push(part);
    }

    Ok(RollOutcome { parts, sum })
}

/// Evaluate a check: the given pool with a single d20 prepended.
///
/// A modifier term is appended only when the selection's roll type is not
/// normal and its magnitude is non-zero.
pub fn evaluate_check(
    pool: &[PoolTerm],
    selection: &RollSelection,
) -> Result<RollOutcome, DiceError> {
    evaluate_check_with_rng(&mut rand::thread_rng(), pool, selection)
}

/// Evaluate a check with a specific RNG (useful for testing).
pub fn evaluate_check_with_rng<R: Rng>(
    rng: &mut R,
    pool: &[PoolTerm],
    selection: &RollSelection,
) -> Result<RollOutcome, DiceError> {
    let mut check_pool = Vec::with_capacity(pool.len() + 2);
    check_pool.push(PoolTerm::Dice { sides: 20, count: 1 });
    check_pool.extend_from_slice(pool);
    if let Some(modifier) = selection.modifier_term() {
        check_pool.push(modifier);
    }
    evaluate_pool_with_rng(rng, &check_pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{RollSelection, RollType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_die_range() {
        for _ in 0..200 {
            let value = roll_die(6).unwrap();
            assert!((1..=6).contains(&value));
        }
    }

    #[test]
    fn test_roll_die_zero_sides() {
        assert!(matches!(roll_die(0), Err(DiceError::InvalidDieSize(0))));
    }

    #[test]
    fn test_roll_die_oversized_sides() {
        // Sides above i32::MAX used to wrap into an empty range and
        // panic inside the RNG; they must error instead.
        let oversized = 4_000_000_000u32;
        assert!(matches!(
            roll_die(oversized),
            Err(DiceError::InvalidDieSize(sides)) if sides == oversized
        ));

        let pool = vec![PoolTerm::Dice {
            sides: oversized,
            count: 1,
        }];
        assert!(matches!(
            evaluate_pool(&pool),
            Err(DiceError::InvalidDieSize(_))
        ));
    }

    #[test]
    fn test_modifier_kind_names() {
        assert_eq!(ModifierKind::Advantage.name(), "Advantage");
        assert_eq!(ModifierKind::Disadvantage.name(), "Disadvantage");
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let result = evaluate_pool(&[]);
        assert!(matches!(result, Err(DiceError::EmptyPool)));
    }

    #[test]
    fn test_pool_sum_is_sum_of_parts() {
        let pool = vec![
            PoolTerm::Dice { sides: 8, count: 2 },
            PoolTerm::Dice { sides: 4, count: 1 },
            PoolTerm::Bonus { bonus: 3 },
            PoolTerm::Modifier {
                kind: ModifierKind::Disadvantage,
                value: -5,
            },
        ];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let outcome = evaluate_pool_with_rng(&mut rng, &pool).unwrap();
            let part_total: i32 = outcome.parts.iter().map(|p| p.sum).sum();
            assert_eq!(outcome.sum, part_total);
            assert_eq!(outcome.parts.len(), pool.len());
        }
    }

    #[test]
    fn test_dice_part_keeps_individual_rolls() {
        let pool = vec![PoolTerm::Dice { sides: 6, count: 3 }];
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = evaluate_pool_with_rng(&mut rng, &pool).unwrap();
        let part = &outcome.parts[0];
        assert_eq!(part.rolls.len(), 3);
        assert!(part.rolls.iter().all(|r| (1..=6).contains(r)));
        assert_eq!(part.sum, part.rolls.iter().sum::<i32>());
    }

    #[test]
    fn test_bonus_and_modifier_parts_have_no_rolls() {
        let pool = vec![
            PoolTerm::Bonus { bonus: 4 },
            PoolTerm::Modifier {
                kind: ModifierKind::Advantage,
                value: 8,
            },
        ];
        let outcome = evaluate_pool(&pool).unwrap();
        assert!(outcome.parts[0].rolls.is_empty());
        assert_eq!(outcome.parts[0].sum, 4);
        assert!(outcome.parts[1].rolls.is_empty());
        assert_eq!(outcome.parts[1].sum, 8);
        assert_eq!(outcome.sum, 12);
    }

    #[test]
    fn test_check_prepends_a_d20() {
        let pool = vec![PoolTerm::Dice { sides: 6, count: 1 }];
        let outcome = evaluate_check(&pool, &RollSelection::default()).unwrap();
        assert_eq!(outcome.parts.len(), 2);
        assert_eq!(
            outcome.parts[0].term,
            PoolTerm::Dice {
                sides: 20,
                count: 1
            }
        );
    }

    #[test]
    fn test_normal_check_never_appends_a_modifier() {
        let pool = vec![PoolTerm::Dice { sides: 6, count: 1 }];
        // A stale magnitude must be ignored while the roll type is normal.
        let selection = RollSelection {
            roll_type: RollType::Normal,
            magnitude: 8,
            ..RollSelection::default()
        };
        let outcome = evaluate_check(&pool, &selection).unwrap();
        assert_eq!(outcome.parts.len(), 2);
        assert!(outcome
            .parts
            .iter()
            .all(|p| !matches!(p.term, PoolTerm::Modifier { .. })));
    }

    #[test]
    fn test_advantage_check_appends_exactly_one_modifier() {
        let pool = vec![PoolTerm::Dice { sides: 6, count: 1 }];
        let selection = RollSelection {
            roll_type: RollType::Advantage,
            magnitude: 5,
            ..RollSelection::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        let outcome = evaluate_check_with_rng(&mut rng, &pool, &selection).unwrap();

        let modifiers: Vec<_> = outcome
            .parts
            .iter()
            .filter(|p| matches!(p.term, PoolTerm::Modifier { .. }))
            .collect();
        assert_eq!(modifiers.len(), 1);
        assert_eq!(
            modifiers[0].term,
            PoolTerm::Modifier {
                kind: ModifierKind::Advantage,
                value: 5
            }
        );

        // Total is d20 + pool roll + 5, exactly.
        let rolled: i32 = outcome
            .parts
            .iter()
            .filter(|p| !matches!(p.term, PoolTerm::Modifier { .. }))
            .map(|p| p.sum)
            .sum();
        assert_eq!(outcome.sum, rolled + 5);
    }

    #[test]
    fn test_zero_magnitude_never_appends_a_modifier() {
        let pool = vec![PoolTerm::Dice { sides: 6, count: 1 }];
        let selection = RollSelection {
            roll_type: RollType::Disadvantage,
            magnitude: 0,
            ..RollSelection::default()
        };
        let outcome = evaluate_check(&pool, &selection).unwrap();
        assert_eq!(outcome.parts.len(), 2);
    }

    #[test]
    fn test_d6_uniformity_chi_square() {
        // Loose chi-square check over 10k draws; critical value for
        // df=5 at p=0.001 is 20.5, so 30 leaves generous headroom.
        let mut rng = StdRng::seed_from_u64(1234);
        let mut buckets = [0u32; 6];
        let trials = 10_000;
        for _ in 0..trials {
            let value = roll_die_with_rng(&mut rng, 6).unwrap();
            buckets[(value - 1) as usize] += 1;
        }
        let expected = trials as f64 / 6.0;
        let chi_square: f64 = buckets
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(
            chi_square < 30.0,
            "chi-square {chi_square} exceeds loose tolerance"
        );
    }

    #[test]
    fn test_term_serialization_shape() {
        let term = PoolTerm::Dice { sides: 6, count: 2 };
        let json = serde_json::to_value(&term).unwrap();
        assert_eq!(json["type"], "dice");
        assert_eq!(json["sides"], 6);
        assert_eq!(json["count"], 2);

        let back: PoolTerm = serde_json::from_value(json).unwrap();
        assert_eq!(back, term);
    }

    #[test]
    fn test_term_notation() {
        assert_eq!(PoolTerm::Dice { sides: 8, count: 2 }.notation("W"), "2W8");
        assert_eq!(PoolTerm::Bonus { bonus: 3 }.notation("W"), "3");
        assert_eq!(
            PoolTerm::Modifier {
                kind: ModifierKind::Disadvantage,
                value: -5
            }
            .notation("W"),
            "-5"
        );
    }
}
