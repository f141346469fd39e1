//! Roll orchestration: attribute checks, ability checks, and action
//! resolution, assembled into presentation-ready cards.
//!
//! Each entry point is a single stateless transaction. Errors from the
//! calculator or the evaluator propagate unchanged; they signal bad hero
//! data, not conditions this layer could recover from.

use rand::Rng;
use serde::Serialize;

use crate::calculator::build_pool;
use crate::dice::{
    evaluate_check_with_rng, evaluate_pool_with_rng, roll_die_with_rng, DiceError, PartResult,
    PoolTerm,
};
use crate::hero::{Ability, Action, Attribute};
use crate::hone::HoneLevel;
use crate::selection::{AttackRoll, RollSelection};

/// Border styling the notification layer applies to a roll card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    /// Single color, keyed by one attribute.
    Solid { color: &'static str },
    /// Two-color split for abilities: primary on top/left, secondary on
    /// bottom/right.
    Split {
        primary: &'static str,
        secondary: &'static str,
    },
}

/// One displayed line of a roll section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CardPart {
    /// An evaluated pool term.
    Rolled(PartResult),
    /// The paired d20s of a follow-up attack. `selected` indexes the
    /// roll that counted, for display highlighting.
    FollowUpDie { rolls: [i32; 2], selected: usize },
}

impl CardPart {
    /// The value this part contributes to its section sum.
    pub fn sum(&self) -> i32 {
        match self {
            CardPart::Rolled(part) => part.sum,
            CardPart::FollowUpDie { rolls, selected } => rolls[*selected],
        }
    }
}

/// A titled group of parts with its own total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollSection {
    pub title: Option<String>,
    pub parts: Vec<CardPart>,
    pub sum: i32,
}

/// Presentation payload for one resolved roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollCard {
    pub header: String,
    pub sections: Vec<RollSection>,
    pub border: BorderStyle,
}

fn rolled_parts(parts: Vec<PartResult>) -> Vec<CardPart> {
    parts.into_iter().map(CardPart::Rolled).collect()
}

/// Resolve a raw attribute check: the attribute's pool plus a d20.
pub fn resolve_attribute_check(
    attribute: Attribute,
    rating: i32,
    selection: &RollSelection,
) -> Result<RollCard, DiceError> {
    resolve_attribute_check_with_rng(&mut rand::thread_rng(), attribute, rating, selection)
}

/// Resolve an attribute check with a specific RNG (useful for testing).
pub fn resolve_attribute_check_with_rng<R: Rng>(
    rng: &mut R,
    attribute: Attribute,
    rating: i32,
    selection: &RollSelection,
) -> Result<RollCard, DiceError> {
    let pool = build_pool(rating, HoneLevel::None)?;
    let outcome = evaluate_check_with_rng(rng, &pool, selection)?;

    Ok(RollCard {
        header: attribute.name().to_string(),
        sections: vec![RollSection {
            title: None,
            sum: outcome.sum,
            parts: rolled_parts(outcome.parts),
        }],
        border: BorderStyle::Solid {
            color: attribute.color(),
        },
    })
}

/// Resolve an ability check. The pool already encodes the ability's hone
/// level; the header is annotated with the hone name when honed.
pub fn resolve_ability_check(
    ability: &Ability,
    rating: i32,
    selection: &RollSelection,
) -> Result<RollCard, DiceError> {
    resolve_ability_check_with_rng(&mut rand::thread_rng(), ability, rating, selection)
}

/// Resolve an ability check with a specific RNG (useful for testing).
pub fn resolve_ability_check_with_rng<R: Rng>(
    rng: &mut R,
    ability: &Ability,
    rating: i32,
    selection: &RollSelection,
) -> Result<RollCard, DiceError> {
    let pool = build_pool(rating, ability.hone)?;
    let outcome = evaluate_check_with_rng(rng, &pool, selection)?;

    let header = if ability.hone == HoneLevel::None {
        ability.name.clone()
    } else {
        format!("{} ({})", ability.name, ability.hone.name())
    };

    let [primary, secondary] = ability.attributes;
    Ok(RollCard {
        header,
        sections: vec![RollSection {
            title: None,
            sum: outcome.sum,
            parts: rolled_parts(outcome.parts),
        }],
        border: BorderStyle::Split {
            primary: primary.color(),
            secondary: secondary.color(),
        },
    })
}

/// Resolve an action: a to-hit roll and a damage roll.
///
/// The to-hit side rolls one d20 (or two, keeping the lower, for a
/// follow-up attack) plus the acting attribute's pool. The attribute
/// pool is evaluated exactly once; its sum feeds the to-hit total and,
/// for weapon-style actions, the damage total as well.
pub fn resolve_action(
    action: &Action,
    attribute_rating: i32,
    selection: &RollSelection,
) -> Result<RollCard, DiceError> {
    resolve_action_with_rng(&mut rand::thread_rng(), action, attribute_rating, selection)
}

/// Resolve an action with a specific RNG (useful for testing).
pub fn resolve_action_with_rng<R: Rng>(
    rng: &mut R,
    action: &Action,
    attribute_rating: i32,
    selection: &RollSelection,
) -> Result<RollCard, DiceError> {
    // Hone levels apply to abilities, not raw attribute-driven actions.
    let mut check_pool = build_pool(attribute_rating, HoneLevel::None)?;

    let (to_hit_die, d20_value) = match selection.attack {
        AttackRoll::FollowUp => {
            let rolls = [roll_die_with_rng(rng, 20)?, roll_die_with_rng(rng, 20)?];
            // Keep the lower die; ties resolve to the first.
            let selected = if rolls[0] <= rolls[1] { 0 } else { 1 };
            (CardPart::FollowUpDie { rolls, selected }, rolls[selected])
        }
        AttackRoll::Standard => {
            let value = roll_die_with_rng(rng, 20)?;
            let part = PartResult {
                term: PoolTerm::Dice {
                    sides: 20,
                    count: 1,
                },
                rolls: vec![value],
                sum: value,
            };
            (CardPart::Rolled(part), value)
        }
    };

    if let Some(modifier) = selection.modifier_term() {
        check_pool.push(modifier);
    }
    let attribute_check = evaluate_pool_with_rng(rng, &check_pool)?;

    let to_hit_sum = d20_value + attribute_check.sum;

    let damage_roll = evaluate_pool_with_rng(rng, &action.damage)?;
    let damage_sum = if action.include_attribute_dice_to_damage {
        attribute_check.sum + damage_roll.sum
    } else {
        damage_roll.sum
    };

    let mut to_hit_parts = Vec::with_capacity(attribute_check.parts.len() + 1);
    to_hit_parts.push(to_hit_die);
    to_hit_parts.extend(attribute_check.parts.iter().cloned().map(CardPart::Rolled));

    let mut damage_parts = Vec::new();
    if action.include_attribute_dice_to_damage {
        damage_parts.extend(attribute_check.parts.into_iter().map(CardPart::Rolled));
    }
    damage_parts.extend(damage_roll.parts.into_iter().map(CardPart::Rolled));

    Ok(RollCard {
        header: action.name.clone(),
        sections: vec![
            RollSection {
                title: Some("Attack roll".to_string()),
                parts: to_hit_parts,
                sum: to_hit_sum,
            },
            RollSection {
                title: Some("Damage roll".to_string()),
                parts: damage_parts,
                sum: damage_sum,
            },
        ],
        border: BorderStyle::Solid {
            color: action.attribute.color(),
        },
    })
}
