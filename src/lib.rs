//! Gothic Tales character-sheet engine.
//!
//! This crate provides:
//! - Dice scaling from attribute/ability ratings to dice pools
//! - Randomized pool evaluation with itemized results
//! - Check and action resolution with roll-time modifiers
//! - The hero data model the sheet UI reads
//!
//! # Quick Start
//!
//! ```
//! use tales_core::{resolve_attribute_check, Attribute, RollSelection};
//!
//! let hero_strength = 25;
//! let card = resolve_attribute_check(
//!     Attribute::Strength,
//!     hero_strength,
//!     &RollSelection::default(),
//! )
//! .expect("well-formed rating");
//! println!("{}: {}", card.header, card.sections[0].sum);
//! ```
//!
//! Everything is synchronous and stateless; the only non-determinism is
//! the die roll itself, and every rolling entry point has a `_with_rng`
//! variant taking any [`rand::Rng`] for deterministic tests.

pub mod calculator;
pub mod dice;
pub mod hero;
pub mod hone;
pub mod notation;
pub mod roll_service;
pub mod selection;

// Primary public API
pub use calculator::{
    build_pool, compute_dice_pool, derive_bonus, derive_dice_counts, PoolBreakdown,
    DEFAULT_DIE_GLYPH, DIE_PROGRESSION,
};
pub use dice::{
    evaluate_check, evaluate_pool, roll_die, DiceError, ModifierKind, PartResult, Pool, PoolTerm,
    RollOutcome,
};
pub use hero::{
    default_abilities, Ability, AbilityCategory, Action, Attribute, AttributeScores, Character,
    Hero, HeroId,
};
pub use hone::HoneLevel;
pub use notation::{is_damage_notation_valid, parse_damage_notation};
pub use roll_service::{
    resolve_ability_check, resolve_action, resolve_attribute_check, BorderStyle, CardPart,
    RollCard, RollSection,
};
pub use selection::{AttackRoll, RollSelection, RollType, MODIFIER_STEPS};
