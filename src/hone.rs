//! Ability hone levels.
//!
//! A hone level is a fixed proficiency tier on an ability. Each tier adds
//! a static set of pool terms and a notation suffix, independent of the
//! ability's rating.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceError, PoolTerm};

const LEVEL_1_ADDITIONS: [PoolTerm; 1] = [PoolTerm::Bonus { bonus: 2 }];
const LEVEL_2_ADDITIONS: [PoolTerm; 2] = [
    PoolTerm::Dice { sides: 4, count: 1 },
    PoolTerm::Bonus { bonus: 2 },
];
const LEVEL_3_ADDITIONS: [PoolTerm; 2] = [
    PoolTerm::Dice { sides: 6, count: 2 },
    PoolTerm::Bonus { bonus: 3 },
];

/// Ability proficiency tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "camelCase")]
pub enum HoneLevel {
    #[default]
    None,
    Level1,
    Level2,
    Level3,
}

impl HoneLevel {
    /// Numeric id as stored in hero records (0-3).
    pub fn id(&self) -> u8 {
        match self {
            HoneLevel::None => 0,
            HoneLevel::Level1 => 1,
            HoneLevel::Level2 => 2,
            HoneLevel::Level3 => 3,
        }
    }

    pub fn from_id(id: u8) -> Result<Self, DiceError> {
        match id {
            0 => Ok(HoneLevel::None),
            1 => Ok(HoneLevel::Level1),
            2 => Ok(HoneLevel::Level2),
            3 => Ok(HoneLevel::Level3),
            other => Err(DiceError::UnknownHoneLevel(other)),
        }
    }

    pub fn all() -> [HoneLevel; 4] {
        [
            HoneLevel::None,
            HoneLevel::Level1,
            HoneLevel::Level2,
            HoneLevel::Level3,
        ]
    }

    /// Pool terms this tier appends to an ability's dice pool.
    pub fn pool_additions(&self) -> &'static [PoolTerm] {
        match self {
            HoneLevel::None => &[],
            HoneLevel::Level1 => &LEVEL_1_ADDITIONS,
            HoneLevel::Level2 => &LEVEL_2_ADDITIONS,
            HoneLevel::Level3 => &LEVEL_3_ADDITIONS,
        }
    }

    /// Notation suffix for this tier, with the localized die glyph
    /// substituted in. Single dice are written without a count, matching
    /// the sheet's display convention.
    pub fn notation(&self, glyph: &str) -> String {
        match self {
            HoneLevel::None => String::new(),
            HoneLevel::Level1 => "2".to_string(),
            HoneLevel::Level2 => format!("{glyph}4+2"),
            HoneLevel::Level3 => format!("2{glyph}6+3"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HoneLevel::None => "Unhoned",
            HoneLevel::Level1 => "Hone Level 1",
            HoneLevel::Level2 => "Hone Level 2",
            HoneLevel::Level3 => "Hone Level 3",
        }
    }

    /// Lookup key for the localization collaborator.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            HoneLevel::None => "honeLevel.level0",
            HoneLevel::Level1 => "honeLevel.level1",
            HoneLevel::Level2 => "honeLevel.level2",
            HoneLevel::Level3 => "honeLevel.level3",
        }
    }
}
