//! Roll-time modifier selection.
//!
//! The sheet UI opens a context menu per roll; the state it accumulates
//! there is a [`RollSelection`], reset to its defaults whenever the menu
//! opens or closes. Advantage and disadvantage in this system are flat
//! numeric nudges picked from a fixed menu of magnitudes, not extra dice.

use serde::{Deserialize, Serialize};

use crate::dice::{ModifierKind, PoolTerm};

/// Magnitudes offered for advantage/disadvantage, before the sign.
pub const MODIFIER_STEPS: [i32; 3] = [2, 5, 8];

/// The user-selected roll type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RollType {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl RollType {
    pub fn name(&self) -> &'static str {
        match self {
            RollType::Normal => "Normal",
            RollType::Advantage => "Advantage",
            RollType::Disadvantage => "Disadvantage",
        }
    }

    /// Sign applied to the chosen magnitude: advantage adds, disadvantage
    /// subtracts. Zero for normal rolls, which carry no modifier.
    pub fn sign(&self) -> i32 {
        match self {
            RollType::Normal => 0,
            RollType::Advantage => 1,
            RollType::Disadvantage => -1,
        }
    }

    pub fn modifier_kind(&self) -> Option<ModifierKind> {
        match self {
            RollType::Normal => None,
            RollType::Advantage => Some(ModifierKind::Advantage),
            RollType::Disadvantage => Some(ModifierKind::Disadvantage),
        }
    }

    /// The signed magnitude menu the selection UI offers for this roll
    /// type. Empty for normal rolls.
    pub fn modifier_options(&self) -> Vec<i32> {
        match self.sign() {
            0 => Vec::new(),
            sign => MODIFIER_STEPS.iter().map(|step| step * sign).collect(),
        }
    }

    pub fn all() -> [RollType; 3] {
        [RollType::Normal, RollType::Advantage, RollType::Disadvantage]
    }
}

/// Attack sub-mode for action resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AttackRoll {
    /// One d20 to hit.
    #[default]
    Standard,
    /// Two d20s to hit, keeping the lower. Follow-up attacks are harder
    /// to land.
    FollowUp,
}

impl AttackRoll {
    pub fn name(&self) -> &'static str {
        match self {
            AttackRoll::Standard => "Standard",
            AttackRoll::FollowUp => "Follow-up attack",
        }
    }
}

/// In-progress modifier selection for a single roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RollSelection {
    pub roll_type: RollType,
    /// Signed nudge, one of 0 or +/-2, +/-5, +/-8.
    pub magnitude: i32,
    pub attack: AttackRoll,
}

impl RollSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to `{Normal, 0, Standard}`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The modifier term this selection contributes to a check pool, if
    /// any. A normal roll type or a zero magnitude contributes nothing,
    /// so a stale magnitude left over in the UI cannot leak into a
    /// normal roll.
    pub fn modifier_term(&self) -> Option<PoolTerm> {
        if self.magnitude == 0 {
            return None;
        }
        self.roll_type.modifier_kind().map(|kind| PoolTerm::Modifier {
            kind,
            value: self.magnitude,
        })
    }
}
