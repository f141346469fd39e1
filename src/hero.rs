//! Hero and character data model.
//!
//! The engine reads these records and never mutates them; the sheet UI
//! and its store own the lifecycle. A playable hero is a character plus
//! progression fields, embedded by value.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::calculator::build_pool;
use crate::dice::{DiceError, Pool};
use crate::hone::HoneLevel;

/// Unique identifier for heroes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeroId(pub Uuid);

impl HeroId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HeroId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six Gothic Tales attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Strength,
    Dexterity,
    Endurance,
    Concentration,
    Intuition,
    Experience,
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Dexterity => "Dexterity",
            Attribute::Endurance => "Endurance",
            Attribute::Concentration => "Concentration",
            Attribute::Intuition => "Intuition",
            Attribute::Experience => "Experience",
        }
    }

    /// Border color the notification layer renders for this attribute.
    pub fn color(&self) -> &'static str {
        match self {
            Attribute::Strength => "#c0392b",
            Attribute::Dexterity => "#27ae60",
            Attribute::Endurance => "#d35400",
            Attribute::Concentration => "#2980b9",
            Attribute::Intuition => "#8e44ad",
            Attribute::Experience => "#16a085",
        }
    }

    pub fn all() -> [Attribute; 6] {
        [
            Attribute::Strength,
            Attribute::Dexterity,
            Attribute::Endurance,
            Attribute::Concentration,
            Attribute::Intuition,
            Attribute::Experience,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Attribute ratings container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeScores {
    pub strength: i32,
    pub dexterity: i32,
    pub endurance: i32,
    pub concentration: i32,
    pub intuition: i32,
    pub experience: i32,
}

impl AttributeScores {
    pub fn new(str: i32, dex: i32, end: i32, con: i32, int: i32, exp: i32) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            endurance: end,
            concentration: con,
            intuition: int,
            experience: exp,
        }
    }

    /// Bare minimum ratings of a generic character.
    pub fn base() -> Self {
        Self::new(1, 1, 1, 1, 1, 1)
    }

    /// Ratings every fresh hero starts with.
    pub fn starting() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Endurance => self.endurance,
            Attribute::Concentration => self.concentration,
            Attribute::Intuition => self.intuition,
            Attribute::Experience => self.experience,
        }
    }

    pub fn set(&mut self, attribute: Attribute, rating: i32) {
        match attribute {
            Attribute::Strength => self.strength = rating,
            Attribute::Dexterity => self.dexterity = rating,
            Attribute::Endurance => self.endurance = rating,
            Attribute::Concentration => self.concentration = rating,
            Attribute::Intuition => self.intuition = rating,
            Attribute::Experience => self.experience = rating,
        }
    }
}

/// Grouping of abilities on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbilityCategory {
    Body,
    Social,
    Senses,
}

/// A learnable ability, governed by two attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub name: String,
    pub attributes: [Attribute; 2],
    pub hone: HoneLevel,
    pub category: AbilityCategory,
}

impl Ability {
    pub fn new(
        name: impl Into<String>,
        attributes: [Attribute; 2],
        category: AbilityCategory,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            hone: HoneLevel::None,
            category,
        }
    }
}

/// An attack or maneuver with its own fixed damage pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub name: String,
    /// The attribute whose dice pool drives the to-hit roll.
    pub attribute: Attribute,
    /// Damage terms, independent of any rating.
    pub damage: Pool,
    /// Weapon-style actions add the attribute roll to damage; ranged and
    /// spell-style actions do not.
    pub include_attribute_dice_to_damage: bool,
}

/// A character: the rollable core every entity on the sheet shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: HeroId,
    pub name: String,
    pub attributes: AttributeScores,
    pub abilities: Vec<Ability>,
    pub actions: Vec<Action>,
    pub max_hit_points: i32,
    pub current_hit_points: i32,
}

impl Character {
    pub fn new(name: impl Into<String>, attributes: AttributeScores) -> Self {
        Self {
            id: HeroId::new(),
            name: name.into(),
            attributes,
            abilities: Vec::new(),
            actions: Vec::new(),
            max_hit_points: 0,
            current_hit_points: 0,
        }
    }
}

/// A playable hero: a character plus progression fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(flatten)]
    pub character: Character,
    pub level: u32,
    pub learning_points: i32,
}

impl Hero {
    /// A fresh hero with starting ratings and the standard ability
    /// catalog.
    pub fn new(name: impl Into<String>) -> Self {
        let mut character = Character::new(name, AttributeScores::starting());
        character.abilities = default_abilities();
        Self {
            character,
            level: 1,
            learning_points: 10,
        }
    }

    pub fn rating(&self, attribute: Attribute) -> i32 {
        self.character.attributes.get(attribute)
    }

    /// Rating of an ability: the mean of its two governing attributes,
    /// rounded down.
    pub fn ability_rating(&self, ability: &Ability) -> i32 {
        let [first, second] = ability.attributes;
        (self.rating(first) + self.rating(second)).div_euclid(2)
    }

    /// Dice pool for a raw attribute check. Hone levels apply to
    /// abilities, not attributes.
    pub fn attribute_pool(&self, attribute: Attribute) -> Result<Pool, DiceError> {
        build_pool(self.rating(attribute), HoneLevel::None)
    }

    /// Dice pool for an ability check, hone level included.
    pub fn ability_pool(&self, ability: &Ability) -> Result<Pool, DiceError> {
        build_pool(self.ability_rating(ability), ability.hone)
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_ABILITIES: Vec<Ability> = vec![
        // Body
        Ability::new(
            "Endure",
            [Attribute::Concentration, Attribute::Endurance],
            AbilityCategory::Body,
        ),
        Ability::new(
            "Move Object",
            [Attribute::Strength, Attribute::Endurance],
            AbilityCategory::Body,
        ),
        Ability::new(
            "Jumping/Climbing",
            [Attribute::Strength, Attribute::Dexterity],
            AbilityCategory::Body,
        ),
        Ability::new(
            "Agility",
            [Attribute::Dexterity, Attribute::Experience],
            AbilityCategory::Body,
        ),
        Ability::new(
            "Stealth",
            [Attribute::Dexterity, Attribute::Intuition],
            AbilityCategory::Body,
        ),
        // Social
        Ability::new(
            "Persuade",
            [Attribute::Concentration, Attribute::Intuition],
            AbilityCategory::Social,
        ),
        Ability::new(
            "Intimidate",
            [Attribute::Concentration, Attribute::Strength],
            AbilityCategory::Social,
        ),
        Ability::new(
            "Deceive",
            [Attribute::Dexterity, Attribute::Intuition],
            AbilityCategory::Social,
        ),
        Ability::new(
            "Insight",
            [Attribute::Intuition, Attribute::Experience],
            AbilityCategory::Social,
        ),
        // Senses
        Ability::new(
            "Perceive",
            [Attribute::Strength, Attribute::Endurance],
            AbilityCategory::Senses,
        ),
        Ability::new(
            "Remembering/Reflection/Research",
            [Attribute::Intuition, Attribute::Experience],
            AbilityCategory::Senses,
        ),
        Ability::new(
            "Magic Sense",
            [Attribute::Concentration, Attribute::Experience],
            AbilityCategory::Senses,
        ),
    ];
}

/// The starting ability catalog every new hero receives.
pub fn default_abilities() -> Vec<Ability> {
    DEFAULT_ABILITIES.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::PoolTerm;

    #[test]
    fn test_new_hero_defaults() {
        let hero = Hero::new("Mirra");
        assert_eq!(hero.character.name, "Mirra");
        assert_eq!(hero.level, 1);
        assert_eq!(hero.learning_points, 10);
        assert_eq!(hero.character.attributes, AttributeScores::starting());
        assert_eq!(hero.character.abilities.len(), 12);
        assert!(hero
            .character
            .abilities
            .iter()
            .all(|a| a.hone == HoneLevel::None));
    }

    #[test]
    fn test_base_scores_sit_below_starting_scores() {
        let base = AttributeScores::base();
        let starting = AttributeScores::starting();
        for attribute in Attribute::all() {
            assert_eq!(base.get(attribute), 1);
            assert_eq!(starting.get(attribute), 10);
        }
    }

    #[test]
    fn test_ability_rating_is_the_floored_mean() {
        let mut hero = Hero::new("Mirra");
        hero.character.attributes.set(Attribute::Strength, 15);
        hero.character.attributes.set(Attribute::Dexterity, 10);
        let ability = Ability::new(
            "Jumping/Climbing",
            [Attribute::Strength, Attribute::Dexterity],
            AbilityCategory::Body,
        );
        assert_eq!(hero.ability_rating(&ability), 12);
    }

    #[test]
    fn test_attribute_pool_ignores_hone() {
        let hero = Hero::new("Mirra");
        // Rating 10 is a single d4.
        assert_eq!(
            hero.attribute_pool(Attribute::Strength).unwrap(),
            vec![PoolTerm::Dice { sides: 4, count: 1 }]
        );
    }

    #[test]
    fn test_ability_pool_appends_hone_additions() {
        let mut hero = Hero::new("Mirra");
        hero.character.abilities[0].hone = HoneLevel::Level2;
        let ability = hero.character.abilities[0].clone();
        let pool = hero.ability_pool(&ability).unwrap();
        // Rating 10, Level 2: 1d4, then the hone's 1d4+2.
        assert_eq!(
            pool,
            vec![
                PoolTerm::Dice { sides: 4, count: 1 },
                PoolTerm::Dice { sides: 4, count: 1 },
                PoolTerm::Bonus { bonus: 2 },
            ]
        );
    }

    #[test]
    fn test_hero_serialization_round_trip() {
        let mut hero = Hero::new("Mirra");
        hero.character.actions.push(Action {
            name: "Sword Strike".to_string(),
            attribute: Attribute::Strength,
            damage: vec![
                PoolTerm::Dice { sides: 6, count: 1 },
                PoolTerm::Bonus { bonus: 2 },
            ],
            include_attribute_dice_to_damage: true,
        });

        let json = serde_json::to_string(&hero).unwrap();
        let back: Hero = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hero);
    }

    #[test]
    fn test_hero_json_is_flat() {
        // Progression fields sit next to the character fields, the way
        // the sheet store persists hero records.
        let hero = Hero::new("Mirra");
        let json = serde_json::to_value(&hero).unwrap();
        assert!(json["name"].is_string());
        assert_eq!(json["level"], 1);
        assert_eq!(json["learningPoints"], 10);
    }
}
