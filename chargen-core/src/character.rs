//! Character records and ability scores.
//!
//! A [`Character`] is written once, at the end of a successful creation
//! attempt. Race and class are held as references into the [`Catalog`] and
//! are cleared when the referenced entry is removed.

use crate::catalog::{Catalog, ClassId, RaceId};
use crate::generator::StatMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Ability Scores
// ============================================================================

/// The six ability score slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    /// Lowercase slot name, as used in form field names.
    pub fn field_name(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    /// All six slots in canonical order.
    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Ability scores container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: u8) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }

    /// Scores in canonical slot order.
    pub fn values(&self) -> [u8; 6] {
        Ability::all().map(|ability| self.get(ability))
    }

    pub fn modifier(&self, ability: Ability) -> i8 {
        let score = self.get(ability) as i8;
        // Floor division: 8-9 = -1, 10-11 = 0, 12-13 = +1
        (score - 10).div_euclid(2)
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

// ============================================================================
// Character
// ============================================================================

/// A persisted character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub race: Option<RaceId>,
    pub class: Option<ClassId>,
    pub level: u8,
    pub stat_method: StatMethod,
    pub ability_scores: AbilityScores,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CharacterId::new(),
            name: name.into(),
            race: None,
            class: None,
            level: 1,
            stat_method: StatMethod::default(),
            ability_scores: AbilityScores::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// One-line description, e.g. `"Thorin (Level 1 Dwarf Fighter)"`.
    pub fn summary(&self, catalog: &Catalog) -> String {
        let race = self
            .race
            .and_then(|id| catalog.race(id))
            .map(|r| r.name.as_str())
            .unwrap_or("No Race");
        let class = self
            .class
            .and_then(|id| catalog.class(id))
            .map(|c| c.name.as_str())
            .unwrap_or("No Class");
        format!("{} (Level {} {race} {class})", self.name, self.level)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_catalog;

    #[test]
    fn test_ability_modifier() {
        let scores = AbilityScores::new(16, 14, 12, 10, 8, 3);
        assert_eq!(scores.modifier(Ability::Strength), 3);
        assert_eq!(scores.modifier(Ability::Dexterity), 2);
        assert_eq!(scores.modifier(Ability::Constitution), 1);
        assert_eq!(scores.modifier(Ability::Intelligence), 0);
        assert_eq!(scores.modifier(Ability::Wisdom), -1);
        assert_eq!(scores.modifier(Ability::Charisma), -4);
    }

    #[test]
    fn test_values_follow_slot_order() {
        let mut scores = AbilityScores::default();
        scores.set(Ability::Wisdom, 17);
        assert_eq!(scores.values(), [10, 10, 10, 10, 17, 10]);
    }

    #[test]
    fn test_new_character_defaults() {
        let character = Character::new("Mira");
        assert_eq!(character.level, 1);
        assert_eq!(character.stat_method, StatMethod::Roll);
        assert_eq!(character.ability_scores, AbilityScores::default());
        assert!(character.race.is_none());
    }

    #[test]
    fn test_summary_with_references() {
        let catalog = sample_catalog();
        let mut character = Character::new("Thorin");
        character.race = catalog.race_by_name("Dwarf").map(|r| r.id);
        character.class = catalog.class_by_name("Fighter").map(|c| c.id);

        assert_eq!(character.summary(&catalog), "Thorin (Level 1 Dwarf Fighter)");
    }

    #[test]
    fn test_summary_with_detached_references() {
        let catalog = sample_catalog();
        let mut character = Character::new("Nobody");
        character.race = Some(RaceId::new());

        assert_eq!(
            character.summary(&catalog),
            "Nobody (Level 1 No Race No Class)"
        );
    }
}
