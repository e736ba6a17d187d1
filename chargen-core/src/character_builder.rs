//! Builder for new character records.
//!
//! Ability scores are taken as assigned. Racial and class adjustments are
//! not applied.

use crate::catalog::{ClassId, RaceId};
use crate::character::{AbilityScores, Character};
use crate::form::MAX_NAME_LEN;
use crate::generator::StatMethod;
use thiserror::Error;

/// Error from character building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("Character name is required")]
    MissingName,

    #[error("Character name is longer than {max} characters")]
    NameTooLong { max: usize },

    #[error("Ability scores are required")]
    MissingAbilityScores,

    #[error("Level must be at least 1")]
    InvalidLevel,
}

/// Builder for creating characters.
#[derive(Debug, Clone)]
pub struct CharacterBuilder {
    name: Option<String>,
    race: Option<RaceId>,
    class: Option<ClassId>,
    level: u8,
    stat_method: StatMethod,
    ability_scores: Option<AbilityScores>,
}

impl Default for CharacterBuilder {
    fn default() -> Self {
        Self {
            name: None,
            race: None,
            class: None,
            level: 1,
            stat_method: StatMethod::default(),
            ability_scores: None,
        }
    }
}

impl CharacterBuilder {
    /// Create a new character builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the character's name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the character's race.
    pub fn race(mut self, race: RaceId) -> Self {
        self.race = Some(race);
        self
    }

    /// Set the character's class.
    pub fn class(mut self, class: ClassId) -> Self {
        self.class = Some(class);
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Record which method produced the scores.
    pub fn stat_method(mut self, method: StatMethod) -> Self {
        self.stat_method = method;
        self
    }

    /// Set the assigned ability scores.
    pub fn ability_scores(mut self, scores: AbilityScores) -> Self {
        self.ability_scores = Some(scores);
        self
    }

    /// Build the character, returning an error if any required field is missing.
    pub fn build(self) -> Result<Character, BuilderError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(BuilderError::MissingName)?;
        if name.chars().count() > MAX_NAME_LEN {
            return Err(BuilderError::NameTooLong { max: MAX_NAME_LEN });
        }
        let ability_scores = self
            .ability_scores
            .ok_or(BuilderError::MissingAbilityScores)?;
        if self.level == 0 {
            return Err(BuilderError::InvalidLevel);
        }

        let mut character = Character::new(name);
        character.race = self.race;
        character.class = self.class;
        character.level = self.level;
        character.stat_method = self.stat_method;
        character.ability_scores = ability_scores;

        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_character() {
        let race = RaceId::new();
        let class = ClassId::new();
        let character = CharacterBuilder::new()
            .name("Thorin")
            .race(race)
            .class(class)
            .stat_method(StatMethod::StandardArray)
            .ability_scores(AbilityScores::new(15, 13, 14, 8, 12, 10))
            .build()
            .expect("Should build successfully");

        assert_eq!(character.name, "Thorin");
        assert_eq!(character.race, Some(race));
        assert_eq!(character.class, Some(class));
        assert_eq!(character.level, 1);
        assert_eq!(character.stat_method, StatMethod::StandardArray);
        // No racial adjustment
        assert_eq!(character.ability_scores.constitution, 14);
    }

    #[test]
    fn test_missing_name_error() {
        let result = CharacterBuilder::new()
            .ability_scores(AbilityScores::default())
            .build();
        assert_eq!(result, Err(BuilderError::MissingName));

        let result = CharacterBuilder::new()
            .name("   ")
            .ability_scores(AbilityScores::default())
            .build();
        assert_eq!(result, Err(BuilderError::MissingName));
    }

    #[test]
    fn test_name_too_long() {
        let result = CharacterBuilder::new()
            .name("a".repeat(MAX_NAME_LEN + 1))
            .ability_scores(AbilityScores::default())
            .build();
        assert_eq!(result, Err(BuilderError::NameTooLong { max: MAX_NAME_LEN }));
    }

    #[test]
    fn test_missing_scores_error() {
        let result = CharacterBuilder::new().name("Mira").build();
        assert_eq!(result, Err(BuilderError::MissingAbilityScores));
    }

    #[test]
    fn test_level_zero_rejected() {
        let result = CharacterBuilder::new()
            .name("Mira")
            .level(0)
            .ability_scores(AbilityScores::default())
            .build();
        assert_eq!(result, Err(BuilderError::InvalidLevel));
    }

    #[test]
    fn test_race_and_class_optional() {
        let character = CharacterBuilder::new()
            .name("Wanderer")
            .ability_scores(AbilityScores::default())
            .build()
            .unwrap();
        assert!(character.race.is_none());
        assert!(character.class.is_none());
    }
}
