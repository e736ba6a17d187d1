//! Testing utilities for character creation.
//!
//! This module provides tools for integration testing:
//! - `sample_catalog` with a handful of races and classes
//! - `TestHarness` for driving a seeded workflow over an in-memory store
//! - Assertion helpers for checking forms and assigned scores

use crate::catalog::{Catalog, ClassId, RaceId};
use crate::character::{Ability, AbilityScores, Character};
use crate::form::{
    assignment_field, CharacterForm, FormData, CLASS_FIELD, GENERATED_STATS_FIELD, METHOD_FIELD,
    NAME_FIELD, RACE_FIELD,
};
use crate::generator::GeneratedStats;
use crate::store::MemoryStore;
use crate::workflow::{CreationWorkflow, Submission};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A catalog with four races and four classes.
pub fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for (name, description) in [
        ("Human", "Versatile and ambitious."),
        ("Elf", "Graceful and long-lived."),
        ("Dwarf", "Stout and hardy."),
        ("Halfling", "Small but brave."),
    ] {
        // Names above are distinct
        let _ = catalog.add_race(name, description);
    }
    for (name, description, hit_die) in [
        ("Fighter", "Master of martial combat.", 10),
        ("Wizard", "Scholarly magic-user.", 6),
        ("Rogue", "Scoundrel who uses stealth.", 8),
        ("Cleric", "Priestly champion.", 8),
    ] {
        let _ = catalog.add_class(name, description, hit_die);
    }
    catalog
}

/// Stage-one form data from raw field values.
pub fn stage_one_data(name: &str, race: &str, class: &str, method: &str) -> FormData {
    FormData::new()
        .with(NAME_FIELD, name)
        .with(RACE_FIELD, race)
        .with(CLASS_FIELD, class)
        .with(METHOD_FIELD, method)
}

/// Test harness for running creation scenarios.
pub struct TestHarness {
    pub workflow: CreationWorkflow<MemoryStore, StdRng>,
}

impl TestHarness {
    /// Sample catalog, empty store, RNG seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            workflow: CreationWorkflow::new(
                sample_catalog(),
                MemoryStore::new(),
                StdRng::seed_from_u64(seed),
            ),
        }
    }

    /// Id of a race in the catalog. Panics if unknown.
    pub fn race_id(&self, name: &str) -> RaceId {
        self.workflow
            .catalog()
            .race_by_name(name)
            .map(|r| r.id)
            .unwrap_or_else(|| panic!("No race named {name}"))
    }

    /// Id of a class in the catalog. Panics if unknown.
    pub fn class_id(&self, name: &str) -> ClassId {
        self.workflow
            .catalog()
            .class_by_name(name)
            .map(|c| c.id)
            .unwrap_or_else(|| panic!("No class named {name}"))
    }

    /// Stage-one data, looking race and class up by name.
    pub fn stage_one(&self, name: &str, race: &str, class: &str, method: &str) -> FormData {
        stage_one_data(
            name,
            &self.race_id(race).to_string(),
            &self.class_id(class).to_string(),
            method,
        )
    }

    /// Stage-two data assigning `values` in slot order (STR first).
    pub fn assignment(
        &self,
        name: &str,
        race: &str,
        class: &str,
        generated_stats: &str,
        values: [u8; 6],
    ) -> FormData {
        let mut data = self
            .stage_one(name, race, class, "standard")
            .with(GENERATED_STATS_FIELD, generated_stats);
        for (ability, value) in Ability::all().into_iter().zip(values) {
            data.insert(assignment_field(ability), value.to_string());
        }
        data
    }

    /// Run stage one and return the generated stats. Panics on rejection.
    pub fn generate(&mut self, name: &str, race: &str, class: &str, method: &str) -> GeneratedStats {
        let data = self.stage_one(name, race, class, method);
        match self.workflow.submit(&data) {
            Submission::StatsGenerated { stats, .. } => stats,
            other => panic!("Expected generated stats, got {other:?}"),
        }
    }

    /// Create a character with the standard array in slot order.
    pub fn create_standard(&mut self, name: &str, race: &str, class: &str) -> Character {
        let stats = self.generate(name, race, class, "standard");
        let data = self.assignment(name, race, class, &stats.to_string(), stats.values());
        match self.workflow.submit(&data) {
            Submission::Created(character) => character,
            other => panic!("Expected a created character, got {other:?}"),
        }
    }
}

/// Assert a field carries exactly `message`.
pub fn assert_field_error(form: &CharacterForm, field: &str, message: &str) {
    let errors = form
        .field(field)
        .map(|f| f.errors.clone())
        .unwrap_or_default();
    assert!(
        errors.iter().any(|e| e == message),
        "Expected error {message:?} on {field}, found {errors:?}"
    );
}

/// Assert `scores` use exactly the generated values.
pub fn assert_permutation_of(scores: &AbilityScores, stats: &GeneratedStats) {
    let mut values = scores.values();
    values.sort_by(|a, b| b.cmp(a));
    assert_eq!(
        values,
        stats.sorted_desc(),
        "Scores {scores:?} are not a permutation of {stats}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog() {
        let catalog = sample_catalog();
        assert_eq!(catalog.list_races().len(), 4);
        assert_eq!(catalog.list_classes().len(), 4);
        assert_eq!(catalog.class_by_name("Wizard").unwrap().hit_die, 6);
    }

    #[test]
    fn test_harness_creates_character() {
        let mut harness = TestHarness::new(9);
        let character = harness.create_standard("Thorin", "Dwarf", "Fighter");

        assert_eq!(character.ability_scores, AbilityScores::new(15, 14, 13, 12, 10, 8));
        assert_eq!(harness.workflow.characters().len(), 1);
    }

    #[test]
    fn test_harness_is_deterministic() {
        let a = TestHarness::new(21).generate("A", "Elf", "Rogue", "roll");
        let b = TestHarness::new(21).generate("B", "Human", "Cleric", "roll");
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "No race named Orc")]
    fn test_unknown_race_panics() {
        let harness = TestHarness::new(1);
        harness.race_id("Orc");
    }
}
