//! Race and class catalog.
//!
//! Catalog entries are simple named records. Characters refer to them by id;
//! removing an entry does not touch characters directly, the store detaches
//! the reference (see [`crate::store::CharacterStore::detach_race`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors from catalog edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("A {kind} named \"{name}\" already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Race not found: {0}")]
    RaceNotFound(RaceId),

    #[error("Class not found: {0}")]
    ClassNotFound(ClassId),
}

/// Unique identifier for races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaceId(pub Uuid);

impl RaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(pub Uuid);

impl ClassId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClassId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A playable race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A character class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Hit die size, e.g. 8 for a d8.
    #[serde(default = "default_hit_die")]
    pub hit_die: u8,
}

fn default_hit_die() -> u8 {
    8
}

/// An `{id, name}` pair for choice lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

/// The read-mostly list of races and classes offered at creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    races: Vec<Race>,
    classes: Vec<CharacterClass>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a race. Names are unique.
    pub fn add_race(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<RaceId, CatalogError> {
        let name = name.into();
        if self.race_by_name(&name).is_some() {
            return Err(CatalogError::DuplicateName { kind: "race", name });
        }
        let id = RaceId::new();
        self.races.push(Race {
            id,
            name,
            description: description.into(),
        });
        Ok(id)
    }

    /// Add a class. Names are unique.
    pub fn add_class(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        hit_die: u8,
    ) -> Result<ClassId, CatalogError> {
        let name = name.into();
        if self.class_by_name(&name).is_some() {
            return Err(CatalogError::DuplicateName { kind: "class", name });
        }
        let id = ClassId::new();
        self.classes.push(CharacterClass {
            id,
            name,
            description: description.into(),
            hit_die,
        });
        Ok(id)
    }

    pub fn race(&self, id: RaceId) -> Option<&Race> {
        self.races.iter().find(|r| r.id == id)
    }

    pub fn class(&self, id: ClassId) -> Option<&CharacterClass> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn race_by_name(&self, name: &str) -> Option<&Race> {
        self.races.iter().find(|r| r.name == name)
    }

    pub fn class_by_name(&self, name: &str) -> Option<&CharacterClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Look up a race from a submitted form value.
    pub fn race_from_value(&self, value: &str) -> Option<&Race> {
        let id = Uuid::parse_str(value.trim()).ok()?;
        self.race(RaceId(id))
    }

    /// Look up a class from a submitted form value.
    pub fn class_from_value(&self, value: &str) -> Option<&CharacterClass> {
        let id = Uuid::parse_str(value.trim()).ok()?;
        self.class(ClassId(id))
    }

    pub fn list_races(&self) -> Vec<CatalogEntry> {
        self.races
            .iter()
            .map(|r| CatalogEntry {
                id: r.id.to_string(),
                name: r.name.clone(),
            })
            .collect()
    }

    pub fn list_classes(&self) -> Vec<CatalogEntry> {
        self.classes
            .iter()
            .map(|c| CatalogEntry {
                id: c.id.to_string(),
                name: c.name.clone(),
            })
            .collect()
    }

    pub fn remove_race(&mut self, id: RaceId) -> Result<Race, CatalogError> {
        let index = self
            .races
            .iter()
            .position(|r| r.id == id)
            .ok_or(CatalogError::RaceNotFound(id))?;
        Ok(self.races.remove(index))
    }

    pub fn remove_class(&mut self, id: ClassId) -> Result<CharacterClass, CatalogError> {
        let index = self
            .classes
            .iter()
            .position(|c| c.id == id)
            .ok_or(CatalogError::ClassNotFound(id))?;
        Ok(self.classes.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_race_rejected() {
        let mut catalog = Catalog::new();
        catalog.add_race("Elf", "").unwrap();
        let result = catalog.add_race("Elf", "again");
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateName { kind: "race", .. })
        ));
    }

    #[test]
    fn test_lookup_from_form_value() {
        let mut catalog = Catalog::new();
        let id = catalog.add_class("Wizard", "Arcane scholar", 6).unwrap();

        let class = catalog.class_from_value(&id.to_string()).unwrap();
        assert_eq!(class.name, "Wizard");
        assert_eq!(class.hit_die, 6);

        assert!(catalog.class_from_value("not-a-uuid").is_none());
        assert!(catalog.class_from_value(&ClassId::new().to_string()).is_none());
    }

    #[test]
    fn test_list_entries_keep_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.add_race("Human", "").unwrap();
        catalog.add_race("Dwarf", "").unwrap();

        let names: Vec<_> = catalog.list_races().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Human", "Dwarf"]);
    }

    #[test]
    fn test_remove_missing_race() {
        let mut catalog = Catalog::new();
        let missing = RaceId::new();
        assert_eq!(
            catalog.remove_race(missing),
            Err(CatalogError::RaceNotFound(missing))
        );
    }

    #[test]
    fn test_class_hit_die_defaults_when_absent() {
        let json = r#"{"id":"6f1c1f7e-8d4e-4b7c-9a55-0c5d7f3f9b10","name":"Rogue"}"#;
        let class: CharacterClass = serde_json::from_str(json).unwrap();
        assert_eq!(class.hit_die, 8);
        assert!(class.description.is_empty());
    }
}
