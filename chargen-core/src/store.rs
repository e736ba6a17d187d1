//! Character storage.

use crate::catalog::{ClassId, RaceId};
use crate::character::{Character, CharacterId};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),

    #[error("Character already stored: {0}")]
    AlreadyExists(CharacterId),
}

/// Where finished characters are kept.
pub trait CharacterStore {
    /// Store a new character and return the stored record.
    fn create(&mut self, character: Character) -> Result<Character, StoreError>;

    fn get(&self, id: CharacterId) -> Result<Character, StoreError>;

    /// All characters, oldest first.
    fn list(&self) -> Vec<Character>;

    fn delete(&mut self, id: CharacterId) -> Result<(), StoreError>;

    /// Clear the race reference on every character that uses `race`.
    /// Returns how many characters changed.
    fn detach_race(&mut self, race: RaceId) -> usize;

    /// Clear the class reference on every character that uses `class`.
    fn detach_class(&mut self, class: ClassId) -> usize;
}

/// In-memory store, kept in creation order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    characters: Vec<Character>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously saved records.
    pub fn from_characters(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl CharacterStore for MemoryStore {
    fn create(&mut self, character: Character) -> Result<Character, StoreError> {
        if self.characters.iter().any(|c| c.id == character.id) {
            return Err(StoreError::AlreadyExists(character.id));
        }
        info!(id = %character.id, name = %character.name, "Stored character");
        self.characters.push(character.clone());
        Ok(character)
    }

    fn get(&self, id: CharacterId) -> Result<Character, StoreError> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self) -> Vec<Character> {
        self.characters.clone()
    }

    fn delete(&mut self, id: CharacterId) -> Result<(), StoreError> {
        let index = self
            .characters
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.characters.remove(index);
        info!(id = %id, name = %removed.name, "Deleted character");
        Ok(())
    }

    fn detach_race(&mut self, race: RaceId) -> usize {
        let mut changed = 0;
        for character in self.characters.iter_mut().filter(|c| c.race == Some(race)) {
            character.race = None;
            character.touch();
            changed += 1;
        }
        debug!(race = %race, changed, "Detached race from characters");
        changed
    }

    fn detach_class(&mut self, class: ClassId) -> usize {
        let mut changed = 0;
        for character in self
            .characters
            .iter_mut()
            .filter(|c| c.class == Some(class))
        {
            character.class = None;
            character.touch();
            changed += 1;
        }
        debug!(class = %class, changed, "Detached class from characters");
        changed
    }
}
