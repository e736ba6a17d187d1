//! Ability score generation and assignment for tabletop character creation.
//!
//! This crate provides:
//! - 4d6-drop-lowest and standard-array score generation with an injected RNG
//! - Validation that a player's assignment uses exactly the generated values
//! - A two-stage creation workflow over a pluggable character store
//! - Roster persistence
//!
//! # Quick Start
//!
//! ```ignore
//! use chargen_core::testing::sample_catalog;
//! use chargen_core::{ChargenConfig, CreationWorkflow, FormData, MemoryStore, Submission};
//!
//! let config = ChargenConfig::from_env()?;
//! let mut workflow = CreationWorkflow::new(sample_catalog(), MemoryStore::new(), config.rng());
//!
//! // Stage one: name, race, class and method
//! let outcome = workflow.submit(&stage_one_data);
//! if let Submission::StatsGenerated { stats, .. } = outcome {
//!     println!("Assign these: {stats}");
//! }
//! ```

pub mod assignment;
pub mod catalog;
pub mod character;
pub mod character_builder;
pub mod config;
pub mod dice;
pub mod form;
pub mod generator;
pub mod persist;
pub mod store;
pub mod testing;
pub mod workflow;

// Primary public API
pub use assignment::{assign, assign_raw, AssignmentError, StatAssignment};
pub use catalog::{Catalog, CatalogError, CharacterClass, ClassId, Race, RaceId};
pub use character::{Ability, AbilityScores, Character, CharacterId};
pub use character_builder::{BuilderError, CharacterBuilder};
pub use config::{ChargenConfig, ConfigError};
pub use form::{CharacterForm, FormData};
pub use generator::{generate, GeneratedStats, MethodError, StatMethod, STANDARD_ARRAY};
pub use persist::{PersistError, SavedRoster};
pub use store::{CharacterStore, MemoryStore, StoreError};
pub use workflow::{CreationStage, CreationWorkflow, Submission};
