//! The two-stage character creation flow.
//!
//! Stage one collects name, race, class and generation method, then returns
//! a form carrying the generated values in a hidden field. Stage two reads
//! those values back, checks the submitted assignment against them and stores
//! the character. Nothing is kept between the two submissions; a rejected
//! stage two is re-rendered with the same values so the user can try again.
//!
//! ```text
//! INIT --generate--> STATS_GENERATED --submit--> ASSIGNED --persist--> DONE
//!                          ^                |
//!                          +---[invalid]----+
//! ```

use crate::assignment::{assign, AssignmentError, StatAssignment};
use crate::catalog::{Catalog, CatalogError, ClassId, RaceId};
use crate::character::{AbilityScores, Character, CharacterId};
use crate::character_builder::CharacterBuilder;
use crate::form::{
    assignment_field, CharacterForm, FormData, CLASS_FIELD, GENERATED_STATS_FIELD, MAX_NAME_LEN,
    METHOD_FIELD, NAME_FIELD, RACE_FIELD,
};
use crate::generator::{generate, GeneratedStats, StatMethod};
use crate::store::{CharacterStore, StoreError};
use rand::Rng;
use tracing::{debug, info, warn};

const REQUIRED: &str = "This field is required.";
const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";
const INVALID_STAT: &str = "Invalid stat value selected.";
const ALL_SCORES_REQUIRED: &str = "All ability scores must be assigned.";

/// Where a creation attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStage {
    Init,
    StatsGenerated,
    /// Values accepted but the character is not stored yet. Only reported
    /// when storing fails.
    Assigned,
    Done,
}

/// Outcome of submitting the creation form.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Stage one accepted; show the assignment form.
    StatsGenerated {
        form: CharacterForm,
        stats: GeneratedStats,
    },
    /// Re-show the form with errors attached.
    Rejected {
        form: CharacterForm,
        stage: CreationStage,
    },
    /// The character was stored.
    Created(Character),
}

impl Submission {
    pub fn stage(&self) -> CreationStage {
        match self {
            Submission::StatsGenerated { .. } => CreationStage::StatsGenerated,
            Submission::Rejected { stage, .. } => *stage,
            Submission::Created(_) => CreationStage::Done,
        }
    }

    /// The form to render next, if any.
    pub fn form(&self) -> Option<&CharacterForm> {
        match self {
            Submission::StatsGenerated { form, .. } | Submission::Rejected { form, .. } => {
                Some(form)
            }
            Submission::Created(_) => None,
        }
    }
}

/// Validated stage-one choices.
#[derive(Debug, Clone)]
struct Choices {
    name: String,
    race: RaceId,
    class: ClassId,
    method: StatMethod,
}

/// Drives character creation against a catalog and a store.
pub struct CreationWorkflow<S, R> {
    catalog: Catalog,
    store: S,
    rng: R,
}

impl<S: CharacterStore, R: Rng> CreationWorkflow<S, R> {
    pub fn new(catalog: Catalog, store: S, rng: R) -> Self {
        Self {
            catalog,
            store,
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (Catalog, S) {
        (self.catalog, self.store)
    }

    /// Empty stage-one form.
    pub fn form(&self) -> CharacterForm {
        CharacterForm::stage_one(&self.catalog)
    }

    /// Generate a fresh set of values.
    pub fn generate(&mut self, method: StatMethod) -> GeneratedStats {
        generate(method, &mut self.rng)
    }

    /// Handle a form submission at either stage.
    ///
    /// A non-blank `generated_stats` field marks the second stage.
    pub fn submit(&mut self, data: &FormData) -> Submission {
        match data.value(GENERATED_STATS_FIELD) {
            None => self.submit_choices(data),
            Some(raw) => self.submit_assignment(data, raw),
        }
    }

    fn submit_choices(&mut self, data: &FormData) -> Submission {
        let mut form = CharacterForm::stage_one(&self.catalog).bind(data);
        let Some(choices) = self.validate_choices(data, &mut form) else {
            debug!("Stage one rejected");
            return Submission::Rejected {
                form,
                stage: CreationStage::Init,
            };
        };

        let stats = self.generate(choices.method);
        info!(name = %choices.name, method = %choices.method, stats = %stats, "Generated stats");

        let form = CharacterForm::stage_two(&self.catalog, &stats).bind(data);
        Submission::StatsGenerated { form, stats }
    }

    fn submit_assignment(&mut self, data: &FormData, raw: &str) -> Submission {
        let stats: GeneratedStats = match raw.parse() {
            Ok(stats) => stats,
            Err(e) => {
                warn!(generated_stats = raw, error = %e, "Rejected generated stats");
                let mut form = CharacterForm::stage_one(&self.catalog).bind(data);
                form.add_error(AssignmentError::from(e).to_string());
                return Submission::Rejected {
                    form,
                    stage: CreationStage::Init,
                };
            }
        };

        let mut form = CharacterForm::stage_two(&self.catalog, &stats).bind(data);
        let choices = self.validate_choices(data, &mut form);

        let scores = match StatAssignment::from_form(data).and_then(|c| assign(&stats, &c)) {
            Ok(scores) => Some(scores),
            Err(e) => {
                debug!(error = %e, stats = %stats, "Assignment rejected");
                attach_assignment_error(&mut form, &e);
                None
            }
        };

        let (Some(choices), Some(scores)) = (choices, scores) else {
            return Submission::Rejected {
                form,
                stage: CreationStage::StatsGenerated,
            };
        };

        match self.persist(choices, scores) {
            Ok(character) => Submission::Created(character),
            Err(message) => {
                form.add_error(message);
                Submission::Rejected {
                    form,
                    stage: CreationStage::Assigned,
                }
            }
        }
    }

    fn persist(&mut self, choices: Choices, scores: AbilityScores) -> Result<Character, String> {
        let character = CharacterBuilder::new()
            .name(choices.name)
            .race(choices.race)
            .class(choices.class)
            .stat_method(choices.method)
            .ability_scores(scores)
            .build()
            .map_err(|e| e.to_string())?;

        self.store.create(character).map_err(|e| {
            warn!(error = %e, "Failed to store character");
            format!("Could not save character: {e}")
        })
    }

    fn validate_choices(&self, data: &FormData, form: &mut CharacterForm) -> Option<Choices> {
        let name = match data.value(NAME_FIELD) {
            None => {
                form.add_field_error(NAME_FIELD, REQUIRED);
                None
            }
            Some(name) if name.chars().count() > MAX_NAME_LEN => {
                form.add_field_error(
                    NAME_FIELD,
                    format!("Ensure this value has at most {MAX_NAME_LEN} characters."),
                );
                None
            }
            Some(name) => Some(name.to_string()),
        };

        let race = match data.value(RACE_FIELD) {
            None => {
                form.add_field_error(RACE_FIELD, REQUIRED);
                None
            }
            Some(value) => {
                let race = self.catalog.race_from_value(value).map(|r| r.id);
                if race.is_none() {
                    form.add_field_error(RACE_FIELD, INVALID_CHOICE);
                }
                race
            }
        };

        let class = match data.value(CLASS_FIELD) {
            None => {
                form.add_field_error(CLASS_FIELD, REQUIRED);
                None
            }
            Some(value) => {
                let class = self.catalog.class_from_value(value).map(|c| c.id);
                if class.is_none() {
                    form.add_field_error(CLASS_FIELD, INVALID_CHOICE);
                }
                class
            }
        };

        let method = match data.value(METHOD_FIELD) {
            None => {
                form.add_field_error(METHOD_FIELD, REQUIRED);
                None
            }
            Some(value) => match value.parse::<StatMethod>() {
                Ok(method) => Some(method),
                Err(e) => {
                    warn!(error = %e, "Unknown stat method");
                    form.add_error(e.to_string());
                    None
                }
            },
        };

        Some(Choices {
            name: name?,
            race: race?,
            class: class?,
            method: method?,
        })
    }

    pub fn character(&self, id: CharacterId) -> Result<Character, StoreError> {
        self.store.get(id)
    }

    pub fn characters(&self) -> Vec<Character> {
        self.store.list()
    }

    pub fn delete_character(&mut self, id: CharacterId) -> Result<(), StoreError> {
        self.store.delete(id)
    }

    /// Remove a race from the catalog and clear it from stored characters.
    /// Returns how many characters were detached.
    pub fn remove_race(&mut self, id: RaceId) -> Result<usize, CatalogError> {
        let race = self.catalog.remove_race(id)?;
        let detached = self.store.detach_race(id);
        info!(race = %race.name, detached, "Removed race");
        Ok(detached)
    }

    /// Remove a class from the catalog and clear it from stored characters.
    pub fn remove_class(&mut self, id: ClassId) -> Result<usize, CatalogError> {
        let class = self.catalog.remove_class(id)?;
        let detached = self.store.detach_class(id);
        info!(class = %class.name, detached, "Removed class");
        Ok(detached)
    }
}

fn attach_assignment_error(form: &mut CharacterForm, error: &AssignmentError) {
    match error {
        AssignmentError::IncompleteAssignment { missing } => {
            for ability in missing {
                form.add_field_error(&assignment_field(*ability), REQUIRED);
            }
            form.add_error(ALL_SCORES_REQUIRED);
        }
        AssignmentError::InvalidSlotValue { ability, .. } => {
            form.add_field_error(&assignment_field(*ability), INVALID_STAT);
        }
        AssignmentError::MalformedStatData(_)
        | AssignmentError::DuplicateAssignment { .. }
        | AssignmentError::AssignmentMismatch { .. } => form.add_error(error.to_string()),
    }
}
