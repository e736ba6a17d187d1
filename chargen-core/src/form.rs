//! Declarative description of the character creation form.
//!
//! The crate does not render anything. It hands a renderer the fields to
//! show, the choices for each select, the submitted values to echo back and
//! any errors to attach.

use crate::catalog::Catalog;
use crate::character::Ability;
use crate::generator::{GeneratedStats, StatMethod};
use std::collections::BTreeMap;

pub const NAME_FIELD: &str = "name";
pub const RACE_FIELD: &str = "race";
pub const CLASS_FIELD: &str = "character_class";
pub const METHOD_FIELD: &str = "stat_method";
pub const GENERATED_STATS_FIELD: &str = "generated_stats";

/// Longest accepted character name.
pub const MAX_NAME_LEN: usize = 100;

const EMPTY_STAT_CHOICE: &str = "-- Select Stat --";
const EMPTY_RACE_CHOICE: &str = "-- Select Race --";
const EMPTY_CLASS_CHOICE: &str = "-- Select Class --";

/// Form field holding the value for `ability`, e.g. `strength_assignment`.
pub fn assignment_field(ability: Ability) -> String {
    format!("{}_assignment", ability.field_name())
}

/// Submitted form values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Submitted value exactly as received.
    pub fn raw(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Trimmed value, or `None` when absent or blank.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.raw(field).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// One option of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select(Vec<Choice>),
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: Option<String>,
    pub errors: Vec<String>,
}

impl FormField {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: true,
            value: None,
            errors: Vec::new(),
        }
    }

    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            FieldKind::Select(choices) => choices,
            _ => &[],
        }
    }
}

/// The creation form at one of its two stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterForm {
    pub fields: Vec<FormField>,
    /// Errors not tied to a single field.
    pub errors: Vec<String>,
    /// Generated values offered for assignment, highest first. Empty at stage one.
    pub available_stats: Vec<u8>,
}

impl CharacterForm {
    /// Stage one: name, race, class and generation method.
    pub fn stage_one(catalog: &Catalog) -> Self {
        let mut race_choices = vec![Choice::new("", EMPTY_RACE_CHOICE)];
        race_choices.extend(
            catalog
                .list_races()
                .into_iter()
                .map(|e| Choice::new(e.id, e.name)),
        );

        let mut class_choices = vec![Choice::new("", EMPTY_CLASS_CHOICE)];
        class_choices.extend(
            catalog
                .list_classes()
                .into_iter()
                .map(|e| Choice::new(e.id, e.name)),
        );

        let method_choices = StatMethod::all()
            .iter()
            .map(|m| Choice::new(m.as_str(), m.label()))
            .collect();

        let mut method = FormField::new(
            METHOD_FIELD,
            "Stat method",
            FieldKind::Select(method_choices),
        );
        method.value = Some(StatMethod::default().as_str().to_string());

        Self {
            fields: vec![
                FormField::new(NAME_FIELD, "Name", FieldKind::Text),
                FormField::new(RACE_FIELD, "Race", FieldKind::Select(race_choices)),
                FormField::new(
                    CLASS_FIELD,
                    "Character class",
                    FieldKind::Select(class_choices),
                ),
                method,
            ],
            errors: Vec::new(),
            available_stats: Vec::new(),
        }
    }

    /// Stage two: the stage-one fields plus the hidden stats and one select
    /// per ability. Every select offers the full list; using a value twice is
    /// caught when the form is submitted.
    pub fn stage_two(catalog: &Catalog, stats: &GeneratedStats) -> Self {
        let mut form = Self::stage_one(catalog);
        let available = stats.sorted_desc();

        let mut hidden = FormField::new(GENERATED_STATS_FIELD, "", FieldKind::Hidden);
        hidden.value = Some(stats.to_string());
        form.fields.push(hidden);

        let mut choices = vec![Choice::new("", EMPTY_STAT_CHOICE)];
        choices.extend(
            available
                .iter()
                .map(|v| Choice::new(v.to_string(), v.to_string())),
        );
        for ability in Ability::all() {
            form.fields.push(FormField::new(
                assignment_field(ability),
                format!("Assign to {}", ability.name()),
                FieldKind::Select(choices.clone()),
            ));
        }

        form.available_stats = available.to_vec();
        form
    }

    /// Whether the per-ability selects are shown.
    pub fn show_assignment(&self) -> bool {
        !self.available_stats.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Copy submitted values into matching fields. The hidden stats field
    /// keeps the value the form was built with.
    pub fn bind(mut self, data: &FormData) -> Self {
        for field in &mut self.fields {
            if field.kind == FieldKind::Hidden {
                continue;
            }
            if let Some(value) = data.raw(&field.name) {
                field.value = Some(value.to_string());
            }
        }
        self
    }

    /// Attach an error to a field, or to the form if no such field exists.
    pub fn add_field_error(&mut self, name: &str, message: impl Into<String>) {
        let message = message.into();
        match self.field_mut(name) {
            Some(field) => field.errors.push(message),
            None => self.errors.push(message),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.fields.iter().any(|f| !f.errors.is_empty())
    }
}
