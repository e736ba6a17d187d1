//! Assigning generated values to ability slots.
//!
//! The expected values arrive back from the client, so they are parsed and
//! checked again before anything is applied. A candidate assignment is
//! accepted only when it is a permutation of exactly those values: every slot
//! filled, no value used more often than it was generated, nothing invented.

use crate::character::{Ability, AbilityScores};
use crate::form::{assignment_field, FormData};
use crate::generator::{GeneratedStats, StatDataError};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Reasons an assignment is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("Invalid generated stats data: {0}")]
    MalformedStatData(#[from] StatDataError),

    #[error("Missing or empty stat values: {}", join_abilities(.missing))]
    IncompleteAssignment { missing: Vec<Ability> },

    #[error("Invalid stat value for {ability}: \"{value}\"")]
    InvalidSlotValue { ability: Ability, value: String },

    #[error(
        "Each available stat can only be assigned to one ability score \
         ({value} was given to {})",
        join_abilities(.abilities)
    )]
    DuplicateAssignment { value: u8, abilities: Vec<Ability> },

    #[error("The assigned stats {assigned:?} must exactly match the available stats {available:?}")]
    AssignmentMismatch { assigned: Vec<u8>, available: Vec<u8> },
}

fn join_abilities(abilities: &[Ability]) -> String {
    abilities
        .iter()
        .map(|a| a.field_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A candidate mapping from ability slots to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatAssignment {
    slots: BTreeMap<Ability, u8>,
}

impl StatAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one slot.
    pub fn with(mut self, ability: Ability, value: u8) -> Self {
        self.slots.insert(ability, value);
        self
    }

    pub fn set(&mut self, ability: Ability, value: u8) {
        self.slots.insert(ability, value);
    }

    pub fn get(&self, ability: Ability) -> Option<u8> {
        self.slots.get(&ability).copied()
    }

    /// Assign `values` to the slots in canonical order (STR first).
    pub fn in_slot_order(values: [u8; 6]) -> Self {
        let slots = Ability::all().into_iter().zip(values).collect();
        Self { slots }
    }

    /// Read the `{ability}_assignment` fields of a submitted form.
    ///
    /// Blank or absent fields are left unset and reported later as missing;
    /// a value that is not an integer is rejected here.
    pub fn from_form(data: &FormData) -> Result<Self, AssignmentError> {
        let mut assignment = Self::new();
        for ability in Ability::all() {
            let Some(raw) = data.value(&assignment_field(ability)) else {
                continue;
            };
            let value = raw
                .parse::<u8>()
                .map_err(|_| AssignmentError::InvalidSlotValue {
                    ability,
                    value: raw.to_string(),
                })?;
            assignment.set(ability, value);
        }
        Ok(assignment)
    }
}

/// Validate `candidate` against the generated values and build the scores.
pub fn assign(
    expected: &GeneratedStats,
    candidate: &StatAssignment,
) -> Result<AbilityScores, AssignmentError> {
    let available = expected.sorted_desc();

    let missing: Vec<Ability> = Ability::all()
        .into_iter()
        .filter(|ability| candidate.get(*ability).is_none())
        .collect();
    if !missing.is_empty() {
        debug!(?missing, "Assignment incomplete");
        return Err(AssignmentError::IncompleteAssignment { missing });
    }

    let assigned: Vec<(Ability, u8)> = candidate.slots.iter().map(|(a, v)| (*a, *v)).collect();

    // A value may fill as many slots as it was generated, and no more.
    let mut by_value: BTreeMap<u8, Vec<Ability>> = BTreeMap::new();
    for (ability, value) in &assigned {
        by_value.entry(*value).or_default().push(*ability);
    }
    for (value, abilities) in by_value.into_iter().rev() {
        if abilities.len() > 1 && abilities.len() > expected.count_of(value) {
            debug!(value, ?abilities, "Value assigned to several slots");
            return Err(AssignmentError::DuplicateAssignment { value, abilities });
        }
    }

    let mut sorted: Vec<u8> = assigned.iter().map(|(_, v)| *v).collect();
    sorted.sort_by(|a, b| b.cmp(a));
    if sorted != available {
        debug!(?sorted, ?available, "Assigned values do not match");
        return Err(AssignmentError::AssignmentMismatch {
            assigned: sorted,
            available: available.to_vec(),
        });
    }

    let mut scores = AbilityScores::default();
    for (ability, value) in assigned {
        scores.set(ability, value);
    }
    Ok(scores)
}

/// Parse the client-carried stats string, then [`assign`].
pub fn assign_raw(
    expected: &str,
    candidate: &StatAssignment,
) -> Result<AbilityScores, AssignmentError> {
    let expected: GeneratedStats = expected.parse()?;
    assign(&expected, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, StatMethod};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn standard() -> GeneratedStats {
        GeneratedStats::new([15, 14, 13, 12, 10, 8]).unwrap()
    }

    #[test]
    fn test_standard_assignment() {
        let candidate = StatAssignment::in_slot_order([8, 10, 12, 13, 14, 15]);
        let scores = assign(&standard(), &candidate).expect("valid permutation");

        assert_eq!(scores.strength, 8);
        assert_eq!(scores.dexterity, 10);
        assert_eq!(scores.constitution, 12);
        assert_eq!(scores.intelligence, 13);
        assert_eq!(scores.wisdom, 14);
        assert_eq!(scores.charisma, 15);
    }

    #[test]
    fn test_shuffled_permutations_accepted() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            let stats = generate(StatMethod::Roll, &mut rng);
            let mut values = stats.values();
            values.shuffle(&mut rng);

            let scores = assign(&stats, &StatAssignment::in_slot_order(values))
                .expect("permutation should be accepted");

            let mut result = scores.values();
            result.sort_by(|a, b| b.cmp(a));
            assert_eq!(result, stats.sorted_desc());
        }
    }

    #[test]
    fn test_repeated_value_rejected_as_duplicate() {
        // 15 given twice, 14 left out
        let candidate = StatAssignment::in_slot_order([15, 15, 13, 12, 10, 8]);
        let result = assign(&standard(), &candidate);

        assert_eq!(
            result,
            Err(AssignmentError::DuplicateAssignment {
                value: 15,
                abilities: vec![Ability::Strength, Ability::Dexterity],
            })
        );
    }

    #[test]
    fn test_rolled_duplicates_may_fill_matching_slots() {
        let stats = GeneratedStats::new([12, 16, 12, 9, 14, 12]).unwrap();
        let candidate = StatAssignment::in_slot_order([12, 12, 16, 12, 9, 14]);
        assert!(assign(&stats, &candidate).is_ok());

        // Four twelves where only three were rolled
        let candidate = StatAssignment::in_slot_order([12, 12, 12, 12, 9, 14]);
        assert!(matches!(
            assign(&stats, &candidate),
            Err(AssignmentError::DuplicateAssignment { value: 12, .. })
        ));
    }

    #[test]
    fn test_missing_slot_named() {
        for ability in Ability::all() {
            let mut candidate = StatAssignment::new();
            for (slot, value) in Ability::all().into_iter().zip(standard().values()) {
                if slot != ability {
                    candidate.set(slot, value);
                }
            }

            let result = assign(&standard(), &candidate);
            assert_eq!(
                result,
                Err(AssignmentError::IncompleteAssignment {
                    missing: vec![ability]
                })
            );
        }
    }

    #[test]
    fn test_foreign_value_is_mismatch() {
        let candidate = StatAssignment::in_slot_order([15, 14, 13, 12, 10, 9]);
        let result = assign(&standard(), &candidate);

        assert_eq!(
            result,
            Err(AssignmentError::AssignmentMismatch {
                assigned: vec![15, 14, 13, 12, 10, 9],
                available: vec![15, 14, 13, 12, 10, 8],
            })
        );
    }

    #[test]
    fn test_roll_sorted_assignment_always_succeeds() {
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..100 {
            let stats = generate(StatMethod::Roll, &mut rng);
            let candidate = StatAssignment::in_slot_order(stats.sorted_desc());
            assert!(assign(&stats, &candidate).is_ok());
        }
    }

    #[test]
    fn test_assign_raw_rejects_malformed_expected() {
        let candidate = StatAssignment::in_slot_order([15, 14, 13, 12, 10, 8]);
        assert!(matches!(
            assign_raw("15,14,13", &candidate),
            Err(AssignmentError::MalformedStatData(StatDataError::WrongCount(3)))
        ));
        assert!(matches!(
            assign_raw("15,14,x,12,10,8", &candidate),
            Err(AssignmentError::MalformedStatData(_))
        ));
        assert!(assign_raw("8,10,12,13,14,15", &candidate).is_ok());
    }

    #[test]
    fn test_from_form_reads_assignment_fields() {
        let data = FormData::from_pairs([
            ("strength_assignment", "15"),
            ("dexterity_assignment", " 14 "),
            ("constitution_assignment", ""),
            ("wisdom_assignment", "10"),
        ]);
        let candidate = StatAssignment::from_form(&data).unwrap();

        assert_eq!(candidate.get(Ability::Strength), Some(15));
        assert_eq!(candidate.get(Ability::Dexterity), Some(14));
        assert_eq!(candidate.get(Ability::Constitution), None);
        assert_eq!(candidate.get(Ability::Intelligence), None);

        let result = assign(&standard(), &candidate);
        assert_eq!(
            result,
            Err(AssignmentError::IncompleteAssignment {
                missing: vec![
                    Ability::Constitution,
                    Ability::Intelligence,
                    Ability::Charisma
                ]
            })
        );
    }

    #[test]
    fn test_from_form_rejects_non_numeric() {
        let data = FormData::from_pairs([("charisma_assignment", "lots")]);
        assert_eq!(
            StatAssignment::from_form(&data),
            Err(AssignmentError::InvalidSlotValue {
                ability: Ability::Charisma,
                value: "lots".to_string(),
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AssignmentError::IncompleteAssignment {
            missing: vec![Ability::Wisdom, Ability::Charisma],
        };
        assert_eq!(err.to_string(), "Missing or empty stat values: wisdom, charisma");

        let err = AssignmentError::AssignmentMismatch {
            assigned: vec![15, 9],
            available: vec![15, 8],
        };
        assert_eq!(
            err.to_string(),
            "The assigned stats [15, 9] must exactly match the available stats [15, 8]"
        );
    }
}
