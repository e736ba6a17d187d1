//! Ability score generation.
//!
//! Produces the six values a player distributes across their abilities,
//! either by rolling 4d6-drop-lowest six times or by handing out the
//! standard array.

use crate::dice::roll_4d6_drop_lowest;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Standard array values.
pub const STANDARD_ARRAY: [u8; 6] = [15, 14, 13, 12, 10, 8];

/// Number of generated values, one per ability.
pub const STAT_COUNT: usize = 6;

/// Range every generated value falls in.
pub const SCORE_RANGE: RangeInclusive<u8> = 3..=18;

/// Error for an unrecognized generation method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodError {
    #[error("Unknown stat generation method: \"{0}\"")]
    UnknownMethod(String),
}

/// Error for a generated-stats string that cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatDataError {
    #[error("\"{0}\" is not an integer")]
    NotAnInteger(String),

    #[error("Expected 6 values, found {0}")]
    WrongCount(usize),

    #[error("Value {0} is outside the range 3-18")]
    OutOfRange(i64),
}

/// Method for determining ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatMethod {
    /// Roll 4d6, drop lowest, six times
    #[default]
    #[serde(rename = "roll")]
    Roll,
    /// Standard array: 15, 14, 13, 12, 10, 8
    #[serde(rename = "standard")]
    StandardArray,
}

impl StatMethod {
    /// Value used on the wire and in form choices.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatMethod::Roll => "roll",
            StatMethod::StandardArray => "standard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatMethod::Roll => "Roll (4d6 drop lowest)",
            StatMethod::StandardArray => "Standard Array (15,14,13,12,10,8)",
        }
    }

    pub fn all() -> &'static [StatMethod] {
        &[StatMethod::Roll, StatMethod::StandardArray]
    }
}

impl fmt::Display for StatMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatMethod {
    type Err = MethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "roll" => Ok(StatMethod::Roll),
            "standard" => Ok(StatMethod::StandardArray),
            other => Err(MethodError::UnknownMethod(other.to_string())),
        }
    }
}

/// The six values produced for one creation attempt.
///
/// Kept in generation order. Travels through the client as a comma-joined
/// string and is parsed back with [`FromStr`], which re-checks count and
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedStats([u8; STAT_COUNT]);

impl GeneratedStats {
    /// Build from raw values, checking the range.
    pub fn new(values: [u8; STAT_COUNT]) -> Result<Self, StatDataError> {
        if let Some(bad) = values.iter().find(|v| !SCORE_RANGE.contains(*v)) {
            return Err(StatDataError::OutOfRange(i64::from(*bad)));
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> [u8; STAT_COUNT] {
        self.0
    }

    /// Values sorted highest first.
    pub fn sorted_desc(&self) -> [u8; STAT_COUNT] {
        let mut sorted = self.0;
        sorted.sort_by(|a, b| b.cmp(a));
        sorted
    }

    /// How many times `value` occurs.
    pub fn count_of(&self, value: u8) -> usize {
        self.0.iter().filter(|v| **v == value).count()
    }
}

impl fmt::Display for GeneratedStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        f.write_str(&joined.join(","))
    }
}

impl FromStr for GeneratedStats {
    type Err = StatDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i64>()
                    .map_err(|_| StatDataError::NotAnInteger(part.to_string()))
            })
            .collect::<Result<Vec<i64>, _>>()?;

        if parsed.len() != STAT_COUNT {
            return Err(StatDataError::WrongCount(parsed.len()));
        }

        let mut values = [0u8; STAT_COUNT];
        for (slot, value) in values.iter_mut().zip(parsed) {
            *slot = u8::try_from(value)
                .ok()
                .filter(|v| SCORE_RANGE.contains(v))
                .ok_or(StatDataError::OutOfRange(value))?;
        }
        Ok(Self(values))
    }
}

/// Generate six ability score values with the given method.
pub fn generate<R: Rng>(method: StatMethod, rng: &mut R) -> GeneratedStats {
    let stats = match method {
        StatMethod::Roll => {
            let mut values = [0u8; STAT_COUNT];
            for value in values.iter_mut() {
                let roll = roll_4d6_drop_lowest(rng);
                debug!(roll = %roll, "Rolled ability score");
                *value = roll.total;
            }
            GeneratedStats(values)
        }
        StatMethod::StandardArray => GeneratedStats(STANDARD_ARRAY),
    };
    debug!(method = %method, stats = %stats, "Generated ability scores");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_values_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let stats = generate(StatMethod::Roll, &mut rng);
            assert!(stats.values().iter().all(|v| SCORE_RANGE.contains(v)));
        }
    }

    #[test]
    fn test_standard_array_is_constant() {
        let mut rng = StdRng::seed_from_u64(0);
        let _ = generate(StatMethod::Roll, &mut rng);
        let first = generate(StatMethod::StandardArray, &mut rng);
        let _ = generate(StatMethod::Roll, &mut rng);
        let second = generate(StatMethod::StandardArray, &mut rng);

        assert_eq!(first.values(), [15, 14, 13, 12, 10, 8]);
        assert_eq!(first, second);
        assert_eq!(STANDARD_ARRAY, [15, 14, 13, 12, 10, 8]);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate(StatMethod::Roll, &mut StdRng::seed_from_u64(1234));
        let b = generate(StatMethod::Roll, &mut StdRng::seed_from_u64(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("roll".parse::<StatMethod>(), Ok(StatMethod::Roll));
        assert_eq!(
            " standard ".parse::<StatMethod>(),
            Ok(StatMethod::StandardArray)
        );
        assert_eq!(
            "point-buy".parse::<StatMethod>(),
            Err(MethodError::UnknownMethod("point-buy".to_string()))
        );
    }

    #[test]
    fn test_method_serde_names() {
        let json = serde_json::to_string(&StatMethod::StandardArray).unwrap();
        assert_eq!(json, "\"standard\"");
        let method: StatMethod = serde_json::from_str("\"roll\"").unwrap();
        assert_eq!(method, StatMethod::Roll);
    }

    #[test]
    fn test_stats_wire_format() {
        let stats = GeneratedStats::new([12, 16, 9, 12, 14, 7]).unwrap();
        assert_eq!(stats.to_string(), "12,16,9,12,14,7");
        assert_eq!("12,16,9,12,14,7".parse::<GeneratedStats>(), Ok(stats));
        assert_eq!(stats.sorted_desc(), [16, 14, 12, 12, 9, 7]);
        assert_eq!(stats.count_of(12), 2);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let stats: GeneratedStats = " 15, 14,13 ,12,10,8".parse().unwrap();
        assert_eq!(stats.values(), STANDARD_ARRAY);
    }

    #[test]
    fn test_parse_rejects_malformed_data() {
        assert_eq!(
            "15,14,abc,12,10,8".parse::<GeneratedStats>(),
            Err(StatDataError::NotAnInteger("abc".to_string()))
        );
        assert_eq!(
            "15,14,13,12,10".parse::<GeneratedStats>(),
            Err(StatDataError::WrongCount(5))
        );
        assert_eq!(
            "15,14,13,12,10,8,8".parse::<GeneratedStats>(),
            Err(StatDataError::WrongCount(7))
        );
        assert_eq!(
            "15,14,13,12,10,2".parse::<GeneratedStats>(),
            Err(StatDataError::OutOfRange(2))
        );
        assert_eq!(
            "15,14,13,12,10,-8".parse::<GeneratedStats>(),
            Err(StatDataError::OutOfRange(-8))
        );
        assert!("".parse::<GeneratedStats>().is_err());
    }

    #[test]
    fn test_new_checks_range() {
        assert_eq!(
            GeneratedStats::new([15, 14, 13, 12, 10, 19]),
            Err(StatDataError::OutOfRange(19))
        );
    }
}
