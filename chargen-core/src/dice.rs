//! Dice rolling for ability score generation.
//!
//! Every roll takes the random source as a parameter so that generation can
//! be replayed from a seed.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard die types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
}

impl DieType {
    pub fn sides(&self) -> u8 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
        }
    }

    /// Roll a single die.
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R) -> u8 {
        rng.gen_range(1..=self.sides())
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Result of rolling several dice and keeping the highest few.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptRoll {
    /// All dice, in the order rolled.
    pub rolls: Vec<u8>,
    /// Kept dice, highest first.
    pub kept: Vec<u8>,
    pub total: u8,
}

impl fmt::Display for KeptRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} keep {:?} = {}", self.rolls, self.kept, self.total)
    }
}

/// Roll `count` dice of `die` and keep the `keep` highest.
///
/// `keep` is clamped to `count`.
pub fn roll_keep_highest<R: Rng>(
    rng: &mut R,
    count: usize,
    die: DieType,
    keep: usize,
) -> KeptRoll {
    let rolls: Vec<u8> = (0..count).map(|_| die.roll_with_rng(rng)).collect();

    let mut kept = rolls.clone();
    kept.sort_by(|a, b| b.cmp(a));
    kept.truncate(keep.min(count));

    let total = kept.iter().sum();
    KeptRoll { rolls, kept, total }
}

/// Roll 4d6 and drop the lowest die.
pub fn roll_4d6_drop_lowest<R: Rng>(rng: &mut R) -> KeptRoll {
    roll_keep_highest(rng, 4, DieType::D6, 3)
}
