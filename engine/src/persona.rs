//! Persona traits used to flavor generation prompts

use rand::seq::SliceRandom;
use std::fmt;

/// Persona adjective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trait {
    Witty,
    Sharp,
    Helpful,
    Curious,
}

impl Trait {
    /// Every trait, in declaration order
    pub const ALL: [Trait; 4] = [Trait::Witty, Trait::Sharp, Trait::Helpful, Trait::Curious];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trait::Witty => "witty",
            Trait::Sharp => "sharp",
            Trait::Helpful => "helpful",
            Trait::Curious => "curious",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of the per-turn persona trait
pub trait TraitSource: Send + Sync {
    fn pick(&self) -> Trait;
}

/// Uniformly random trait per call
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTraits;

impl TraitSource for RandomTraits {
    fn pick(&self) -> Trait {
        let mut rng = rand::thread_rng();
        Trait::ALL.choose(&mut rng).copied().unwrap_or(Trait::Helpful)
    }
}

/// Always the same trait
#[derive(Debug, Clone, Copy)]
pub struct FixedTrait(pub Trait);

impl TraitSource for FixedTrait {
    fn pick(&self) -> Trait {
        self.0
    }
}
