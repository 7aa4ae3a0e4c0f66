use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison used by counting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    AtLeast,
    AtMost,
    Exactly,
}

impl Relation {
    pub fn holds(self, observed: usize, target: usize) -> bool {
        match self {
            Self::AtLeast => observed >= target,
            Self::AtMost => observed <= target,
            Self::Exactly => observed == target,
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            Self::AtLeast => "at least",
            Self::AtMost => "at most",
            Self::Exactly => "exactly",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}
