use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of judging one response against one constraint.
///
/// `reason` is set whenever `passed` is false. A passing result carries no
/// reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintEvaluation {
    pub passed: bool,
    pub reason: Option<String>,
}

impl ConstraintEvaluation {
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    /// Failing result. `reason` should start with the rule's bracketed family tag.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: Some(reason.into()),
        }
    }

    pub fn from_check(passed: bool, reason: impl FnOnce() -> String) -> Self {
        if passed {
            Self::pass()
        } else {
            Self::fail(reason())
        }
    }
}

/// Instruction generation regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionMode {
    /// Seeded random choice among paraphrase candidates.
    Train,
    /// One fixed canonical phrasing.
    #[default]
    Test,
}

impl InstructionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
        }
    }
}

impl FromStr for InstructionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "train" => Ok(Self::Train),
            "test" => Ok(Self::Test),
            _ => Err(ConfigError::InvalidMode { mode: s.to_string() }),
        }
    }
}

impl fmt::Display for InstructionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free text handed to content, length and paraphrase rules at construction.
///
/// Trailing line endings are stripped once; the text is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        let keep = text.trim_end_matches(['\r', '\n']).len();
        text.truncate(keep);
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl Serialize for Document {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("train".parse::<InstructionMode>(), Ok(InstructionMode::Train));
        assert_eq!(" TEST ".parse::<InstructionMode>(), Ok(InstructionMode::Test));
    }

    #[test]
    fn unknown_mode_is_config_error() {
        let err = "eval".parse::<InstructionMode>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidMode {
                mode: "eval".into()
            }
        );
    }

    #[test]
    fn document_strips_trailing_line_endings_only() {
        let doc = Document::new("  first line\r\nsecond line\n\n\r\n");
        assert_eq!(doc.as_str(), "  first line\r\nsecond line");

        let doc = Document::new("no newline ");
        assert_eq!(doc.as_str(), "no newline ");
    }

    #[test]
    fn from_check_only_builds_reason_on_failure() {
        let ok = ConstraintEvaluation::from_check(true, || unreachable!());
        assert_eq!(ok, ConstraintEvaluation::pass());

        let bad = ConstraintEvaluation::from_check(false, || "[Tag] nope".to_string());
        assert!(!bad.passed);
        assert_eq!(bad.reason.as_deref(), Some("[Tag] nope"));
    }
}
