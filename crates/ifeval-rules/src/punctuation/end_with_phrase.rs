use crate::registry::competitives_of;
use crate::{fill, require_content};
use ifeval_core::{ConfigError, Constraint, ConstraintEvaluation, Evaluation, InstructionMode, RuleMeta};
use std::collections::BTreeSet;

const TAG: &str = "End With";

const TRAIN: &[&str] = &[
    "Finish your response with the exact phrase \"{phrase}\".",
    "End the answer with \"{phrase}\" and nothing after it.",
    "Your final words must be \"{phrase}\".",
    "Close your reply with this exact phrase: \"{phrase}\".",
    "Make \"{phrase}\" the very last thing in your response.",
];

const TEST: &str =
    "Finish your response with this exact phrase \"{phrase}\". No other words should follow this phrase.";

/// Trailing whitespace is ignored; the phrase itself is matched exactly.
pub struct EndWithPhrase {
    phrase: String,
    meta: RuleMeta,
}

impl EndWithPhrase {
    pub const KIND: &'static str = "EndWithPhrase";

    pub fn new(phrase: impl Into<String>, seed: Option<u64>) -> Result<Self, ConfigError> {
        let phrase = phrase.into().trim().to_string();
        if phrase.is_empty() {
            return Err(ConfigError::invalid_argument("phrase", "must not be empty"));
        }
        Ok(Self {
            phrase,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }
}

impl Constraint for EndWithPhrase {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn group(&self) -> &str {
        self.meta.group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        fill(self.meta.choose(mode, TRAIN, TEST), &[("phrase", &self.phrase)])
    }

    fn rewrite_instructions(&self) -> String {
        format!(
            "Rewrite your response so that it ends with the exact phrase \"{}\".",
            self.phrase
        )
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let trimmed = value.trim_end();
        Evaluation::ready(ConstraintEvaluation::from_check(
            trimmed.ends_with(&self.phrase),
            || {
                let tail: String = {
                    let chars: Vec<char> = trimmed.chars().collect();
                    let take = self.phrase.chars().count().min(chars.len());
                    chars[chars.len() - take..].iter().collect()
                };
                format!(
                    "[{TAG}] Expected the response to end with \"{}\", but it ends with \"{tail}\".",
                    self.phrase
                )
            },
        ))
    }
}
