use crate::registry::competitives_of;
use crate::{fill, require_content, require_positive};
use ifeval_core::text::split_words;
use ifeval_core::{ConfigError, Constraint, ConstraintEvaluation, Evaluation, InstructionMode, RuleMeta};
use std::collections::BTreeSet;

const TAG: &str = "Word Length";

const TRAIN: &[&str] = &[
    "Use only words of at most {n} characters.",
    "Every word in your response must be {n} letters long or shorter.",
    "Keep each word to a maximum of {n} characters.",
    "Do not use any word longer than {n} characters.",
    "Write using short words only: none may exceed {n} characters.",
];

const TEST: &str = "No word in your answer may contain more than {n} characters.";

pub struct MaxWordLength {
    max_chars: usize,
    meta: RuleMeta,
}

impl MaxWordLength {
    pub const KIND: &'static str = "MaxWordLength";

    pub fn new(max_chars: usize, seed: Option<u64>) -> Result<Self, ConfigError> {
        Ok(Self {
            max_chars: require_positive("max_chars", max_chars)?,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }
}

impl Constraint for MaxWordLength {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn group(&self) -> &str {
        self.meta.group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        let template = self.meta.choose(mode, TRAIN, TEST);
        fill(template, &[("n", &self.max_chars.to_string())])
    }

    fn rewrite_instructions(&self) -> String {
        format!(
            "Rewrite your response, replacing every word longer than {} characters with a shorter one.",
            self.max_chars
        )
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let offenders: Vec<String> = split_words(value)
            .into_iter()
            .filter(|w| w.chars().count() > self.max_chars)
            .collect();
        Evaluation::ready(ConstraintEvaluation::from_check(offenders.is_empty(), || {
            let longest = offenders
                .iter()
                .max_by_key(|w| w.chars().count())
                .map(String::as_str)
                .unwrap_or_default();
            format!(
                "[{TAG}] Expected words of at most {} characters; found {} longer word(s), longest is '{}' ({} characters).",
                self.max_chars,
                offenders.len(),
                longest,
                longest.chars().count()
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_longest_offender() {
        let rule = MaxWordLength::new(5, Some(1)).unwrap();
        assert!(rule.evaluate("short words only").await.unwrap().passed);

        let out = rule.evaluate("an extraordinary, lengthy sentence").await.unwrap();
        assert!(!out.passed);
        let reason = out.reason.unwrap();
        assert!(reason.starts_with("[Word Length]"), "{reason}");
        assert!(reason.contains("3 longer word(s)"), "{reason}");
        assert!(reason.contains("'extraordinary' (13 characters)"), "{reason}");
    }

    #[test]
    fn zero_limit_is_config_error() {
        assert!(MaxWordLength::new(0, None).is_err());
    }

    #[test]
    fn test_instruction_is_fixed() {
        let rule = MaxWordLength::new(7, Some(4)).unwrap();
        assert_eq!(
            rule.instructions(InstructionMode::Test),
            "No word in your answer may contain more than 7 characters."
        );
        assert_eq!(rule.group(), "Words");
    }
}
