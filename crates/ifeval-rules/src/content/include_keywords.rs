use crate::registry::competitives_of;
use crate::{fill, require_content};
use ifeval_core::{ConfigError, Constraint, ConstraintEvaluation, Evaluation, InstructionMode, RuleMeta};
use std::collections::BTreeSet;

const TAG: &str = "Include Keywords";

const TRAIN: &[&str] = &[
    "Include the keywords {keywords} in the response.",
    "Make sure to use these words: {keywords}.",
    "Your answer must mention {keywords}.",
    "Work the following keywords into your reply: {keywords}.",
    "Be sure the response contains each of {keywords}.",
];

const TEST: &str = "Your response is required to contain every one of the following keywords: {keywords}.";

/// Keywords are matched case-insensitively as substrings.
pub struct IncludeKeywords {
    keywords: Vec<String>,
    meta: RuleMeta,
}

impl IncludeKeywords {
    pub const KIND: &'static str = "IncludeKeywords";

    pub fn new<I, S>(keywords: I, seed: Option<u64>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.into().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(ConfigError::invalid_argument(
                "keywords",
                "at least one non-blank keyword is required",
            ));
        }
        Ok(Self {
            keywords,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }

    fn listed(&self) -> String {
        self.keywords
            .iter()
            .map(|k| format!("\"{k}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Constraint for IncludeKeywords {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn group(&self) -> &str {
        self.meta.group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        fill(
            self.meta.choose(mode, TRAIN, TEST),
            &[("keywords", &self.listed())],
        )
    }

    fn rewrite_instructions(&self) -> String {
        format!(
            "Rewrite your response so that it includes every one of these keywords: {}.",
            self.listed()
        )
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let haystack = value.to_lowercase();
        let missing: Vec<&str> = self
            .keywords
            .iter()
            .filter(|k| !haystack.contains(&k.to_lowercase()))
            .map(String::as_str)
            .collect();
        Evaluation::ready(ConstraintEvaluation::from_check(missing.is_empty(), || {
            format!(
                "[{TAG}] Expected all of {}; missing: {}.",
                self.listed(),
                missing.join(", ")
            )
        }))
    }
}
