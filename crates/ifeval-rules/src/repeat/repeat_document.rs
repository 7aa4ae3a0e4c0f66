use crate::registry::competitives_of;
use crate::require_content;
use ifeval_core::{
    ConfigError, Constraint, ConstraintEvaluation, Document, Evaluation, InstructionMode, RuleMeta,
};
use std::collections::BTreeSet;

const TAG: &str = "Repeat Document";

pub(crate) const TRAIN: &[&str] = &[
    "First repeat the document word for word without change, then give your answer.",
    "Begin by copying the document exactly as it is, and only then respond.",
    "Start your reply with the full document, unchanged, before anything else.",
    "Reproduce the document verbatim at the top of your response, then continue.",
    "Your response must open with an exact copy of the document.",
];

pub(crate) const TEST: &str =
    "Before you do anything else, restate the entire document exactly as written; do not alter a single character, then carry on with your reply.";

/// Passes when the response begins with the document verbatim.
pub struct RepeatDocument {
    document: Document,
    meta: RuleMeta,
}

impl RepeatDocument {
    pub const KIND: &'static str = "RepeatDocument";

    pub fn new(document: impl Into<Document>, seed: Option<u64>) -> Result<Self, ConfigError> {
        let document = document.into();
        if document.as_str().trim().is_empty() {
            return Err(ConfigError::invalid_argument("document", "must not be empty"));
        }
        Ok(Self {
            document,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }
}

/// Char offset of the first mismatch, or `None` when `expected` is a prefix.
fn first_mismatch(expected: &str, actual: &str) -> Option<usize> {
    let mut actual = actual.chars();
    for (i, want) in expected.chars().enumerate() {
        if actual.next() != Some(want) {
            return Some(i);
        }
    }
    None
}

impl Constraint for RepeatDocument {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn group(&self) -> &str {
        self.meta.group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        self.meta.choose(mode, TRAIN, TEST).to_string()
    }

    fn rewrite_instructions(&self) -> String {
        "Rewrite your response so that it starts with the document copied exactly, character for character.".to_string()
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let mismatch = first_mismatch(self.document.as_str(), value.trim_start());
        Evaluation::ready(ConstraintEvaluation::from_check(mismatch.is_none(), || {
            format!(
                "[{TAG}] Expected the response to start with the document verbatim; first difference at character {}.",
                mismatch.unwrap_or_default()
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn response_must_open_with_document() {
        let rule = RepeatDocument::new("The quick fox.\n", None).unwrap();
        assert!(rule
            .evaluate("\nThe quick fox.\nIt is quick.")
            .await
            .unwrap()
            .passed);

        let out = rule.evaluate("The quick dog.").await.unwrap();
        assert_eq!(
            out.reason.as_deref(),
            Some("[Repeat Document] Expected the response to start with the document verbatim; first difference at character 10.")
        );
    }

    #[test]
    fn mismatch_positions() {
        assert_eq!(first_mismatch("abc", "abcdef"), None);
        assert_eq!(first_mismatch("abc", "ab"), Some(2));
        assert_eq!(first_mismatch("abc", "xbc"), Some(0));
    }

    #[test]
    fn test_wording_is_not_a_train_template() {
        let rule = RepeatDocument::new("doc", Some(11)).unwrap();
        let test = rule.instructions(InstructionMode::Test);
        assert!(!TRAIN.contains(&test.as_str()));
        for _ in 0..20 {
            let train = rule.instructions(InstructionMode::Train);
            assert!(TRAIN.contains(&train.as_str()));
            assert_ne!(train, test);
        }
    }
}
