use crate::registry::competitives_of;
use crate::require_content;
use ifeval_core::text::count_words;
use ifeval_core::{
    ConfigError, Constraint, ConstraintEvaluation, Document, Evaluation, InstructionMode, RuleMeta,
};
use std::collections::BTreeSet;

const TAG: &str = "Document Length";

const TRAIN: &[&str] = &[
    "Your response must be shorter than the provided document.",
    "Write fewer words than the document above contains.",
    "Keep the answer shorter, in words, than the given text.",
    "Make your reply more concise than the original document.",
    "Use fewer words than the source document.",
];

const TEST: &str = "The word count of your response must be lower than that of the document you were given.";

/// Passes when the response has strictly fewer words than the document.
pub struct ShorterThanDocument {
    document: Document,
    limit: usize,
    meta: RuleMeta,
}

impl ShorterThanDocument {
    pub const KIND: &'static str = "ShorterThanDocument";

    pub fn new(document: impl Into<Document>, seed: Option<u64>) -> Result<Self, ConfigError> {
        let document = document.into();
        let limit = count_words(document.as_str());
        if limit == 0 {
            return Err(ConfigError::invalid_argument(
                "document",
                "must contain at least one word",
            ));
        }
        Ok(Self {
            document,
            limit,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Constraint for ShorterThanDocument {
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
        format!(
            "Rewrite your response using fewer than {} words.",
            self.limit
        )
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let observed = count_words(value);
        Evaluation::ready(ConstraintEvaluation::from_check(observed < self.limit, || {
            format!(
                "[{TAG}] Expected fewer than {} words (the document's length), found {observed}.",
                self.limit
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn compares_against_document_words() {
        let rule = ShorterThanDocument::new("one two three four\r\n", None).unwrap();
        assert_eq!(rule.document().as_str(), "one two three four");
        assert!(rule.evaluate("one two three").await.unwrap().passed);
        let out = rule.evaluate("a b c d").await.unwrap();
        assert_eq!(
            out.reason.as_deref(),
            Some("[Document Length] Expected fewer than 4 words (the document's length), found 4.")
        );
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(ShorterThanDocument::new("\n", None).is_err());
        assert_eq!(ShorterThanDocument::new("x", None).unwrap().group(), "Length");
    }
}
