use super::{offending, preview};
use crate::registry::competitives_of;
use crate::require_content;
use ifeval_core::{Constraint, ConstraintEvaluation, Evaluation, InstructionMode, RuleMeta};
use std::collections::BTreeSet;

const TAG: &str = "Uppercase";

const TRAIN: &[&str] = &[
    "Your entire response should be in English, using only capital letters.",
    "Write everything in uppercase; no lowercase letters are allowed.",
    "Respond in uppercase letters only.",
    "Use uppercase for the whole answer.",
    "Make sure every letter in your reply is uppercase.",
];

const TEST: &str = "Your entire response must be written in uppercase letters. No lowercase letters are allowed.";

/// Characters without case (digits, punctuation, CJK) are always accepted.
pub struct AllUppercase {
    meta: RuleMeta,
}

impl AllUppercase {
    pub const KIND: &'static str = "AllUppercase";

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            meta: RuleMeta::new(module_path!(), seed),
        }
    }
}

impl Constraint for AllUppercase {
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
        "Rewrite your response entirely in uppercase letters.".to_string()
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let bad = offending(value, char::is_lowercase);
        Evaluation::ready(ConstraintEvaluation::from_check(bad.is_empty(), || {
            format!(
                "[{TAG}] Expected only uppercase letters, found lowercase: {}",
                preview(&bad)
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn flags_lowercase_letters() {
        let rule = AllUppercase::new(None);
        assert!(rule.evaluate("I PREFER CAPITALS 123!").await.unwrap().passed);
        let out = rule.evaluate("HELLO world").await.unwrap();
        assert_eq!(
            out.reason.as_deref(),
            Some("[Uppercase] Expected only uppercase letters, found lowercase: world")
        );
    }

    #[test]
    fn train_and_test_wording_differ() {
        let rule = AllUppercase::new(Some(2));
        let test = rule.instructions(InstructionMode::Test);
        for _ in 0..10 {
            assert_ne!(rule.instructions(InstructionMode::Train), test);
        }
    }
}
