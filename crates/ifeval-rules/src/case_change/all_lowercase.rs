use super::{offending, preview};
use crate::registry::competitives_of;
use crate::require_content;
use ifeval_core::{Constraint, ConstraintEvaluation, Evaluation, InstructionMode, RuleMeta};
use std::collections::BTreeSet;

const TAG: &str = "Lowercase";

const TRAIN: &[&str] = &[
    "Your entire response should be in English, using only lowercase letters.",
    "Write everything in lowercase; no uppercase letters are allowed.",
    "Respond in lowercase letters only.",
    "Use lowercase for the whole answer.",
    "Make sure every letter in your reply is lowercase.",
];

const TEST: &str = "Your entire response must be written in lowercase letters. No uppercase letters are allowed.";

/// Characters without case (digits, punctuation, CJK) are always accepted.
pub struct AllLowercase {
    meta: RuleMeta,
}

impl AllLowercase {
    pub const KIND: &'static str = "AllLowercase";

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            meta: RuleMeta::new(module_path!(), seed),
        }
    }
}

impl Constraint for AllLowercase {
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
        "Rewrite your response entirely in lowercase letters.".to_string()
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let bad = offending(value, char::is_uppercase);
        Evaluation::ready(ConstraintEvaluation::from_check(bad.is_empty(), || {
            format!(
                "[{TAG}] Expected only lowercase letters, found uppercase: {}",
                preview(&bad)
            )
        }))
    }
}
