use crate::registry::competitives_of;
use crate::require_content;
use ifeval_core::{Constraint, ConstraintEvaluation, Evaluation, InstructionMode, RuleMeta};
use std::collections::BTreeSet;

const TAG: &str = "No Commas";

/// ASCII comma, fullwidth comma, ideographic comma.
const COMMAS: &[char] = &[',', '，', '、'];

const TRAIN: &[&str] = &[
    "Do not use any commas in your response.",
    "Avoid commas entirely.",
    "Your answer must not contain a single comma.",
    "Refrain from using commas anywhere in the reply.",
    "Write without commas.",
];

const TEST: &str = "In your entire response, refrain from the use of any commas.";

pub struct NoCommas {
    meta: RuleMeta,
}

impl NoCommas {
    pub const KIND: &'static str = "NoCommas";

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            meta: RuleMeta::new(module_path!(), seed),
        }
    }
}

impl Constraint for NoCommas {
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
        "Rewrite your response without any commas, restructuring sentences where needed.".to_string()
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let found = value.chars().filter(|c| COMMAS.contains(c)).count();
        Evaluation::ready(ConstraintEvaluation::from_check(found == 0, || {
            format!("[{TAG}] Expected no commas, found {found}.")
        }))
    }
}
