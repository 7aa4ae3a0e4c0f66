use crate::registry::competitives_of;
use crate::{fill, require_content, require_positive, Relation};
use ifeval_core::text::split_sentences;
use ifeval_core::{ConfigError, Constraint, ConstraintEvaluation, Evaluation, InstructionMode, RuleMeta};
use std::collections::BTreeSet;

const TAG: &str = "Sentence Count";

const TRAIN: &[&str] = &[
    "Your response should contain {relation} {n} sentences.",
    "Write {relation} {n} sentences.",
    "Answer in {relation} {n} sentences.",
    "Keep the reply to {relation} {n} sentences.",
    "Use {relation} {n} sentences in total.",
];

const TEST: &str = "Your entire response must consist of {relation} {n} sentences.";

pub struct SentenceCount {
    relation: Relation,
    n: usize,
    meta: RuleMeta,
}

impl SentenceCount {
    pub const KIND: &'static str = "SentenceCount";

    pub fn new(relation: Relation, n: usize, seed: Option<u64>) -> Result<Self, ConfigError> {
        Ok(Self {
            relation,
            n: require_positive("n", n)?,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }
}

impl Constraint for SentenceCount {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn group(&self) -> &str {
        self.meta.group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        fill(
            self.meta.choose(mode, TRAIN, TEST),
            &[("relation", self.relation.phrase()), ("n", &self.n.to_string())],
        )
    }

    fn rewrite_instructions(&self) -> String {
        format!(
            "Rewrite your response so that it has {} {} sentences.",
            self.relation, self.n
        )
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let observed = split_sentences(value).len();
        Evaluation::ready(ConstraintEvaluation::from_check(
            self.relation.holds(observed, self.n),
            || {
                format!(
                    "[{TAG}] Expected {} {} sentences, found {observed}.",
                    self.relation, self.n
                )
            },
        ))
    }
}
