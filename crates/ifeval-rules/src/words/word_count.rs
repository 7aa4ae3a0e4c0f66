use crate::registry::competitives_of;
use crate::{fill, require_content, require_positive, Relation};
use ifeval_core::text::count_words;
use ifeval_core::{ConfigError, Constraint, ConstraintEvaluation, Evaluation, InstructionMode, RuleMeta};
use std::collections::BTreeSet;

const TAG: &str = "Word Count";

const TRAIN: &[&str] = &[
    "Your response should contain {relation} {n} words.",
    "Answer with {relation} {n} words.",
    "Make sure the answer has {relation} {n} words in total.",
    "Use {relation} {n} words in your reply.",
    "The length of your response must be {relation} {n} words.",
];

const TEST: &str = "Respond using {relation} {n} words.";

pub struct WordCount {
    relation: Relation,
    n: usize,
    meta: RuleMeta,
}

impl WordCount {
    pub const KIND: &'static str = "WordCount";

    pub fn new(relation: Relation, n: usize, seed: Option<u64>) -> Result<Self, ConfigError> {
        Ok(Self {
            relation,
            n: require_positive("n", n)?,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }
}

impl Constraint for WordCount {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn group(&self) -> &str {
        self.meta.group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        let template = self.meta.choose(mode, TRAIN, TEST);
        fill(
            template,
            &[("relation", self.relation.phrase()), ("n", &self.n.to_string())],
        )
    }

    fn rewrite_instructions(&self) -> String {
        format!(
            "Rewrite your response so that it contains {} {} words.",
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
        let observed = count_words(value);
        Evaluation::ready(ConstraintEvaluation::from_check(
            self.relation.holds(observed, self.n),
            || {
                format!(
                    "[{TAG}] Expected {} {} words, found {observed}.",
                    self.relation, self.n
                )
            },
        ))
    }
}
