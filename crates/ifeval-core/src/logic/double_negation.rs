use crate::constraint_api::{Constraint, Evaluation};
use crate::group::RuleMeta;
use crate::model::{ConstraintEvaluation, InstructionMode};
use crate::templating::render;
use std::collections::BTreeSet;

pub(crate) const DOUBLE_NEGATION_FAILURE: &str =
    "[Double Negation Logic] Output should satisfy the underlying constraint.";

const TRAIN_TEMPLATES: &[&str] = &[
    "It is not the case that you should avoid following this instruction: {instruction}",
    "Do not fail to satisfy the following requirement: {instruction}",
    "You must not ignore this rule: {instruction}",
    "Do not write a response that breaks this instruction: {instruction}",
    "It is unacceptable for your answer not to follow this: {instruction}",
];

const TEST_TEMPLATE: &str =
    "Make sure it is not true that your response disregards the following instruction: \"{instruction}\"";

/// Same verdict as the inner constraint, phrased through a double negative.
pub struct DoubleNegation {
    inner: Box<dyn Constraint>,
    meta: RuleMeta,
}

impl DoubleNegation {
    pub const KIND: &'static str = "DoubleNegation";

    pub fn new(inner: Box<dyn Constraint>, seed: Option<u64>) -> Self {
        Self {
            inner,
            meta: RuleMeta::new(module_path!(), seed),
        }
    }

    pub fn inner(&self) -> &dyn Constraint {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn Constraint> {
        self.inner
    }
}

impl Constraint for DoubleNegation {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn group(&self) -> &str {
        self.meta.group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        let template = self.meta.choose(mode, TRAIN_TEMPLATES, TEST_TEMPLATE);
        render(template, &self.inner.instructions(mode))
    }

    fn rewrite_instructions(&self) -> String {
        self.inner.rewrite_instructions()
    }

    fn competitives(&self) -> BTreeSet<String> {
        self.inner.competitives()
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        Evaluation::deferred(async move {
            let inner = self.inner.evaluate(value).await?;
            Ok(ConstraintEvaluation::from_check(inner.passed, || {
                DOUBLE_NEGATION_FAILURE.to_string()
            }))
        })
    }
}
