use crate::constraint_api::{Constraint, Evaluation};
use crate::group::RuleMeta;
use crate::model::{ConstraintEvaluation, InstructionMode};
use crate::templating::render;
use std::collections::BTreeSet;
use tracing::info;

pub(crate) const NEGATION_FAILURE: &str =
    "[Negation Logic] Output satisfies the positive constraint and should instead fail it.";

const TRAIN_TEMPLATES: &[&str] = &[
    "Do the opposite of the following instruction: {instruction}",
    "Make sure your response does NOT satisfy this requirement: {instruction}",
    "Your answer must violate the following rule: {instruction}",
    "Ensure that the following rule is broken by your response: {instruction}",
    "The following constraint must not hold for your response: {instruction}",
];

const TEST_TEMPLATE: &str =
    "Write a response that deliberately fails to comply with this instruction: \"{instruction}\"";

const REWRITE_TEMPLATE: &str =
    "Rewrite your previous response so that it deliberately breaks the following rule: {instruction}";

/// Passes exactly when the inner constraint fails.
///
/// A passing negation returns no reason. The inner failure reason is kept as
/// context in an `info` log event (`inner_kind`, `inner_reason`).
pub struct Negation {
    inner: Box<dyn Constraint>,
    meta: RuleMeta,
}

impl Negation {
    pub const KIND: &'static str = "Negation";

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

impl Constraint for Negation {
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
        render(
            REWRITE_TEMPLATE,
            &self.inner.instructions(InstructionMode::Test),
        )
    }

    /// Only the inner kind itself. Rules that conflict with P can still be
    /// satisfied alongside not-P.
    fn competitives(&self) -> BTreeSet<String> {
        BTreeSet::from([self.inner.kind().to_string()])
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        Evaluation::deferred(async move {
            let inner = self.inner.evaluate(value).await?;
            if inner.passed {
                return Ok(ConstraintEvaluation::fail(NEGATION_FAILURE));
            }
            info!(
                inner_kind = self.inner.kind(),
                inner_reason = inner.reason.as_deref().unwrap_or(""),
                "negated constraint failed as required"
            );
            Ok(ConstraintEvaluation::pass())
        })
    }
}
