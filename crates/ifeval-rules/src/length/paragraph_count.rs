use crate::registry::competitives_of;
use crate::{fill, require_content, require_positive};
use ifeval_core::text::split_paragraphs;
use ifeval_core::{ConfigError, Constraint, ConstraintEvaluation, Evaluation, InstructionMode, RuleMeta};
use std::collections::BTreeSet;

const TAG: &str = "Paragraph Count";

const TRAIN: &[&str] = &[
    "There should be exactly {n} paragraphs, separated by the markdown divider ***.",
    "Write {n} paragraphs and put *** between them.",
    "Organize your answer into {n} paragraphs divided by ***.",
    "Your reply must have {n} paragraphs; use *** on its own line to separate them.",
    "Split the response into exactly {n} paragraphs using *** as the separator.",
];

const TEST: &str =
    "Your response must contain exactly {n} paragraphs. Separate paragraphs with the markdown divider: ***";

/// Blank lines also separate paragraphs.
pub struct ParagraphCount {
    n: usize,
    meta: RuleMeta,
}

impl ParagraphCount {
    pub const KIND: &'static str = "ParagraphCount";

    pub fn new(n: usize, seed: Option<u64>) -> Result<Self, ConfigError> {
        Ok(Self {
            n: require_positive("n", n)?,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }
}

impl Constraint for ParagraphCount {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn group(&self) -> &str {
        self.meta.group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        fill(self.meta.choose(mode, TRAIN, TEST), &[("n", &self.n.to_string())])
    }

    fn rewrite_instructions(&self) -> String {
        format!(
            "Rewrite your response as exactly {} paragraphs separated by ***.",
            self.n
        )
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        let observed = split_paragraphs(value).len();
        Evaluation::ready(ConstraintEvaluation::from_check(observed == self.n, || {
            format!(
                "[{TAG}] Expected exactly {} paragraphs, found {observed}.",
                self.n
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dividers_and_blank_lines_split() {
        let rule = ParagraphCount::new(3, None).unwrap();
        let text = "One here.\n***\nTwo here.\n\nThree here.";
        assert!(rule.evaluate(text).await.unwrap().passed);

        let out = rule.evaluate("Just one.").await.unwrap();
        assert_eq!(
            out.reason.as_deref(),
            Some("[Paragraph Count] Expected exactly 3 paragraphs, found 1.")
        );
    }

    #[test]
    fn non_positive_count_is_config_error() {
        let err = ParagraphCount::new(0, None).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidArgument { .. }));
    }
}
