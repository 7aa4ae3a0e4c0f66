use super::from_verdict;
use crate::registry::competitives_of;
use crate::require_content;
use ifeval_core::{
    ConfigError, Constraint, ConstraintEvaluation, Document, Evaluation, InstructionMode,
    JudgeBackend, RuleMeta,
};
use std::collections::BTreeSet;
use std::sync::Arc;

const TAG: &str = "Paraphrase";

const TRAIN: &[&str] = &[
    "Paraphrase the document in your own words.",
    "Restate the document without copying its sentences.",
    "Rewrite the document using different wording but the same meaning.",
    "Express the content of the document in new words.",
    "Give a paraphrase of the document that keeps every key point.",
];

const TEST: &str =
    "Convey the meaning of the document you were given using wording of your own, keeping its content intact.";

/// A verbatim copy fails without consulting the judge.
pub struct Paraphrase {
    document: Document,
    judge: Arc<JudgeBackend>,
    meta: RuleMeta,
}

impl Paraphrase {
    pub const KIND: &'static str = "Paraphrase";

    pub fn new(
        document: impl Into<Document>,
        judge: Arc<JudgeBackend>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let document = document.into();
        if document.as_str().trim().is_empty() {
            return Err(ConfigError::invalid_argument("document", "must not be empty"));
        }
        Ok(Self {
            document,
            judge,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }

    fn question(&self) -> String {
        format!(
            "Is the assistant output a faithful paraphrase of the document below, preserving its meaning \
             while using substantially different wording?\n\n<document>\n{}\n</document>",
            self.document.as_str()
        )
    }
}

fn normalized(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

impl Constraint for Paraphrase {
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
        "Rewrite your response so that it paraphrases the document instead of copying it.".to_string()
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        if normalized(value) == normalized(self.document.as_str()) {
            return Evaluation::ready(ConstraintEvaluation::fail(format!(
                "[{TAG}] Expected a paraphrase, found a verbatim copy of the document."
            )));
        }
        Evaluation::deferred(async move {
            let verdict = self.judge.judge(&self.question(), value).await?;
            Ok(from_verdict(TAG, "a faithful paraphrase of the document", &verdict))
        })
    }
}
