use super::from_verdict;
use crate::registry::competitives_of;
use crate::{fill, require_content};
use ifeval_core::{
    ConfigError, Constraint, Evaluation, InstructionMode, JudgeBackend, RuleMeta,
};
use std::collections::BTreeSet;
use std::sync::Arc;

const TAG: &str = "Tone";

const TRAIN: &[&str] = &[
    "Write your response in a {tone} tone.",
    "Adopt a {tone} tone throughout the answer.",
    "Keep the reply {tone} in tone.",
    "Your answer should sound {tone}.",
    "Make sure the tone of the response is {tone}.",
];

const TEST: &str = "The overall tone of your response must be clearly {tone} from start to finish.";

pub struct Tone {
    tone: String,
    judge: Arc<JudgeBackend>,
    meta: RuleMeta,
}

impl Tone {
    pub const KIND: &'static str = "Tone";

    pub fn new(
        tone: impl Into<String>,
        judge: Arc<JudgeBackend>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let tone = tone.into().trim().to_string();
        if tone.is_empty() {
            return Err(ConfigError::invalid_argument("tone", "must not be empty"));
        }
        Ok(Self {
            tone,
            judge,
            meta: RuleMeta::new(module_path!(), seed),
        })
    }

    fn question(&self) -> String {
        format!(
            "Is the tone of the assistant output consistently {}? Answer True only if the whole output reads as {}.",
            self.tone, self.tone
        )
    }
}

impl Constraint for Tone {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn group(&self) -> &str {
        self.meta.group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        fill(self.meta.choose(mode, TRAIN, TEST), &[("tone", &self.tone)])
    }

    fn rewrite_instructions(&self) -> String {
        format!("Rewrite your response so that its tone is {}.", self.tone)
    }

    fn competitives(&self) -> BTreeSet<String> {
        competitives_of(Self::KIND)
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        if let Some(empty) = require_content(TAG, value) {
            return Evaluation::ready(empty);
        }
        Evaluation::deferred(async move {
            let verdict = self.judge.judge(&self.question(), value).await?;
            let expected = format!("a {} tone", self.tone);
            Ok(from_verdict(TAG, &expected, &verdict))
        })
    }
}
