//! Rules answered by the judge backend instead of a mechanical check.

mod paraphrase;
mod tone;

pub use paraphrase::Paraphrase;
pub use tone::Tone;

use ifeval_core::{ConstraintEvaluation, JudgeVerdict};

/// Map a judge verdict onto an evaluation, quoting the reply on failure.
fn from_verdict(tag: &str, expected: &str, verdict: &JudgeVerdict) -> ConstraintEvaluation {
    ConstraintEvaluation::from_check(verdict.passed, || {
        let detail = verdict
            .reasoning
            .as_deref()
            .unwrap_or(verdict.reply.as_str())
            .trim();
        format!("[{tag}] Expected {expected}; judge replied: {detail}")
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use ifeval_core::providers::llm::fake::ScriptedClient;
    use ifeval_core::providers::llm::ChatReply;
    use ifeval_core::{JudgeBackend, JudgeConfig};
    use std::sync::Arc;

    /// Judge that answers `True` when the response contains `needle`.
    pub fn judge_containing(needle: &'static str) -> Arc<JudgeBackend> {
        let client = ScriptedClient::new(move |request| {
            let prompt = request.prompt();
            let start = prompt.find("<assistant_output>").unwrap_or(0);
            let end = prompt.find("</assistant_output>").unwrap_or(prompt.len());
            let answer = if prompt[start..end].contains(needle) {
                "True: it does"
            } else {
                "False: it does not"
            };
            Ok(ChatReply {
                text: answer.to_string(),
                raw: serde_json::json!({}),
            })
        });
        Arc::new(JudgeBackend::with_client(JudgeConfig::default(), Arc::new(client)).unwrap())
    }
}
