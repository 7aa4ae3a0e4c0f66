use crate::errors::JudgeError;
use crate::judge::{JudgeReply, JudgeVerdict, Provider};
use tracing::{info, warn};

/// Interpret an oracle answer as a boolean.
///
/// The trimmed text must start with `true` or `false` (any case). Anything
/// else breaks the backend contract and is an error, never a silent `false`.
pub fn parse_verdict(text: &str) -> Result<bool, JudgeError> {
    let trimmed = text.trim_start();
    let starts_with = |word: &str| {
        trimmed
            .get(..word.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(word))
    };
    if starts_with("true") {
        Ok(true)
    } else if starts_with("false") {
        Ok(false)
    } else {
        Err(JudgeError::VerdictParse {
            reply: text.to_string(),
        })
    }
}

pub(crate) fn interpret(provider: Provider, reply: JudgeReply) -> Result<JudgeVerdict, JudgeError> {
    let passed = match parse_verdict(&reply.verdict_text) {
        Ok(passed) => passed,
        Err(e) => {
            warn!(provider = %provider, reply = %reply.verdict_text, "unparseable judge verdict");
            return Err(e);
        }
    };
    if !passed {
        info!(provider = %provider, reply = %reply.verdict_text, "judge returned a negative verdict");
    }
    let reasoning = super::reasoning::extract_reasoning(provider, &reply.raw_detail);
    Ok(JudgeVerdict {
        passed,
        reasoning,
        reply: reply.verdict_text,
    })
}
