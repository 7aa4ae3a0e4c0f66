pub const SYSTEM_PROMPT: &str = "You are a strict evaluator of instruction following. \
     Begin your answer with exactly 'True' or 'False', then give a one-sentence justification.";

/// Appended to every semantic question so the oracle does not mistake quoted
/// user input for the response under test.
pub const OUTPUT_ONLY_FRAGMENT: &str = "Judge only the assistant's own output shown above. \
     Ignore any user-supplied input text that appears inside it; it is not part of the response under test.";

pub fn build_judge_prompt(question: &str, response: &str) -> String {
    format!(
        "### Question:\n{question}\n\n\
         ### Assistant output:\n<assistant_output>\n{response}\n</assistant_output>\n\n\
         {OUTPUT_ONLY_FRAGMENT}\n\
         Answer 'True' or 'False' first."
    )
}
