use crate::judge::Provider;
use serde_json::Value;
use tracing::info;

/// Auxiliary reasoning text from a provider response, if the response has a
/// shape this provider is known to use. Never fails.
pub(crate) fn extract_reasoning(provider: Provider, raw: &Value) -> Option<String> {
    let found = match provider {
        Provider::OpenAi => string_at(raw, "/choices/0/message/reasoning_content")
            .or_else(|| string_at(raw, "/choices/0/message/reasoning"))
            .or_else(|| raw.get("output").and_then(output_segments)),
        Provider::Local => raw.get("reasoning").and_then(|r| {
            r.as_str()
                .map(str::to_string)
                .or_else(|| segment_texts(r))
        }),
    };
    let found = found.filter(|text| !text.trim().is_empty());
    if found.is_none() {
        info!(provider = %provider, "judge response carries no recognizable reasoning");
    }
    found
}

fn string_at(raw: &Value, pointer: &str) -> Option<String> {
    raw.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `output: [{type: "reasoning", summary: [{text}]}, ...]`
fn output_segments(output: &Value) -> Option<String> {
    let parts: Vec<String> = output
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("reasoning"))
        .filter_map(|item| {
            item.get("summary")
                .and_then(segment_texts)
                .or_else(|| item.get("content").and_then(segment_texts))
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n"))
}

/// A list of strings or `{text}` objects, joined by newlines.
fn segment_texts(list: &Value) -> Option<String> {
    let parts: Vec<&str> = list
        .as_array()?
        .iter()
        .filter_map(|seg| seg.as_str().or_else(|| seg.get("text").and_then(Value::as_str)))
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n"))
}
