// src/ai/fence.rs
use crate::ai::AiError;
use serde::de::DeserializeOwned;

/// Strip one leading ```` ```json ```` / ```` ``` ```` marker and one trailing
/// ```` ``` ```` marker, trimming whitespace around and inside.
pub fn strip_code_fence(content: &str) -> &str {
    let mut s = content.trim();

    if let Some(rest) = s.strip_prefix("```") {
        // Language tag runs to the end of the opening line.
        s = match rest.find('\n') {
            Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
                &rest[idx + 1..]
            }
            _ => rest.strip_prefix("json").unwrap_or(rest),
        };
    }

    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }

    s.trim()
}

/// Normalize model output and parse it as JSON.
pub fn parse_fenced_json<T: DeserializeOwned>(content: &str) -> Result<T, AiError> {
    let body = strip_code_fence(content);
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        AiError::JsonParse(format!("{e} (content starts with {preview:?})"))
    })
}
