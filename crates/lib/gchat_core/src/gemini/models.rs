//! Gemini `generateContent` wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON pointer to the first candidate's first text part.
pub const RESPONSE_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Request body for `models/*:generateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// A single content part. An absent prompt is sent as a part without `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GenerateContentRequest {
    /// Wraps a prompt as `{ contents: [{ parts: [{ text }] }] }`.
    pub fn from_prompt(prompt: Option<&str>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.map(str::to_owned),
                }],
            }],
        }
    }
}

/// Extracts `candidates[0].content.parts[0].text` from an upstream reply.
///
/// Returns `None` when any step of the path is missing or the leaf is not a
/// string.
pub fn extract_text(payload: &Value) -> Option<&str> {
    payload.pointer(RESPONSE_TEXT_POINTER)?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_wraps_prompt() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt(Some("Hello"))).unwrap();
        assert_eq!(body, json!({ "contents": [{ "parts": [{ "text": "Hello" }] }] }));
    }

    #[test]
    fn absent_prompt_omits_text() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt(None)).unwrap();
        assert_eq!(body, json!({ "contents": [{ "parts": [{}] }] }));
    }

    #[test]
    fn empty_prompt_is_still_sent() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt(Some(""))).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "");
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let payload = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hi there!" }, { "text": "ignored" }] } },
                { "content": { "parts": [{ "text": "second candidate" }] } }
            ]
        });
        assert_eq!(extract_text(&payload), Some("Hi there!"));
    }

    #[test]
    fn extract_text_missing_path() {
        assert_eq!(extract_text(&json!({})), None);
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        assert_eq!(extract_text(&json!({ "candidates": [{ "content": { "parts": [] } }] })), None);
    }

    #[test]
    fn extract_text_non_string_leaf() {
        let payload = json!({ "candidates": [{ "content": { "parts": [{ "text": 42 }] } }] });
        assert_eq!(extract_text(&payload), None);
    }
}
