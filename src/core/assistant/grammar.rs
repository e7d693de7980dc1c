//! Grammar checking via the OpenAI chat completions API

use serde_json::{json, Value};

use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::GrammarCheckResponse;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const GRAMMAR_MODEL: &str = "gpt-4o-mini";
const GRAMMAR_PROMPT: &str = "You are a grammar checker. Correct the grammar, spelling and \
punctuation of the user's text. Keep the original tone and language. Reply with the corrected \
text only, no explanations.";

pub async fn check_grammar(api_key: &str, text: &str) -> CommandResult<GrammarCheckResponse> {
    if api_key.is_empty() {
        return Err(CommandError::FeatureMissing(
            "OpenAI API key is not configured".to_string(),
        ));
    }
    if text.trim().is_empty() {
        return Err(CommandError::InvalidInput("Nothing to check".to_string()));
    }

    let client = reqwest::Client::new();
    let body = json!({
        "model": GRAMMAR_MODEL,
        "messages": [
            { "role": "system", "content": GRAMMAR_PROMPT },
            { "role": "user", "content": text },
        ],
    });

    let response = client
        .post(OPENAI_CHAT_URL)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        eprintln!("[Grammar] OpenAI returned {}: {}", status, detail);
        return Err(CommandError::NetworkError(format!(
            "Grammar check failed with status {}",
            status
        )));
    }

    let json: Value = response.json().await?;
    let corrected = parse_chat_reply(&json).ok_or_else(|| {
        eprintln!("[Grammar] Unexpected response shape: {}", json);
        CommandError::NetworkError("Unexpected grammar check response".to_string())
    })?;

    Ok(GrammarCheckResponse {
        corrected,
        model: GRAMMAR_MODEL.to_string(),
    })
}

/// Extract the assistant text from a chat completions response
pub(crate) fn parse_chat_reply(json: &Value) -> Option<String> {
    json.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_chat_reply() {
        let json = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Fixed text.\n" } }
            ]
        });
        assert_eq!(parse_chat_reply(&json).as_deref(), Some("Fixed text."));
    }

    #[test]
    fn test_parse_chat_reply_rejects_malformed_payloads() {
        assert_eq!(parse_chat_reply(&json!({})), None);
        assert_eq!(parse_chat_reply(&json!({ "choices": [] })), None);
        assert_eq!(
            parse_chat_reply(&json!({ "choices": [{ "message": { "content": 42 } }] })),
            None
        );
    }
}
