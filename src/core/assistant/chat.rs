//! Pop-out chat backed by the OpenAI chat completions API

use serde_json::{json, Value};

use super::grammar::parse_chat_reply;
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::{ChatMessage, ChatResponse};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const CHAT_MODEL: &str = "gpt-4o-mini";
const CHAT_PROMPT: &str = "You are a concise assistant living in a small desktop widget. \
Answer briefly and directly.";

pub async fn send_chat(api_key: &str, messages: &[ChatMessage]) -> CommandResult<ChatResponse> {
    if api_key.is_empty() {
        return Err(CommandError::FeatureMissing(
            "OpenAI API key is not configured".to_string(),
        ));
    }
    if messages.is_empty() {
        return Err(CommandError::InvalidInput("Chat history is empty".to_string()));
    }

    let mut payload: Vec<Value> = vec![json!({ "role": "system", "content": CHAT_PROMPT })];
    payload.extend(
        messages
            .iter()
            .map(|m| json!({ "role": m.role, "content": m.content })),
    );

    let client = reqwest::Client::new();
    let response = client
        .post(OPENAI_CHAT_URL)
        .bearer_auth(api_key)
        .json(&json!({ "model": CHAT_MODEL, "messages": payload }))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        eprintln!("[Chat] OpenAI returned {}: {}", status, detail);
        return Err(CommandError::NetworkError(format!(
            "Chat request failed with status {}",
            status
        )));
    }

    let json: Value = response.json().await?;
    let content = parse_chat_reply(&json).ok_or_else(|| {
        eprintln!("[Chat] Unexpected response shape: {}", json);
        CommandError::NetworkError("Unexpected chat response".to_string())
    })?;

    Ok(ChatResponse {
        reply: ChatMessage {
            role: "assistant".to_string(),
            content,
        },
    })
}
