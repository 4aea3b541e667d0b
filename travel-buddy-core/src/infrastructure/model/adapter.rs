//! Message adapters - convert between internal and provider formats

use crate::types::ChatMessage;
use serde_json::{Value, json};

/// Adapter for converting messages and replies to and from API formats
pub struct MessageAdapter;

impl MessageAdapter {
    /// Convert messages to OpenAI-style format
    /// Returns: [{"role": "...", "content": "..."}]
    pub fn to_openai_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role.as_str(),
                    "content": msg.content.clone()
                })
            })
            .collect()
    }

    /// Ollama's /api/chat accepts the same shape
    pub fn to_ollama_format(messages: &[ChatMessage]) -> Vec<Value> {
        Self::to_openai_format(messages)
    }

    /// Text payload of an Ollama reply: `message.content`, or `response`
    /// for generate-style replies.
    pub fn ollama_text(reply: &Value) -> Option<&str> {
        reply
            .pointer("/message/content")
            .and_then(Value::as_str)
            .or_else(|| reply.get("response").and_then(Value::as_str))
    }

    /// Text payload of an OpenAI reply: `choices[0].message.content`.
    pub fn openai_text(reply: &Value) -> Option<&str> {
        reply
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
    }

    /// Return the textual payload when present, otherwise stringify the reply.
    pub fn normalize_reply(reply: Value, extract: fn(&Value) -> Option<&str>) -> String {
        if let Some(text) = extract(&reply) {
            return text.to_string();
        }
        match reply {
            Value::String(text) => text,
            other => other.to_string(),
        }
    }
}
