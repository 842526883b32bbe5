use serde::{Deserialize, Serialize};

use crate::rate_limit::UNKNOWN_SENDER;

// Inbound webhook post, decoded from the form body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub sender: String,
    pub body: String,
}

impl InboundMessage {
    // First occurrence of each field wins; missing or empty `From` becomes "unknown"
    pub fn parse(raw: &[u8]) -> Self {
        let mut body = None;
        let mut sender = None;

        for (key, value) in url::form_urlencoded::parse(raw) {
            match key.as_ref() {
                "Body" if body.is_none() => body = Some(value.into_owned()),
                "From" if sender.is_none() => sender = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            sender: sender
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN_SENDER.to_string()),
            body: body.unwrap_or_default(),
        }
    }
}

// Chat completion API request format
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

// Chat completion API response format, only the parts we read
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_twilio_style_body() {
        let msg = InboundMessage::parse(b"Body=Hello+there%21&From=%2B15551234567&To=%2B15550000000");
        assert_eq!(msg.body, "Hello there!");
        assert_eq!(msg.sender, "+15551234567");
    }

    #[test]
    fn missing_fields_are_defaulted() {
        let msg = InboundMessage::parse(b"");
        assert_eq!(msg.body, "");
        assert_eq!(msg.sender, "unknown");
    }

    #[test]
    fn empty_from_becomes_unknown() {
        let msg = InboundMessage::parse(b"Body=hi&From=");
        assert_eq!(msg.sender, "unknown");
        assert_eq!(msg.body, "hi");
    }

    #[test]
    fn first_value_wins() {
        let msg = InboundMessage::parse(b"From=a&From=b&Body=1&Body=2");
        assert_eq!(msg.sender, "a");
        assert_eq!(msg.body, "1");
    }

    #[test]
    fn non_form_bytes_do_not_fail() {
        let msg = InboundMessage::parse(&[0xff, 0xfe, b'=', 0x00]);
        assert_eq!(msg.sender, "unknown");
    }

    #[test]
    fn first_content_handles_missing_parts() {
        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.first_content(), None);

        let null: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#).unwrap();
        assert_eq!(null.first_content(), None);

        let ok: ChatCompletionResponse =
            serde_json::from_str(r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":" hi "}}]}"#)
                .unwrap();
        assert_eq!(ok.first_content().as_deref(), Some(" hi "));
    }
}
