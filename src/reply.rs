//! Reply generation against a chat completion API.
//!
//! Every completion attempt ends as a [`ReplyOutcome`]. The webhook turns
//! that into user-visible text, so upstream trouble never becomes an HTTP
//! error.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::UpstreamError;
use crate::metrics::{EMPTY_REPLIES, UPSTREAM_FAILURES, UPSTREAM_LATENCY};
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

pub const MAX_TOKENS: u32 = 300;
pub const TEMPERATURE: f64 = 0.2;

// Upstream error bodies beyond this many bytes are cut before logging
pub const MAX_ERROR_BODY: usize = 512;

pub const EMPTY_REPLY_TEXT: &str = "Sorry, couldn't process that.";
pub const FAILURE_TEXT: &str = "Sorry — something went wrong. Try again later.";

pub const DEFAULT_SYSTEM_PROMPT: &str = "
You are CyberGuard — a friendly cybersecurity awareness assistant.
Keep replies short, clear, non-technical, and actionable.
Do NOT give hacking or exploit instructions.
";

#[derive(Debug)]
pub enum ReplyOutcome {
    Reply(String),
    Empty,
    Failed(UpstreamError),
}

impl ReplyOutcome {
    pub fn text(&self) -> &str {
        match self {
            ReplyOutcome::Reply(text) => text.as_str(),
            ReplyOutcome::Empty => EMPTY_REPLY_TEXT,
            ReplyOutcome::Failed(_) => FAILURE_TEXT,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ReplyOutcome::Reply(text) => text,
            other => other.text().to_string(),
        }
    }
}

/// Something that can complete a system + user conversation.
///
/// `Ok(None)` means the call succeeded but carried no content.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, UpstreamError>;
}

pub struct OpenAiCompleter {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiCompleter {
    pub fn new(
        client: reqwest::Client,
        api_base: &str,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model,
            timeout,
        }
    }

    fn request_body(&self, system: &str, user: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl Completer for OpenAiCompleter {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, UpstreamError> {
        let res = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&self.request_body(system, user))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: truncate_body(body, MAX_ERROR_BODY),
            });
        }

        let body = res.json::<ChatCompletionResponse>().await?;
        Ok(body.first_content())
    }
}

fn truncate_body(mut body: String, max: usize) -> String {
    if body.len() <= max {
        return body;
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body.push('…');
    body
}

pub struct ReplyGenerator {
    completer: Arc<dyn Completer>,
    system_prompt: String,
}

impl ReplyGenerator {
    pub fn new(completer: Arc<dyn Completer>, system_prompt: String) -> Self {
        Self {
            completer,
            system_prompt,
        }
    }

    pub async fn attempt(&self, user_message: &str) -> ReplyOutcome {
        let start_time = Instant::now();
        let result = self.completer.complete(&self.system_prompt, user_message).await;
        UPSTREAM_LATENCY.observe(start_time.elapsed().as_secs_f64());

        match result {
            Ok(Some(text)) if !text.trim().is_empty() => ReplyOutcome::Reply(text.trim().to_string()),
            Ok(_) => {
                EMPTY_REPLIES.inc();
                ReplyOutcome::Empty
            }
            Err(err) => {
                UPSTREAM_FAILURES.inc();
                tracing::warn!(kind = err.kind(), error = %err, "completion call failed");
                ReplyOutcome::Failed(err)
            }
        }
    }

    pub async fn generate(&self, user_message: &str) -> String {
        self.attempt(user_message).await.into_text()
    }
}
