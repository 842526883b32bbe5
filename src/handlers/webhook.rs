use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::metrics::{RATE_GATE_SENDERS, RATE_LIMITED, WEBHOOK_REQUESTS};
use crate::models::InboundMessage;
use crate::state::AppState;
use crate::twiml::message_response;

pub const RATE_LIMITED_TEXT: &str = "Slow down — give me a sec 😅";

// Short stable hash so phone numbers stay out of the logs
fn sender_fingerprint(sender: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sender);
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

fn xml_reply(text: &str) -> Response {
    ([(header::CONTENT_TYPE, "text/xml")], message_response(text)).into_response()
}

// Always answers 200: upstream trouble ends up in the message text
pub async fn webhook_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method != Method::POST {
        return "OK".into_response();
    }

    WEBHOOK_REQUESTS.inc();
    // an unreadable or oversized body is treated as empty, the reply stays 200
    let body = body.unwrap_or_else(|rejection| {
        tracing::warn!(error = %rejection, "dropping unreadable webhook body");
        Bytes::new()
    });
    let inbound = InboundMessage::parse(&body);
    let sender = sender_fingerprint(&inbound.sender);

    let admission = state.rate_gate.check(&inbound.sender);
    RATE_GATE_SENDERS.set(state.rate_gate.len() as f64);

    if !admission.is_admitted() {
        RATE_LIMITED.inc();
        tracing::info!(%sender, "rate limited");
        return xml_reply(RATE_LIMITED_TEXT);
    }

    let reply = state.replies.generate(&inbound.body).await;

    tracing::info!(
        %sender,
        message = %inbound.body,
        reply = %reply,
        ts = %chrono::Utc::now().to_rfc3339(),
        "replied"
    );

    xml_reply(&reply)
}
