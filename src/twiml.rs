//! Markup replies in the messaging provider's XML envelope.

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

// `&` goes first so the entities produced below aren't escaped again
const ESCAPES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&apos;"),
];

pub fn escape_xml(unsafe_text: &str) -> String {
    ESCAPES
        .iter()
        .fold(unsafe_text.to_string(), |text, (ch, entity)| {
            text.replace(*ch, entity)
        })
}

/// Single-message response document.
pub fn message_response(text: &str) -> String {
    format!(
        "{}<Response><Message>{}</Message></Response>",
        XML_DECLARATION,
        escape_xml(text)
    )
}
