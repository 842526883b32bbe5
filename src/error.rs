use thiserror::Error;

/// Why a completion call produced no reply.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("completion request timed out")]
    Timeout,

    #[error("completion request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    Decode(String),
}

impl UpstreamError {
    // Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Timeout => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Transport(err)
        }
    }
}
