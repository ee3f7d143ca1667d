use thiserror::Error;

/// The request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-2xx with a `detail` the user gets to see.
    #[error("server rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("request failed with status {status}")]
    Status { status: u16 },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Rejected { status, .. } | ClientError::Status { status } => Some(*status),
            ClientError::Transport(_) | ClientError::Decode(_) => None,
        }
    }
}
