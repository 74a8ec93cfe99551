use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request failed before a response was received.
    #[error("backend request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status. `detail` carries the
    /// server-provided message when the body had one.
    #[error("backend rejected the request with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    /// A success response whose body could not be decoded.
    #[error("backend response was malformed: {0}")]
    Malformed(String),
}

impl ApiError {
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}
