use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}
