use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Message is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

impl ProtocolError {
    /// Whether only the offending message is bad and the stream can keep going.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Encoding(_))
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
