/// Custom error type for github_sensor operations
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("request carries no event kind header")]
    MissingEventHeader,

    #[error("event kind '{0}' was not requested for parsing")]
    UnsupportedEvent(String),

    #[error("signature verification required but no signature header supplied")]
    MissingSignature,

    #[error("webhook signature verification failed")]
    InvalidSignature,

    #[error("malformed webhook payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("failed to encode event envelope: {0}")]
    EncodeEnvelope(serde_json::Error),

    #[error("broker operation failed: {0}")]
    Broker(#[from] redis::RedisError),
}

impl SensorError {
    /// True for conditions that end request handling quietly: the
    /// delivery is logged and dropped, and the sender is not told
    /// anything went wrong.
    pub fn is_benign(&self) -> bool {
        matches!(self, SensorError::UnsupportedEvent(_))
    }
}

/// Helper type for Results that use SensorError
pub type Result<T> = std::result::Result<T, SensorError>;
