use std::fmt;

/// Byte counter reported with a transport tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteProgress {
    /// Cumulative bytes, encoding overhead included when the transport counts the raw body.
    pub loaded: u64,
    /// Expected total, `None` when the length isn't computable.
    pub total: Option<u64>,
    /// Cumulative file payload bytes, when the transport can tell them apart.
    pub payload_loaded: Option<u64>,
}

impl ByteProgress {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self {
            loaded,
            total,
            payload_loaded: None,
        }
    }

    /// Progress whose counter only covers file payload bytes.
    pub fn payload(loaded: u64, total: u64) -> Self {
        Self {
            loaded,
            total: Some(total),
            payload_loaded: Some(loaded),
        }
    }

    pub fn length_computable(&self) -> bool {
        self.total.is_some()
    }

    /// Offset the distribution works from, payload relative when available.
    pub fn distributable(&self) -> u64 {
        self.payload_loaded.unwrap_or(self.loaded)
    }
}

/// Complete response of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a transfer did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub message: String,
    /// Response status, when a response arrived.
    pub status: Option<u16>,
    /// Response body, when a response arrived.
    pub body: Option<String>,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
        }
    }
}

impl From<TransportResponse> for TransportFailure {
    fn from(response: TransportResponse) -> Self {
        Self {
            message: format!("server answered with status {}", response.status),
            status: Some(response.status),
            body: Some(response.body),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Lifecycle signal delivered by a transport.
///
/// A successful transfer delivers `SendStarted`, any number of
/// `SendProgress`, `SendCompleted`, any number of `Progress`, then
/// `ResponseReceived`.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Body sending began.
    SendStarted,
    /// Cumulative body bytes sent.
    SendProgress(ByteProgress),
    /// The whole body was sent.
    SendCompleted(ByteProgress),
    /// Progress of the whole round trip.
    Progress(ByteProgress),
    /// The response was fully received.
    ResponseReceived(TransportResponse),
    /// The transfer broke off.
    Failed(TransportFailure),
}
