//! WhatsApp deep links and the host seam that opens them.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CommerceError;

/// Base of every click-to-chat link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// A click-to-chat URI carrying an encoded order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    uri: String,
    message_len: usize,
    max_len: usize,
}

impl DeepLink {
    /// Build `https://wa.me/<number>?text=<encoded>`.
    ///
    /// Links longer than `max_len` are still built; a warning is logged
    /// because the receiving app may cut them short.
    pub fn whatsapp(number: &str, message: &str, max_len: usize) -> Self {
        let uri = format!(
            "{}/{}?text={}",
            WHATSAPP_BASE_URL,
            number,
            urlencoding::encode(message)
        );
        let link = Self {
            uri,
            message_len: message.len(),
            max_len,
        };
        if link.exceeds_limit() {
            tracing::warn!(
                length = link.uri.len(),
                limit = max_len,
                "order link exceeds recommended length"
            );
        }
        link
    }

    /// The full URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Length of the unencoded message in bytes.
    pub fn message_len(&self) -> usize {
        self.message_len
    }

    /// Check if the encoded link is longer than the configured limit.
    pub fn exceeds_limit(&self) -> bool {
        self.uri.len() > self.max_len
    }
}

impl std::fmt::Display for DeepLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

/// Host environment capable of opening a URI (browser tab, OS handler, ...).
#[async_trait]
pub trait LinkOpener: Send + Sync {
    /// Hand the URI to the host. `Err` means the host refused or had no handler.
    async fn open(&self, uri: &str) -> Result<(), CommerceError>;
}

/// Opener that records links instead of opening them.
///
/// Useful for embedding and tests; can be told to fail to exercise the
/// dispatch-failure path.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl RecordingOpener {
    /// Create an opener that accepts every link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an opener that rejects every link with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }

    /// Links opened so far.
    pub fn opened(&self) -> Vec<String> {
        match self.opened.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl LinkOpener for RecordingOpener {
    async fn open(&self, uri: &str) -> Result<(), CommerceError> {
        if let Some(reason) = &self.failure {
            return Err(CommerceError::DispatchFailed(reason.clone()));
        }
        match self.opened.lock() {
            Ok(mut guard) => guard.push(uri.to_string()),
            Err(poisoned) => poisoned.into_inner().push(uri.to_string()),
        }
        Ok(())
    }
}
