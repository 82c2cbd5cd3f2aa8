//! The session-store capability consumed by the run loop.
//!
//! Persistent storage itself is out of scope; the run loop only ever reads
//! and appends through this interface.

use async_trait::async_trait;

use crate::model::ChatMessage;

/// Minimal view of a session the core needs: its id and cached transcript.
#[derive(Debug, Clone, Default)]
pub struct CachedSession {
    pub id: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Session persistence, consumed only through this interface.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_or_create(
        &self,
        id: &str,
    ) -> Result<CachedSession, Box<dyn std::error::Error + Send + Sync>>;

    async fn add_message(
        &self,
        id: &str,
        message: ChatMessage,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_messages(
        &self,
        id: &str,
    ) -> Result<Vec<ChatMessage>, Box<dyn std::error::Error + Send + Sync>>;

    /// Invalidates any cached state for `id` and resets provider-side
    /// session state. Default no-op: most stores have nothing extra to
    /// reset beyond what `get_or_create` already recomputes.
    async fn reset(&self, _id: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_session_default_is_empty() {
        let session = CachedSession::default();
        assert!(session.messages.is_empty());
    }
}
