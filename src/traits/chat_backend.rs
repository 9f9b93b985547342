use async_trait::async_trait;

use crate::errors::GenResult;

/// A chat-completion backend of the generation service
///
/// The generation job only depends on this seam, so tests can substitute a
/// mock and count calls without touching the network.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Issue one completion request and return the raw completion text
    async fn complete(&self, system: &str, user: &str) -> GenResult<String>;
}
