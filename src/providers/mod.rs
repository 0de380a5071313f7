mod google;

pub use google::GoogleProvider;

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::model::Turn;

/// Seam between the conversation client and the external generation service.
///
/// One logical operation: hand over the full turn sequence, get the
/// completion text of a single non-streamed exchange back. Nothing above
/// this trait depends on a provider-specific feature.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Run one exchange over the given turns, the last of which is the new
    /// user message.
    async fn send(&self, turns: &[Turn]) -> Result<String, GenerationError>;
}
