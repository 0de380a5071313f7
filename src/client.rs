use log::{error, info};

use crate::config::Settings;
use crate::error::GenerationError;
use crate::model::{ConversationHistory, Turn};
use crate::providers::{ChatProvider, GoogleProvider};

/// Prefix of every user-facing failure message from [`ConversationClient::converse`].
pub const GENERATION_FAILED_MESSAGE: &str = "Sorry, I couldn't generate a recipe right now.";

/// Owns the exchange contract with the generation service.
///
/// The client is deliberately infallible at its outer edge: `converse`
/// always hands back a `(text, history)` pair, so the layers above never
/// need an error branch. A client built without a credential stays usable
/// and reports the configuration problem on every exchange instead.
pub struct ConversationClient {
    provider: Option<Box<dyn ChatProvider>>,
}

impl ConversationClient {
    /// Build a client from settings.
    ///
    /// A missing credential does not fail construction; it produces an
    /// unconfigured client. Callers that want to halt on a missing key
    /// (the CLI does) check [`is_configured`](Self::is_configured).
    pub fn new(settings: &Settings) -> Self {
        match GoogleProvider::new(settings) {
            Ok(provider) => ConversationClient {
                provider: Some(Box::new(provider)),
            },
            Err(e) => {
                error!("{}", e);
                ConversationClient { provider: None }
            }
        }
    }

    /// Build a client over an arbitrary provider implementation.
    pub fn with_provider(provider: Box<dyn ChatProvider>) -> Self {
        ConversationClient {
            provider: Some(provider),
        }
    }

    /// A client with no backend; every exchange reports `NotConfigured`.
    pub fn unconfigured() -> Self {
        ConversationClient { provider: None }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// One exchange in structured form: the completion or the failure
    /// reason, plus the history as the exchange left it.
    ///
    /// On success the returned history is the input extended with the new
    /// user turn and the model turn. On failure the input history comes
    /// back as-is: turns are only committed by a completed exchange, so a
    /// retry never sees a dangling user turn.
    pub async fn generate(
        &self,
        prompt: &str,
        history: &[Turn],
    ) -> (Result<String, GenerationError>, ConversationHistory) {
        let Some(provider) = self.provider.as_deref() else {
            return (Err(GenerationError::NotConfigured), history.to_vec());
        };

        let mut turns = history.to_vec();
        turns.push(Turn::user(prompt));

        info!(
            "Sending prompt to {} ({} prior turns)",
            provider.provider_name(),
            history.len()
        );
        match provider.send(&turns).await {
            Ok(text) => {
                turns.push(Turn::model(text.as_str()));
                (Ok(text), turns)
            }
            Err(e) => {
                error!("Exchange failed: {}", e);
                (Err(e), history.to_vec())
            }
        }
    }

    /// One exchange in display form: failures come back as the message the
    /// user should read, never as an error.
    pub async fn converse(
        &self,
        prompt: &str,
        history: ConversationHistory,
    ) -> (String, ConversationHistory) {
        let (result, history) = self.generate(prompt, &history).await;
        let text = match result {
            Ok(text) => text,
            Err(e @ GenerationError::NotConfigured) => e.to_string(),
            Err(e) => format!("{} Error: {}", GENERATION_FAILED_MESSAGE, e),
        };
        (text, history)
    }
}
