use thiserror::Error;

/// Errors raised while normalizing ingredient input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// The merged ingredient set came out empty
    #[error("Please provide at least one valid ingredient.")]
    Empty,

    /// An ingredient contains characters outside letters, whitespace and hyphen
    #[error("Invalid ingredient name: {0:?}")]
    BadToken(String),
}

/// Failures that can occur during a generation exchange
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No API key was available at startup; generation is disabled
    #[error("Gemini API is not configured. Please check your API key.")]
    NotConfigured,

    /// Failed to reach the generation service
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error body instead of a completion
    #[error("Gemini API error ({code}): {message}")]
    Api { code: i64, message: String },

    /// The response arrived but did not contain a completion text
    #[error("Failed to extract content from Gemini response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
