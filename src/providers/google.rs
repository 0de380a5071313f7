use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Settings;
use crate::error::GenerationError;
use crate::model::Turn;
use crate::providers::ChatProvider;

const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from settings
    ///
    /// Tries the configured key first, then falls back to the
    /// GOOGLE_API_KEY environment variable.
    pub fn new(settings: &Settings) -> Result<Self, GenerationError> {
        let api_key = settings
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or(GenerationError::NotConfigured)?;

        Ok(GoogleProvider {
            client: Client::new(),
            api_key,
            base_url: GOOGLE_API_BASE.to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    fn request_body(&self, turns: &[Turn]) -> Value {
        let contents: Vec<Value> = turns
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role,
                    "parts": [{ "text": turn.text }]
                })
            })
            .collect();

        json!({
            "contents": contents,
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_tokens
            }
        })
    }
}

#[async_trait]
impl ChatProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn send(&self, turns: &[Turn]) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(turns))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("Gemini response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            return Err(GenerationError::Api {
                code: error["code"].as_i64().unwrap_or(0),
                message: error["message"]
                    .as_str()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| GenerationError::MalformedResponse(response_body.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn provider_for(server: &Server) -> GoogleProvider {
        GoogleProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gemini-2.5-flash".to_string(),
        )
    }

    #[test]
    fn test_provider_name() {
        let settings = Settings {
            api_key: Some("test-key".to_string()),
            ..Settings::default()
        };
        let provider = GoogleProvider::new(&settings).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        // Guard against a key leaking in from the test environment
        let had_env = std::env::var("GOOGLE_API_KEY").is_ok();
        if had_env {
            return;
        }
        let settings = Settings::default();
        let result = GoogleProvider::new(&settings);
        assert!(matches!(result, Err(GenerationError::NotConfigured)));
    }

    #[test]
    fn test_request_body_carries_history_in_order() {
        let provider = GoogleProvider::with_base_url(
            "k".to_string(),
            "http://localhost".to_string(),
            "gemini-2.5-flash".to_string(),
        );
        let turns = vec![
            Turn::user("first question"),
            Turn::model("first answer"),
            Turn::user("second question"),
        ];

        let body = provider.request_body(&turns);
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "second question");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2000);
    }

    #[tokio::test]
    async fn test_send_extracts_completion() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded(
                "key".to_string(),
                "fake_api_key".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r####"{
                    "candidates": [{
                        "content": {
                            "parts": [{ "text": "### **Aloo Gosht**\nA classic." }],
                            "role": "model"
                        }
                    }]
                }"####,
            )
            .create_async()
            .await;

        let provider = provider_for(&server);
        let result = provider.send(&[Turn::user("a prompt")]).await.unwrap();
        assert!(result.contains("Aloo Gosht"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_surfaces_api_error_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 429, "message": "Resource exhausted"}}"#)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider.send(&[Turn::user("a prompt")]).await.unwrap_err();
        match err {
            GenerationError::Api { code, message } => {
                assert_eq!(code, 429);
                assert!(message.contains("Resource exhausted"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_rejects_malformed_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider.send(&[Turn::user("a prompt")]).await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
        mock.assert_async().await;
    }
}
