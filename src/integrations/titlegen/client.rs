// src/integrations/titlegen/client.rs
//
// Marketing title generation via an OpenAI-compatible chat completions API.
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - API failure or an empty completion is a first-class GenerationFailure,
//   never a panic

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::integrations::{GenerationFailure, TitleGenerator};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You write short, punchy e-commerce listing titles. \
Answer with the title only, no quotes, no explanations.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Chat-completions title generator
pub struct OpenAiTitleGenerator {
    endpoint: String,
    model: String,
    api_key: String,
    http_client: Client,
}

impl OpenAiTitleGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model,
            api_key,
            http_client,
        }
    }

    /// Read the API key from `LISTFORGE_OPENAI_KEY`
    pub fn from_env() -> Result<Self, GenerationFailure> {
        let api_key = std::env::var("LISTFORGE_OPENAI_KEY")
            .map_err(|_| GenerationFailure::new("LISTFORGE_OPENAI_KEY is not set"))?;
        Ok(Self::new(api_key, DEFAULT_MODEL.to_string()))
    }

    /// Point the client at a compatible endpoint (tests, proxies)
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    fn build_prompt(product_name: &str, hint: &str) -> String {
        if hint.trim().is_empty() {
            format!("Product: {}", product_name)
        } else {
            format!("Product: {}\nExtra request: {}", product_name, hint.trim())
        }
    }
}

impl TitleGenerator for OpenAiTitleGenerator {
    fn generate(&self, product_name: &str, hint: &str) -> Result<String, GenerationFailure> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": Self::build_prompt(product_name, hint) },
            ],
            "temperature": 0.7,
        });

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| GenerationFailure::new(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(GenerationFailure::new(format!(
                "API returned {}",
                response.status()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| GenerationFailure::new(format!("malformed response: {}", e)))?;

        let text = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerationFailure::new("empty completion"));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_hint_when_present() {
        let prompt = OpenAiTitleGenerator::build_prompt("Widget", "emphasize the warranty");
        assert!(prompt.contains("Widget"));
        assert!(prompt.contains("emphasize the warranty"));
    }

    #[test]
    fn test_prompt_omits_empty_hint() {
        let prompt = OpenAiTitleGenerator::build_prompt("Widget", "   ");
        assert_eq!(prompt, "Product: Widget");
    }
}
