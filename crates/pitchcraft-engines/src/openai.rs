use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use pitchcraft_core::config::EngineConfig;
use pitchcraft_core::traits::Engine;
use pitchcraft_core::types::{Message, Role};

/// Chat-completion client for OpenAI-compatible endpoints.
pub struct OpenAiEngine {
    config: EngineConfig,
    client: Client,
}

impl OpenAiEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { config, client })
    }

    fn build_payload(&self, prompt: &str, history: &[Message]) -> Value {
        let mut messages = Vec::with_capacity(history.len() + 1);
        for message in history {
            let role = match message.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            messages.push(json!({ "role": role, "content": message.content }));
        }
        messages.push(json!({ "role": "user", "content": prompt }));
        json!({ "model": self.config.model, "messages": messages })
    }
}

#[async_trait]
impl Engine for OpenAiEngine {
    async fn complete(&self, prompt: &str, history: &[Message]) -> Result<String> {
        let payload = self.build_payload(prompt, history);
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        debug!("OpenAI request to {}: {} history messages", url, history.len());

        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let response_body = res.json::<Value>().await?;
        debug!("OpenAI response: {:?}", response_body);

        if let Some(error) = response_body.get("error") {
            return Err(anyhow!("OpenAI API error: {:?}", error));
        }

        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("Failed to extract content from OpenAI response"))?
            .to_string();

        Ok(content)
    }
}
