use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Connection parameters for the chat-completion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl EngineConfig {
    /// Build from environment. `OPENAI_API_KEY` is required; base URL and
    /// model fall back to sensible defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY environment variable not set"))?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        Ok(Self {
            base_url,
            api_key,
            model,
            timeout_seconds: 60,
        })
    }
}

/// Connection parameters for the document retrieval pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    pub endpoint: String,
    pub token: String,
    pub num_results: usize,
    pub timeout_seconds: u64,
}

impl RetrievalConfig {
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("VECTORIZE_ENDPOINT")
            .map_err(|_| anyhow!("VECTORIZE_ENDPOINT environment variable not set"))?;
        let token = std::env::var("VECTORIZE_TOKEN")
            .map_err(|_| anyhow!("VECTORIZE_TOKEN environment variable not set"))?;
        Ok(Self {
            endpoint,
            token,
            num_results: 5,
            timeout_seconds: 30,
        })
    }
}
