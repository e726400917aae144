use anyhow::Result;
use async_trait::async_trait;

use crate::types::Message;

/// Language model facility. Given a prompt and the conversation so far,
/// returns a free-text completion. Callers must treat schema mismatches
/// in the returned text as equivalent to failure.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn complete(&self, prompt: &str, history: &[Message]) -> Result<String>;
}

/// Knowledge retrieval service. Best-effort: implementations must absorb
/// internal errors and return a placeholder string rather than fail, so a
/// broken retrieval backend can never abort an evaluation pass.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn search(&self, query: &str) -> String;
}
