use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use pitchcraft_core::config::RetrievalConfig;
use pitchcraft_core::traits::Retriever;

pub const NO_DOCUMENTS: &str = "No relevant documents found.";
pub const RETRIEVAL_UNAVAILABLE: &str = "Unable to retrieve relevant documents at this time.";

/// One chunk returned by the retrieval pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievedDocument {
    pub text: String,
    #[serde(default)]
    pub source_display_name: String,
    #[serde(default)]
    pub relevancy: f64,
}

#[derive(Debug, Deserialize)]
struct RetrievalResponse {
    #[serde(default)]
    documents: Vec<RetrievedDocument>,
}

/// Client for a Vectorize-style document retrieval pipeline.
///
/// Best-effort by contract: any transport or decode failure degrades to a
/// placeholder string so evaluation passes are never aborted by a broken
/// retrieval backend.
pub struct VectorizeRetriever {
    config: RetrievalConfig,
    client: Client,
}

impl VectorizeRetriever {
    pub fn new(config: RetrievalConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { config, client })
    }

    async fn retrieve_documents(&self, query: &str) -> Result<Vec<RetrievedDocument>> {
        let payload = json!({
            "question": query,
            "numResults": self.config.num_results,
        });
        let res = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        let body = res.json::<RetrievalResponse>().await?;
        Ok(body.documents)
    }

    /// Concatenate retrieved chunks into a single context blurb.
    pub fn format_documents_for_context(documents: &[RetrievedDocument]) -> String {
        documents
            .iter()
            .map(|doc| {
                if doc.source_display_name.is_empty() {
                    doc.text.clone()
                } else {
                    format!("[{}] {}", doc.source_display_name, doc.text)
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl Retriever for VectorizeRetriever {
    async fn search(&self, query: &str) -> String {
        match self.retrieve_documents(query).await {
            Ok(documents) => {
                let context = Self::format_documents_for_context(&documents);
                if context.is_empty() {
                    NO_DOCUMENTS.to_string()
                } else {
                    context
                }
            }
            Err(err) => {
                warn!("Retrieval failed for query '{}': {}", query, err);
                RETRIEVAL_UNAVAILABLE.to_string()
            }
        }
    }
}
