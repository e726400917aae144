//! Session orchestrator: validates incoming turns and sequences the tool
//! calls for one conversation turn. Thin dispatcher by design; all
//! branching logic lives in the tools and the components behind them.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use log::debug;
use serde_json::{json, Value};

use pitchcraft_core::error::PitchError;
use pitchcraft_core::traits::{Engine, Retriever};
use pitchcraft_core::types::{Message, Role};

use crate::state::SessionStore;
use crate::tools::{PitchDeckTools, ToolRegistry};

pub struct SessionOrchestrator {
    registry: ToolRegistry,
}

impl SessionOrchestrator {
    pub fn new(engine: Arc<dyn Engine>, retriever: Arc<dyn Retriever>) -> Self {
        Self::with_store(engine, retriever, Arc::new(SessionStore::new()))
    }

    pub fn with_store(
        engine: Arc<dyn Engine>,
        retriever: Arc<dyn Retriever>,
        store: Arc<SessionStore>,
    ) -> Self {
        let tools = Arc::new(PitchDeckTools::new(engine, retriever, store));
        let mut registry = ToolRegistry::new();
        registry.register("pitch_deck".to_string(), tools);
        Self { registry }
    }

    /// Handle one conversation turn.
    ///
    /// Rejects caller-contract violations (empty message list, final turn
    /// not from the user, blank content); everything downstream degrades
    /// internally and cannot fail the turn.
    pub async fn handle_turn(&self, session_id: &str, messages: &[Message]) -> Result<String> {
        let latest = messages
            .last()
            .ok_or_else(|| PitchError::InvalidRequest("empty message list".to_string()))?;
        if latest.role != Role::User {
            return Err(
                PitchError::InvalidRequest("final turn must be a user message".to_string()).into(),
            );
        }
        let content = latest.content.trim();
        if content.is_empty() {
            return Err(PitchError::InvalidRequest("empty user message".to_string()).into());
        }

        let mut parameters = HashMap::from([
            ("sessionId".to_string(), json!(session_id)),
            ("userMessage".to_string(), json!(content)),
        ]);

        let verdict = self
            .registry
            .execute_tool("should_generate_deck", &parameters)
            .await?;
        let wants_deck = serde_json::from_str::<Value>(&verdict)
            .ok()
            .and_then(|v| v.get("shouldGenerate").and_then(Value::as_bool))
            .unwrap_or(false);
        debug!("Turn for session {}: wants_deck={}", session_id, wants_deck);

        if wants_deck {
            let payload = self.registry.execute_tool("generate_deck", &parameters).await?;
            Ok(format!(
                "Here is your pitch deck. Slides marked ⚠️ NEEDS REFINEMENT would benefit from more detail.\n\n{}",
                payload
            ))
        } else {
            parameters.insert("userResponse".to_string(), json!(content));
            let payload = self
                .registry
                .execute_tool("evaluate_response", &parameters)
                .await?;
            Ok(format!(
                "Thanks! I evaluated your description against startup principles. \
                 You can clarify the flagged areas, or ask me to generate the deck now.\n\n{}",
                payload
            ))
        }
    }

    /// Render the deck directly, bypassing intent detection.
    pub async fn generate(&self, session_id: &str, company_name: Option<&str>) -> Result<String> {
        let mut parameters = HashMap::from([("sessionId".to_string(), json!(session_id))]);
        if let Some(name) = company_name {
            parameters.insert("companyName".to_string(), json!(name));
        }
        let payload = self.registry.execute_tool("generate_deck", &parameters).await?;
        Ok(format!(
            "Here is your pitch deck. Slides marked ⚠️ NEEDS REFINEMENT would benefit from more detail.\n\n{}",
            payload
        ))
    }

    /// The upfront interview question set.
    pub async fn questions(&self) -> Result<String> {
        self.registry
            .execute_tool("get_pitch_deck_questions", &HashMap::new())
            .await
    }

    /// Reset the session back to the empty state.
    pub async fn reset(&self, session_id: &str) -> Result<String> {
        let parameters = HashMap::from([("sessionId".to_string(), json!(session_id))]);
        self.registry
            .execute_tool("reset_conversation", &parameters)
            .await
    }
}
