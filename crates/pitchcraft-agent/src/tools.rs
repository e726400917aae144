//! Tool surface of the pitch-deck assistant.
//!
//! Each tool takes a JSON parameter map and returns a JSON string, so the
//! registry can be driven by a tool-calling model or directly by the
//! orchestrator.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use pitchcraft_core::error::PitchError;
use pitchcraft_core::traits::{Engine, Retriever};
use pitchcraft_core::types::Topic;

use crate::analysis::analyze_deck;
use crate::deck::render_deck;
use crate::evaluator::RefinementEvaluator;
use crate::extractor::TopicExtractor;
use crate::rubric::RUBRIC;
use crate::state::{SessionStore, MAX_QUESTIONS};

pub const DEFAULT_COMPANY_NAME: &str = "[Your Company Name]";

const GENERATE_KEYWORDS: [&str; 7] = [
    "generate", "create", "build", "make", "now", "pitch deck", "deck",
];

/// Trait for tool executors that can serve named tools.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: &HashMap<String, Value>,
    ) -> Result<String>;

    fn get_available_tools(&self) -> Vec<String>;

    fn get_tool_description(&self, tool_name: &str) -> Option<String>;
}

/// Registry dispatching tool calls to whichever executor provides the tool.
pub struct ToolRegistry {
    executors: HashMap<String, Arc<dyn ToolExecutor>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            executors: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: String, executor: Arc<dyn ToolExecutor>) {
        self.executors.insert(name, executor);
    }

    pub async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: &HashMap<String, Value>,
    ) -> Result<String> {
        for executor in self.executors.values() {
            if executor.get_available_tools().iter().any(|t| t == tool_name) {
                return executor.execute_tool(tool_name, parameters).await;
            }
        }
        Err(PitchError::UnknownTool(tool_name.to_string()).into())
    }

    pub fn is_tool_available(&self, tool_name: &str) -> bool {
        self.executors
            .values()
            .any(|executor| executor.get_available_tools().iter().any(|t| t == tool_name))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The pitch-deck tool set: extraction, evaluation, deck generation,
/// principle search, intent detection and reset.
pub struct PitchDeckTools {
    store: Arc<SessionStore>,
    extractor: TopicExtractor,
    evaluator: RefinementEvaluator,
    retriever: Arc<dyn Retriever>,
}

impl PitchDeckTools {
    pub fn new(
        engine: Arc<dyn Engine>,
        retriever: Arc<dyn Retriever>,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            store,
            extractor: TopicExtractor::new(engine),
            evaluator: RefinementEvaluator::new(Arc::clone(&retriever)),
            retriever,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    async fn reset_conversation(&self, session_id: &str) -> Result<String> {
        self.store.reset(session_id).await;
        Ok(json!({
            "message": "Conversation reset. Ready to start fresh!",
            "questionsRemaining": MAX_QUESTIONS,
        })
        .to_string())
    }

    fn pitch_deck_questions(&self) -> Result<String> {
        let questions: Vec<Value> = RUBRIC
            .iter()
            .map(|spec| {
                json!({
                    "topic": spec.topic.key(),
                    "question": spec.question,
                    "priority": spec.priority,
                })
            })
            .collect();
        Ok(json!({
            "questions": questions,
            "message": "Here are all the questions needed for your pitch deck. Please answer them comprehensively:",
        })
        .to_string())
    }

    /// Extract facts from the submission, evaluate them and fold both into
    /// the session state.
    async fn evaluate_response(&self, session_id: &str, user_response: &str) -> Result<String> {
        let extraction = self.extractor.extract(user_response).await;
        let facts = self
            .store
            .update(session_id, |state| {
                state.merge_extraction(&extraction);
                state.facts.clone()
            })
            .await;

        let evaluation = self.evaluator.evaluate(&facts).await;
        self.store
            .update(session_id, |state| {
                state.set_refinement_areas(evaluation.refinement_areas.clone())
            })
            .await;

        Ok(json!({
            "extractedInfo": extraction.facts,
            "topicsCovered": extraction.covered,
            "refinementAreas": evaluation.refinement_areas,
            "startupPrinciples": evaluation.applied_principles,
            "message": "Evaluation complete! Here are areas that need refinement:",
        })
        .to_string())
    }

    async fn search_principles(&self, query: &str) -> Result<String> {
        let principles = self.retriever.search(query).await;
        Ok(format!("Startup Principles for {}: {}", query, principles))
    }

    fn should_generate(user_message: &str) -> bool {
        let lower = user_message.to_lowercase();
        GENERATE_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
    }

    /// Render the deck and its analysis from the session state, optionally
    /// overlaying explicit per-topic parameters supplied by the caller.
    ///
    /// Read-only with respect to the session: overlay facts and the locally
    /// recomputed refinement areas feed the render but are never written
    /// back. Only the extraction and evaluation passes mutate state.
    async fn generate_deck(
        &self,
        session_id: &str,
        parameters: &HashMap<String, Value>,
    ) -> Result<String> {
        let state = self.store.snapshot(session_id).await;
        let mut facts = state.facts.clone();
        for topic in Topic::ALL {
            if let Some(value) = str_param(parameters, topic.key()) {
                facts.set(topic, value);
            }
        }

        let company_name = str_param(parameters, "companyName")
            .unwrap_or(DEFAULT_COMPANY_NAME)
            .to_string();

        // Refinement areas are recomputed against the final facts so the
        // deck's refinement gating cannot drift from what is rendered.
        let evaluation = self.evaluator.evaluate(&facts).await;
        let deck = render_deck(&company_name, &facts, &evaluation.refinement_areas);
        let analysis = analyze_deck(&facts, &evaluation.refinement_areas, &evaluation.applied_principles);
        let questions_remaining = state.questions_remaining();

        Ok(json!({
            "pitchDeck": deck,
            "analysis": analysis,
            "refinementAreas": evaluation.refinement_areas,
            "questionsRemaining": questions_remaining,
            "message": "Pitch deck generated successfully! Areas marked with ⚠️ NEEDS REFINEMENT require more detail.",
        })
        .to_string())
    }
}

#[async_trait]
impl ToolExecutor for PitchDeckTools {
    async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: &HashMap<String, Value>,
    ) -> Result<String> {
        let session_id = str_param(parameters, "sessionId").unwrap_or("default");
        match tool_name {
            "reset_conversation" => self.reset_conversation(session_id).await,
            "get_pitch_deck_questions" => self.pitch_deck_questions(),
            "evaluate_response" => {
                let user_response = str_param(parameters, "userResponse")
                    .ok_or_else(|| anyhow!("evaluate_response requires a userResponse parameter"))?;
                self.evaluate_response(session_id, user_response).await
            }
            "search_principles" => {
                let query = str_param(parameters, "query")
                    .ok_or_else(|| anyhow!("search_principles requires a query parameter"))?;
                self.search_principles(query).await
            }
            "should_generate_deck" => {
                let user_message = str_param(parameters, "userMessage")
                    .ok_or_else(|| anyhow!("should_generate_deck requires a userMessage parameter"))?;
                let wants_to_generate = Self::should_generate(user_message);
                Ok(json!({
                    "shouldGenerate": wants_to_generate,
                    "message": if wants_to_generate {
                        "User wants to generate pitch deck now. Use the information already collected."
                    } else {
                        "User does not want to generate pitch deck yet."
                    },
                })
                .to_string())
            }
            "generate_deck" => self.generate_deck(session_id, parameters).await,
            other => Err(PitchError::UnknownTool(other.to_string()).into()),
        }
    }

    fn get_available_tools(&self) -> Vec<String> {
        vec![
            "reset_conversation".to_string(),
            "get_pitch_deck_questions".to_string(),
            "evaluate_response".to_string(),
            "search_principles".to_string(),
            "should_generate_deck".to_string(),
            "generate_deck".to_string(),
        ]
    }

    fn get_tool_description(&self, tool_name: &str) -> Option<String> {
        let description = match tool_name {
            "reset_conversation" => "Reset the conversation state for a new session",
            "get_pitch_deck_questions" => "Get all pitch deck questions to ask the user upfront",
            "evaluate_response" => {
                "Evaluate the user's comprehensive response against startup principles"
            }
            "search_principles" => {
                "Search the seed fundraising guide for relevant principles and advice"
            }
            "should_generate_deck" => "Check if the user wants to generate a pitch deck now",
            "generate_deck" => {
                "Generate a complete pitch deck from collected state and optional overrides"
            }
            _ => return None,
        };
        Some(description.to_string())
    }
}

fn str_param<'a>(parameters: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
    parameters.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_intent_keywords() {
        assert!(PitchDeckTools::should_generate("Please generate the pitch deck now"));
        assert!(PitchDeckTools::should_generate("just build it"));
        assert!(!PitchDeckTools::should_generate(
            "Our founders met while volunteering at a food bank"
        ));
    }

    #[tokio::test]
    async fn registry_rejects_unknown_tools() {
        let registry = ToolRegistry::new();
        let result = registry.execute_tool("launch_rocket", &HashMap::new()).await;
        assert!(result.is_err());
    }
}
