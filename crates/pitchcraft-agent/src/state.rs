//! Conversation state, keyed by session.
//!
//! The state accumulates extracted facts and covered topics across turns
//! and holds the latest wholesale-recomputed refinement-area list. Keying
//! by session id removes the shared-global hazard a single process-wide
//! slot would have; single-session semantics are unchanged when one id is
//! used. Mutations go through `SessionStore::update`, a read-modify-write
//! under the write lock, so a turn's mutation is applied atomically.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use pitchcraft_core::types::{RefinementArea, StartupIdea, Topic};

use crate::extractor::Extraction;

/// Fixed size of the upfront question set.
pub const MAX_QUESTIONS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub facts: StartupIdea,
    pub topics_covered: BTreeSet<Topic>,
    pub refinement_areas: Vec<RefinementArea>,
}

impl ConversationState {
    /// Fold an extraction pass into the state. Facts merge (non-empty
    /// values win, absent values never erase) and covered topics union.
    pub fn merge_extraction(&mut self, extraction: &Extraction) {
        self.facts.merge(&extraction.facts);
        self.topics_covered.extend(extraction.covered.iter().copied());
    }

    /// Replace the refinement-area list with a freshly computed one.
    pub fn set_refinement_areas(&mut self, areas: Vec<RefinementArea>) {
        self.refinement_areas = areas;
    }

    pub fn questions_remaining(&self) -> usize {
        MAX_QUESTIONS.saturating_sub(self.topics_covered.len())
    }

    /// Back to the initial empty shape.
    pub fn reset(&mut self) {
        *self = ConversationState::default();
    }
}

/// Session-id keyed store of conversation states.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, ConversationState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Clone of the session's current state (empty for unknown sessions).
    pub async fn snapshot(&self, session_id: &str) -> ConversationState {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Apply a mutation atomically under the write lock.
    pub async fn update<T>(
        &self,
        session_id: &str,
        apply: impl FnOnce(&mut ConversationState) -> T,
    ) -> T {
        let mut sessions = self.sessions.write().await;
        let state = sessions.entry(session_id.to_string()).or_default();
        apply(state)
    }

    pub async fn reset(&self, session_id: &str) {
        self.update(session_id, |state| state.reset()).await;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
