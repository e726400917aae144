//! Pitch deck synthesis engine.
//!
//! Turns a free-text startup description into a structured, critiqued
//! pitch-deck artifact: topic-tagged fact extraction (with a deterministic
//! keyword fallback), rubric-based sufficiency evaluation, a fixed
//! 11-slide deck rendering, and a qualitative analysis. Conversation state
//! is keyed by session id; state for one session survives for the life of
//! the process and resets on demand.

pub mod analysis;
pub mod deck;
pub mod evaluator;
pub mod extractor;
pub mod orchestrator;
pub mod rubric;
pub mod state;
pub mod tools;

pub use analysis::analyze_deck;
pub use deck::{generate_slides, render_deck};
pub use evaluator::{Evaluation, RefinementEvaluator};
pub use extractor::{Decoded, Extraction, TopicExtractor};
pub use orchestrator::SessionOrchestrator;
pub use rubric::{spec_for, TopicSpec, RUBRIC};
pub use state::{ConversationState, SessionStore, MAX_QUESTIONS};
pub use tools::{PitchDeckTools, ToolExecutor, ToolRegistry};
