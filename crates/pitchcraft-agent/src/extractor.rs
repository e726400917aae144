//! Topic extraction from a free-text startup description.
//!
//! Primary path asks the language model facility for a JSON object with one
//! key per rubric topic; any failure (transport, timeout, malformed output)
//! degrades to deterministic keyword matching. Extraction never returns an
//! error to the caller.

use std::sync::Arc;

use log::warn;
use serde_json::Value;

use pitchcraft_core::output::strip_code_fences;
use pitchcraft_core::traits::Engine;
use pitchcraft_core::types::{StartupIdea, Topic};

use crate::rubric::RUBRIC;

/// Result of one extraction pass over a single user submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub facts: StartupIdea,
    pub covered: Vec<Topic>,
}

/// Outcome of decoding a model completion into an extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Parsed(Extraction),
    Malformed,
}

pub struct TopicExtractor {
    engine: Arc<dyn Engine>,
}

impl TopicExtractor {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Extract topic-tagged facts from a free-text submission.
    ///
    /// Pure with respect to conversation state; the caller merges the
    /// result. Never fails: internal errors degrade to the fallback path.
    pub async fn extract(&self, text: &str) -> Extraction {
        let prompt = build_extraction_prompt(text);
        match self.engine.complete(&prompt, &[]).await {
            Ok(raw) => match decode_completion(&raw) {
                Decoded::Parsed(extraction) => extraction,
                Decoded::Malformed => {
                    warn!("Extraction completion did not parse, using keyword fallback");
                    keyword_fallback(text)
                }
            },
            Err(err) => {
                warn!("Extraction completion failed ({}), using keyword fallback", err);
                keyword_fallback(text)
            }
        }
    }
}

fn build_extraction_prompt(text: &str) -> String {
    let mut categories = String::new();
    for (index, spec) in RUBRIC.iter().enumerate() {
        categories.push_str(&format!(
            "{}. {} - {}\n",
            index + 1,
            spec.display_name,
            spec.question
        ));
    }
    let mut keys = String::new();
    for spec in &RUBRIC {
        keys.push_str(&format!("  \"{}\": \"extracted text or null\",\n", spec.topic.key()));
    }
    format!(
        "Analyze the following startup description and extract relevant information for a pitch deck.\n\n\
         User's description: \"{text}\"\n\n\
         Extract information for the following categories. For each category, provide the relevant \
         text from the user's description, or null if it is not mentioned:\n\n\
         {categories}\n\
         Respond with ONLY a valid JSON object like this (no markdown formatting, no code blocks):\n\
         {{\n{keys}  \"topicsCovered\": [\"list\", \"of\", \"covered\", \"topic\", \"keys\"]\n}}"
    )
}

/// Decode a completion into extraction results.
///
/// Strips surrounding code fences, then requires a JSON object. Keys with
/// non-null, non-empty string values populate facts and are marked covered;
/// the model's own `topicsCovered` list is unioned in.
pub fn decode_completion(raw: &str) -> Decoded {
    let stripped = strip_code_fences(raw);
    let value: Value = match serde_json::from_str(stripped) {
        Ok(value) => value,
        Err(_) => return Decoded::Malformed,
    };
    let object = match value.as_object() {
        Some(object) => object,
        None => return Decoded::Malformed,
    };

    let mut extraction = Extraction::default();
    for spec in &RUBRIC {
        if let Some(snippet) = object.get(spec.topic.key()).and_then(Value::as_str) {
            if !snippet.trim().is_empty() && snippet != "null" {
                extraction.facts.set(spec.topic, snippet);
                extraction.covered.push(spec.topic);
            }
        }
    }
    if let Some(listed) = object.get("topicsCovered").and_then(Value::as_array) {
        for entry in listed {
            if let Some(topic) = entry.as_str().and_then(Topic::from_key) {
                if !extraction.covered.contains(&topic) {
                    extraction.covered.push(topic);
                }
            }
        }
    }
    Decoded::Parsed(extraction)
}

/// Deterministic keyword-based extraction.
///
/// Each topic whose trigger list matches the lower-cased input gets the
/// entire submission verbatim. One comprehensive answer is expected to
/// cover several topics at once.
pub fn keyword_fallback(text: &str) -> Extraction {
    let lower = text.to_lowercase();
    let mut extraction = Extraction::default();
    for spec in &RUBRIC {
        if spec.triggers.iter().any(|trigger| lower.contains(trigger)) {
            extraction.facts.set(spec.topic, text);
            extraction.covered.push(spec.topic);
        }
    }
    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESTAURANT_PITCH: &str = "We help restaurants reduce food waste by connecting them \
         with local charities for pickup donations, serving a market of 1 million restaurants, \
         charging a monthly subscription fee";

    #[test]
    fn fallback_marks_problem_for_problem_solve_text() {
        let text = "Our problem is hard to solve: commuters lose two hours every day in traffic.";
        assert!(text.len() >= 50);
        let extraction = keyword_fallback(text);
        assert!(extraction.covered.contains(&Topic::Problem));
        assert_eq!(extraction.facts.get(Topic::Problem), Some(text));
    }

    #[test]
    fn fallback_covers_multiple_topics_from_one_submission() {
        let extraction = keyword_fallback(RESTAURANT_PITCH);
        for topic in [Topic::Problem, Topic::Solution, Topic::Market, Topic::BusinessModel] {
            assert!(extraction.covered.contains(&topic), "missing {:?}", topic);
            assert_eq!(extraction.facts.get(topic), Some(RESTAURANT_PITCH));
        }
        for topic in [Topic::Team, Topic::Traction, Topic::FundingAsk, Topic::CompetitiveAdvantage] {
            assert!(!extraction.covered.contains(&topic), "unexpected {:?}", topic);
        }
    }

    #[test]
    fn decode_accepts_fenced_json() {
        let raw = "```json\n{\"problem\": \"food waste\", \"solution\": null, \
                   \"topicsCovered\": [\"problem\", \"market\"]}\n```";
        match decode_completion(raw) {
            Decoded::Parsed(extraction) => {
                assert_eq!(extraction.facts.get(Topic::Problem), Some("food waste"));
                assert_eq!(extraction.facts.get(Topic::Solution), None);
                assert_eq!(extraction.covered, vec![Topic::Problem, Topic::Market]);
            }
            Decoded::Malformed => panic!("expected parse"),
        }
    }

    #[test]
    fn decode_accepts_bare_json() {
        let raw = "{\"team\": \"two ex-chefs\"}";
        match decode_completion(raw) {
            Decoded::Parsed(extraction) => {
                assert_eq!(extraction.facts.get(Topic::Team), Some("two ex-chefs"));
                assert_eq!(extraction.covered, vec![Topic::Team]);
            }
            Decoded::Malformed => panic!("expected parse"),
        }
    }

    #[test]
    fn decode_rejects_prose_and_non_objects() {
        assert_eq!(decode_completion("Sure! Here is the analysis."), Decoded::Malformed);
        assert_eq!(decode_completion("[1, 2, 3]"), Decoded::Malformed);
    }

    #[test]
    fn decode_skips_empty_and_null_sentinels() {
        let raw = "{\"problem\": \"\", \"traction\": \"null\", \"market\": \"1 billion users\"}";
        match decode_completion(raw) {
            Decoded::Parsed(extraction) => {
                assert_eq!(extraction.covered, vec![Topic::Market]);
                assert!(extraction.facts.get(Topic::Problem).is_none());
                assert!(extraction.facts.get(Topic::Traction).is_none());
            }
            Decoded::Malformed => panic!("expected parse"),
        }
    }

    #[test]
    fn prompt_mentions_every_topic_key() {
        let prompt = build_extraction_prompt("we fix food waste");
        for topic in Topic::ALL {
            assert!(prompt.contains(topic.key()), "prompt missing {}", topic.key());
        }
        assert!(prompt.contains("topicsCovered"));
    }
}
