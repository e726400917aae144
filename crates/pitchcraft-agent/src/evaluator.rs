//! Sufficiency evaluation of extracted facts against the rubric.

use std::sync::Arc;

use pitchcraft_core::traits::Retriever;
use pitchcraft_core::types::{RefinementArea, StartupIdea, Topic};

use crate::rubric::{spec_for, RUBRIC};

/// How many characters of retrieved guidance are kept per principle.
const GUIDANCE_EXCERPT_CHARS: usize = 100;

/// Result of one evaluation pass. Recomputed wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub refinement_areas: Vec<RefinementArea>,
    pub applied_principles: Vec<String>,
}

pub struct RefinementEvaluator {
    retriever: Arc<dyn Retriever>,
}

impl RefinementEvaluator {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }

    /// Walk the rubric in canonical order, collecting guidance for every
    /// topic and a refinement area for each insufficient one.
    ///
    /// The retriever is best-effort, so a broken retrieval backend yields a
    /// placeholder principle for that topic and the pass continues.
    pub async fn evaluate(&self, facts: &StartupIdea) -> Evaluation {
        let mut evaluation = Evaluation::default();
        for spec in &RUBRIC {
            let guidance = self.retriever.search(spec.guidance_query).await;
            evaluation.applied_principles.push(format!(
                "{}: {}...",
                spec.display_name,
                truncate_chars(&guidance, GUIDANCE_EXCERPT_CHARS)
            ));

            if is_insufficient(spec.topic, facts) {
                evaluation.refinement_areas.push(RefinementArea {
                    topic: spec.display_name.to_string(),
                    current_understanding: facts
                        .get(spec.topic)
                        .unwrap_or("Not provided")
                        .to_string(),
                    suggested_questions: spec
                        .suggested_questions
                        .iter()
                        .map(|q| q.to_string())
                        .collect(),
                    priority: spec.priority,
                });
            }
        }
        evaluation
    }
}

/// A topic is insufficient when its fact is absent or its snippet is
/// strictly shorter than the topic's minimum length.
pub fn is_insufficient(topic: Topic, facts: &StartupIdea) -> bool {
    let spec = spec_for(topic);
    match facts.get(topic) {
        Some(snippet) => snippet.chars().count() < spec.min_length,
        None => true,
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pitchcraft_core::types::Priority;

    struct StubRetriever;

    #[async_trait]
    impl Retriever for StubRetriever {
        async fn search(&self, query: &str) -> String {
            format!("Guidance for {}", query)
        }
    }

    /// Simulates the retrieval backend erroring for market queries only.
    struct MarketOutageRetriever;

    #[async_trait]
    impl Retriever for MarketOutageRetriever {
        async fn search(&self, query: &str) -> String {
            if query.contains("market") {
                "Unable to retrieve relevant documents at this time.".to_string()
            } else {
                format!("Guidance for {}", query)
            }
        }
    }

    fn facts_with(entries: &[(Topic, &str)]) -> StartupIdea {
        let mut facts = StartupIdea::default();
        for (topic, value) in entries {
            facts.set(*topic, *value);
        }
        facts
    }

    #[tokio::test]
    async fn empty_facts_flag_all_eight_topics() {
        let evaluator = RefinementEvaluator::new(Arc::new(StubRetriever));
        let evaluation = evaluator.evaluate(&StartupIdea::default()).await;
        assert_eq!(evaluation.refinement_areas.len(), 8);
        assert_eq!(evaluation.applied_principles.len(), 8);
        for area in &evaluation.refinement_areas {
            assert_eq!(area.current_understanding, "Not provided");
            assert_eq!(area.suggested_questions.len(), 3);
        }
    }

    #[tokio::test]
    async fn refinement_gate_matches_thresholds() {
        let long_problem = "a".repeat(60);
        let facts = facts_with(&[
            (Topic::Problem, &long_problem),
            (Topic::Solution, "too short"),
            (Topic::Team, "experienced founding pair here"),
        ]);
        let evaluator = RefinementEvaluator::new(Arc::new(StubRetriever));
        let evaluation = evaluator.evaluate(&facts).await;

        let flagged: Vec<&str> = evaluation
            .refinement_areas
            .iter()
            .map(|a| a.topic.as_str())
            .collect();
        assert!(!flagged.contains(&"Problem Statement"));
        assert!(flagged.contains(&"Solution"));
        assert!(!flagged.contains(&"Team"));
        assert!(flagged.contains(&"Market Opportunity"));

        // present-but-short snippet is preserved verbatim
        let solution = evaluation
            .refinement_areas
            .iter()
            .find(|a| a.topic == "Solution")
            .unwrap();
        assert_eq!(solution.current_understanding, "too short");
        assert_eq!(solution.priority, Priority::High);
    }

    #[tokio::test]
    async fn ordering_follows_canonical_topic_order() {
        let evaluator = RefinementEvaluator::new(Arc::new(StubRetriever));
        let evaluation = evaluator.evaluate(&StartupIdea::default()).await;
        let order: Vec<String> = evaluation
            .refinement_areas
            .iter()
            .map(|a| a.topic.clone())
            .collect();
        assert_eq!(
            order,
            vec![
                "Problem Statement",
                "Solution",
                "Market Opportunity",
                "Business Model",
                "Competitive Advantage",
                "Team",
                "Traction",
                "Funding Ask"
            ]
        );
        assert!(evaluation.applied_principles[0].starts_with("Problem Statement: "));
    }

    #[tokio::test]
    async fn evaluation_is_idempotent() {
        let facts = facts_with(&[(Topic::Traction, "1000 paying restaurants")]);
        let evaluator = RefinementEvaluator::new(Arc::new(StubRetriever));
        let first = evaluator.evaluate(&facts).await;
        let second = evaluator.evaluate(&facts).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn market_retrieval_outage_does_not_abort_the_pass() {
        let evaluator = RefinementEvaluator::new(Arc::new(MarketOutageRetriever));
        let evaluation = evaluator.evaluate(&StartupIdea::default()).await;
        assert_eq!(evaluation.refinement_areas.len(), 8);
        assert_eq!(evaluation.applied_principles.len(), 8);
        assert!(evaluation.applied_principles[2].contains("Unable to retrieve"));
        assert!(evaluation.applied_principles[3].starts_with("Business Model: Guidance"));
    }

    #[test]
    fn guidance_truncation_is_unicode_safe() {
        let guidance = "é".repeat(150);
        let excerpt = truncate_chars(&guidance, 100);
        assert_eq!(excerpt.chars().count(), 100);
    }
}
