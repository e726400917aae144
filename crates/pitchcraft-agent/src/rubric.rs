//! Static rubric of the eight pitch-deck topics.
//!
//! Single source of truth for display names, sufficiency thresholds,
//! priorities, interview questions, retrieval queries, follow-up questions
//! and fallback trigger keywords. Consumed by the extractor, evaluator,
//! renderer, analyzer and tools so none of these literals are duplicated.

use pitchcraft_core::types::{Priority, Topic};

/// Fixed configuration for one rubric topic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopicSpec {
    pub topic: Topic,
    pub display_name: &'static str,
    /// A snippet strictly shorter than this is insufficient.
    pub min_length: usize,
    pub priority: Priority,
    /// The upfront interview question for this topic.
    pub question: &'static str,
    /// Query string used against the knowledge retrieval service.
    pub guidance_query: &'static str,
    /// Follow-up questions attached to a refinement area.
    pub suggested_questions: [&'static str; 3],
    /// Lower-cased substrings that trigger fallback extraction.
    pub triggers: &'static [&'static str],
}

pub static RUBRIC: [TopicSpec; 8] = [
    TopicSpec {
        topic: Topic::Problem,
        display_name: "Problem Statement",
        min_length: 50,
        priority: Priority::High,
        question: "What specific problem are you solving? Who experiences this pain point?",
        guidance_query: "problem statement pitch deck clear urgent",
        suggested_questions: [
            "What specific pain point are you addressing?",
            "How do people currently solve this problem?",
            "What makes this problem urgent and important?",
        ],
        triggers: &[
            "problem", "solve", "pain", "waste", "hunger", "food", "issue", "challenge",
            "insecurity",
        ],
    },
    TopicSpec {
        topic: Topic::Solution,
        display_name: "Solution",
        min_length: 30,
        priority: Priority::High,
        question: "How does your solution work? What makes it unique?",
        guidance_query: "solution simple clear pitch deck",
        suggested_questions: [
            "How does your solution work in simple terms?",
            "What are the key features of your product?",
            "How does it solve the problem better than existing solutions?",
        ],
        triggers: &[
            "solution", "platform", "app", "tool", "connect", "service", "system", "product",
            "win win",
        ],
    },
    TopicSpec {
        topic: Topic::Market,
        display_name: "Market Opportunity",
        min_length: 40,
        priority: Priority::High,
        question: "What's your target market? How big is this opportunity? (Include numbers if possible)",
        guidance_query: "market size opportunity TAM SAM",
        suggested_questions: [
            "Who are your target customers?",
            "What's the total addressable market size?",
            "How will you reach your customers?",
        ],
        triggers: &[
            "market", "customer", "user", "billion", "million", "people", "restaurant",
            "business", "industry", "demographic", "audience", "big cities",
        ],
    },
    TopicSpec {
        topic: Topic::BusinessModel,
        display_name: "Business Model",
        min_length: 30,
        priority: Priority::Medium,
        question: "How do you plan to make money? What's your revenue model?",
        guidance_query: "business model revenue monetization",
        suggested_questions: [
            "How do you generate revenue?",
            "What's your pricing strategy?",
            "What are your customer acquisition costs?",
        ],
        triggers: &[
            "revenue", "subscription", "freemium", "saas", "money", "make money", "pricing",
            "fee", "commission", "charge", "advertise",
        ],
    },
    TopicSpec {
        topic: Topic::CompetitiveAdvantage,
        display_name: "Competitive Advantage",
        min_length: 30,
        priority: Priority::Medium,
        question: "What's your competitive advantage? Why can't others easily copy this?",
        guidance_query: "competitive advantage moat barrier",
        suggested_questions: [
            "What makes you unique?",
            "What barriers to entry do you have?",
            "How do you protect your competitive position?",
        ],
        triggers: &[
            "unique", "advantage", "different", "patent", "special", "exclusive",
            "proprietary", "barrier", "owner", "nyc", "community", "community ties",
            "restaurant owner",
        ],
    },
    TopicSpec {
        topic: Topic::Team,
        display_name: "Team",
        min_length: 20,
        priority: Priority::Medium,
        question: "Tell me about your team. What relevant experience do you have?",
        guidance_query: "team founder experience background",
        suggested_questions: [
            "What relevant experience do you have?",
            "Why is your team uniquely qualified?",
            "What key roles do you need to fill?",
        ],
        triggers: &[
            "team", "founder", "experience", "background", "expertise", "skill", "cto",
            "myself",
        ],
    },
    TopicSpec {
        topic: Topic::Traction,
        display_name: "Traction",
        min_length: 20,
        priority: Priority::Low,
        question: "What traction do you have so far? Users, revenue, partnerships?",
        guidance_query: "traction metrics growth validation",
        suggested_questions: [
            "What metrics demonstrate product-market fit?",
            "What's your growth rate?",
            "What partnerships or customers do you have?",
        ],
        triggers: &[
            "traction", "users", "growth", "revenue", "customers", "partnership",
            "milestone", "metric", "1000", "$10,000", "$10000",
        ],
    },
    TopicSpec {
        topic: Topic::FundingAsk,
        display_name: "Funding Ask",
        min_length: 20,
        priority: Priority::Low,
        question: "How much funding are you seeking and what will you use it for?",
        guidance_query: "funding ask amount use of funds",
        suggested_questions: [
            "How much funding are you seeking?",
            "What will you use the funds for?",
            "What's your valuation and terms?",
        ],
        triggers: &[
            "funding", "raise", "investment", "dollar", "money", "capital", "seed",
            "series", "expand", "marketing",
        ],
    },
];

/// Look up the spec for a topic. The table covers every `Topic` variant.
pub fn spec_for(topic: Topic) -> &'static TopicSpec {
    RUBRIC
        .iter()
        .find(|spec| spec.topic == topic)
        .expect("rubric covers all topics")
}

/// Look up a spec by display name, as refinement areas carry display names.
pub fn spec_for_display_name(name: &str) -> Option<&'static TopicSpec> {
    RUBRIC.iter().find(|spec| spec.display_name == name)
}
