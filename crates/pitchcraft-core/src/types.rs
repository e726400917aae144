use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The eight fixed pitch-deck subject areas a startup description is
/// scored against. Order of `ALL` is canonical and drives evaluation,
/// refinement-area ordering, and applied-principles ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Topic {
    Problem,
    Solution,
    Market,
    BusinessModel,
    CompetitiveAdvantage,
    Team,
    Traction,
    FundingAsk,
}

impl Topic {
    /// All topics in canonical order.
    pub const ALL: [Topic; 8] = [
        Topic::Problem,
        Topic::Solution,
        Topic::Market,
        Topic::BusinessModel,
        Topic::CompetitiveAdvantage,
        Topic::Team,
        Topic::Traction,
        Topic::FundingAsk,
    ];

    /// The camelCase wire key used in extraction payloads and covered-topic lists.
    pub fn key(&self) -> &'static str {
        match self {
            Topic::Problem => "problem",
            Topic::Solution => "solution",
            Topic::Market => "market",
            Topic::BusinessModel => "businessModel",
            Topic::CompetitiveAdvantage => "competitiveAdvantage",
            Topic::Team => "team",
            Topic::Traction => "traction",
            Topic::FundingAsk => "fundingAsk",
        }
    }

    pub fn from_key(key: &str) -> Option<Topic> {
        Topic::ALL.iter().copied().find(|t| t.key() == key)
    }
}

/// Priority class of a rubric topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Incrementally built mapping of rubric topic to extracted snippet.
/// Absent fields mean the topic has not been provided yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupIdea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitive_advantage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_ask: Option<String>,
}

impl StartupIdea {
    pub fn get(&self, topic: Topic) -> Option<&str> {
        let field = match topic {
            Topic::Problem => &self.problem,
            Topic::Solution => &self.solution,
            Topic::Market => &self.target_market,
            Topic::BusinessModel => &self.business_model,
            Topic::CompetitiveAdvantage => &self.competitive_advantage,
            Topic::Team => &self.team,
            Topic::Traction => &self.traction,
            Topic::FundingAsk => &self.funding_ask,
        };
        field.as_deref()
    }

    /// Store a snippet for a topic. Empty values are ignored so that a
    /// later extraction pass can never erase a previously provided fact.
    pub fn set(&mut self, topic: Topic, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        let field = match topic {
            Topic::Problem => &mut self.problem,
            Topic::Solution => &mut self.solution,
            Topic::Market => &mut self.target_market,
            Topic::BusinessModel => &mut self.business_model,
            Topic::CompetitiveAdvantage => &mut self.competitive_advantage,
            Topic::Team => &mut self.team,
            Topic::Traction => &mut self.traction,
            Topic::FundingAsk => &mut self.funding_ask,
        };
        *field = Some(value);
    }

    /// Merge another idea into this one. Non-empty incoming values win;
    /// absent incoming values leave existing facts untouched.
    pub fn merge(&mut self, other: &StartupIdea) {
        for topic in Topic::ALL {
            if let Some(value) = other.get(topic) {
                self.set(topic, value);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        Topic::ALL.iter().all(|t| self.get(*t).is_none())
    }
}

/// A rubric topic flagged as insufficiently covered, with follow-up
/// questions the founder should answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementArea {
    pub topic: String,
    pub current_understanding: String,
    pub suggested_questions: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchDeckSlide {
    pub slide_number: u32,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
}

/// Immutable rendered deck. A new render always produces a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchDeck {
    pub company_name: String,
    pub slides: Vec<PitchDeckSlide>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchDeckAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub startup_principles: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in the conversation delivered by the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_keys_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_key(topic.key()), Some(topic));
        }
        assert_eq!(Topic::from_key("goToMarket"), None);
    }

    #[test]
    fn canonical_order_is_stable() {
        assert_eq!(Topic::ALL[0], Topic::Problem);
        assert_eq!(Topic::ALL[7], Topic::FundingAsk);
    }

    #[test]
    fn set_ignores_empty_values() {
        let mut idea = StartupIdea::default();
        idea.set(Topic::Problem, "restaurants waste food");
        idea.set(Topic::Problem, "  ");
        assert_eq!(idea.get(Topic::Problem), Some("restaurants waste food"));
    }

    #[test]
    fn merge_keeps_existing_facts() {
        let mut base = StartupIdea::default();
        base.set(Topic::Team, "two founders with restaurant experience");

        let mut update = StartupIdea::default();
        update.set(Topic::Traction, "1000 users");
        base.merge(&update);

        assert_eq!(base.get(Topic::Team), Some("two founders with restaurant experience"));
        assert_eq!(base.get(Topic::Traction), Some("1000 users"));
    }

    #[test]
    fn idea_serializes_with_camel_case_keys() {
        let mut idea = StartupIdea::default();
        idea.set(Topic::Market, "1 million restaurants");
        idea.set(Topic::FundingAsk, "raising $500k");
        let json = serde_json::to_value(&idea).unwrap();
        assert!(json.get("targetMarket").is_some());
        assert!(json.get("fundingAsk").is_some());
        assert!(json.get("problem").is_none());
    }
}
