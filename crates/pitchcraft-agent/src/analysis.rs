//! Qualitative deck analysis, derived from the same facts and refinement
//! flags as the renderer but independent of slide text.

use pitchcraft_core::types::{PitchDeckAnalysis, RefinementArea, StartupIdea, Topic};

use crate::evaluator::is_insufficient;
use crate::rubric::spec_for;

/// One dedicated strength/weakness check.
struct PrincipleCheck {
    topic: Topic,
    /// Keyword looked up in the aggregated applied-principles text.
    keyword: &'static str,
    principle: &'static str,
    strength: &'static str,
    weakness: &'static str,
    suggestion: &'static str,
}

/// Only five topics get dedicated checks; businessModel,
/// competitiveAdvantage and fundingAsk are reflected solely through the
/// refinement-area suggestion pass. That asymmetry is a scope limit of the
/// rubric, carried over as-is.
static CHECKS: [PrincipleCheck; 5] = [
    PrincipleCheck {
        topic: Topic::Problem,
        keyword: "problem",
        principle: "Focus on a clear, urgent problem",
        strength: "Problem is well-articulated",
        weakness: "Problem statement needs refinement",
        suggestion: "Make the problem more concrete with specific examples",
    },
    PrincipleCheck {
        topic: Topic::Solution,
        keyword: "solution",
        principle: "Simple, clear solution",
        strength: "Solution is well-defined",
        weakness: "Solution needs more detail",
        suggestion: "Explain how your solution works in simple terms",
    },
    PrincipleCheck {
        topic: Topic::Market,
        keyword: "market",
        principle: "Large market opportunity",
        strength: "Market size is quantified",
        weakness: "Market size not clearly quantified",
        suggestion: "Include specific market size numbers",
    },
    PrincipleCheck {
        topic: Topic::Team,
        keyword: "team",
        principle: "Strong founding team",
        strength: "Team background is described",
        weakness: "Team section needs more detail",
        suggestion: "Highlight relevant experience and achievements",
    },
    PrincipleCheck {
        topic: Topic::Traction,
        keyword: "traction",
        principle: "Show traction and progress",
        strength: "Traction is demonstrated",
        weakness: "Traction metrics are missing",
        suggestion: "Include specific growth metrics and milestones",
    },
];

fn is_flagged(areas: &[RefinementArea], topic: Topic) -> bool {
    let display_name = spec_for(topic).display_name;
    areas.iter().any(|area| area.topic == display_name)
}

/// Derive strengths, weaknesses, suggestions and applied principles.
pub fn analyze_deck(
    facts: &StartupIdea,
    areas: &[RefinementArea],
    applied_principles: &[String],
) -> PitchDeckAnalysis {
    let principles_text = applied_principles.join(" ").to_lowercase();
    let mut analysis = PitchDeckAnalysis::default();

    for check in &CHECKS {
        if !principles_text.contains(check.keyword) {
            continue;
        }
        analysis.startup_principles.push(check.principle.to_string());

        let mut is_strength = !is_insufficient(check.topic, facts) && !is_flagged(areas, check.topic);
        if check.topic == Topic::Market {
            // Market strength additionally requires a quantified size.
            // This intentionally disagrees with the evaluator's pure length
            // gate; both rules are preserved from the source behavior.
            let quantified = facts
                .get(Topic::Market)
                .map(|m| m.contains("billion") || m.contains("million"))
                .unwrap_or(false);
            is_strength = is_strength && quantified;
        }

        if is_strength {
            analysis.strengths.push(check.strength.to_string());
        } else {
            analysis.weaknesses.push(check.weakness.to_string());
            analysis.suggestions.push(check.suggestion.to_string());
        }
    }

    for area in areas {
        if let Some(first_question) = area.suggested_questions.first() {
            analysis
                .suggestions
                .push(format!("{}: {}", area.topic, first_question));
        }
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchcraft_core::types::Priority;

    fn principles_for_all() -> Vec<String> {
        vec![
            "Problem Statement: lead with the pain...".to_string(),
            "Solution: keep it simple...".to_string(),
            "Market Opportunity: size the market...".to_string(),
            "Team: founders matter...".to_string(),
            "Traction: show momentum...".to_string(),
        ]
    }

    fn area_for(topic: Topic) -> RefinementArea {
        let spec = spec_for(topic);
        RefinementArea {
            topic: spec.display_name.to_string(),
            current_understanding: "Not provided".to_string(),
            suggested_questions: spec.suggested_questions.iter().map(|q| q.to_string()).collect(),
            priority: spec.priority,
        }
    }

    #[test]
    fn strong_facts_become_strengths() {
        let mut facts = StartupIdea::default();
        facts.set(Topic::Problem, "a".repeat(60));
        facts.set(Topic::Team, "two founders who ran restaurant kitchens");
        let analysis = analyze_deck(&facts, &[], &principles_for_all());
        assert!(analysis.strengths.contains(&"Problem is well-articulated".to_string()));
        assert!(analysis.strengths.contains(&"Team background is described".to_string()));
        assert!(analysis.weaknesses.contains(&"Traction metrics are missing".to_string()));
        assert_eq!(analysis.startup_principles.len(), 5);
    }

    #[test]
    fn market_strength_requires_quantification() {
        let mut facts = StartupIdea::default();
        facts.set(
            Topic::Market,
            "independent restaurants across every major metropolitan region",
        );
        let analysis = analyze_deck(&facts, &[], &principles_for_all());
        assert!(analysis
            .weaknesses
            .contains(&"Market size not clearly quantified".to_string()));

        facts.set(Topic::Market, "a market of 1 million restaurants in the US");
        let analysis = analyze_deck(&facts, &[], &principles_for_all());
        assert!(analysis.strengths.contains(&"Market size is quantified".to_string()));
    }

    #[test]
    fn flagged_topic_is_a_weakness_even_when_long() {
        let mut facts = StartupIdea::default();
        facts.set(Topic::Solution, "b".repeat(40));
        let areas = vec![area_for(Topic::Solution)];
        let analysis = analyze_deck(&facts, &areas, &principles_for_all());
        assert!(analysis.weaknesses.contains(&"Solution needs more detail".to_string()));
    }

    #[test]
    fn refinement_areas_append_first_question_suggestions_in_order() {
        let areas = vec![area_for(Topic::Team), area_for(Topic::FundingAsk)];
        let analysis = analyze_deck(&StartupIdea::default(), &areas, &principles_for_all());
        let tail: Vec<&String> = analysis.suggestions.iter().rev().take(2).rev().collect();
        assert_eq!(tail[0], "Team: What relevant experience do you have?");
        assert_eq!(tail[1], "Funding Ask: How much funding are you seeking?");
    }

    #[test]
    fn no_principles_text_means_no_dedicated_checks() {
        let analysis = analyze_deck(&StartupIdea::default(), &[], &[]);
        assert!(analysis.startup_principles.is_empty());
        assert!(analysis.strengths.is_empty());
        assert!(analysis.weaknesses.is_empty());
    }

    #[test]
    fn priority_survives_in_refinement_area_inputs() {
        let area = area_for(Topic::Problem);
        assert_eq!(area.priority, Priority::High);
    }
}
