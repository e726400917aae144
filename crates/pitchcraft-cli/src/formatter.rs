//! Terminal rendering of assistant responses.
//!
//! Deck and evaluation payloads arrive as a JSON object embedded in a
//! natural-language response; the first top-level `{...}` span is parsed
//! independently of the surrounding prose.

use owo_colors::OwoColorize;
use serde_json::Value;

use pitchcraft_core::output::first_json_object;
use pitchcraft_core::types::{PitchDeck, PitchDeckAnalysis, RefinementArea};

/// Render one assistant response for the terminal.
pub fn format_response(response: &str) -> String {
    let Some(span) = first_json_object(response) else {
        return response.to_string();
    };
    let Ok(payload) = serde_json::from_str::<Value>(span) else {
        return response.to_string();
    };

    let prose = response[..response.find(span).unwrap_or(0)].trim();
    let mut out = String::new();
    if !prose.is_empty() {
        out.push_str(prose);
        out.push_str("\n\n");
    }

    if let Some(deck_value) = payload.get("pitchDeck") {
        if let Ok(deck) = serde_json::from_value::<PitchDeck>(deck_value.clone()) {
            out.push_str(&format_deck(&deck));
        }
        if let Ok(analysis) =
            serde_json::from_value::<PitchDeckAnalysis>(payload["analysis"].clone())
        {
            out.push_str(&format_analysis(&analysis));
        }
    } else if let Ok(areas) =
        serde_json::from_value::<Vec<RefinementArea>>(payload["refinementAreas"].clone())
    {
        out.push_str(&format_refinement_areas(&areas));
    }

    if let Some(remaining) = payload.get("questionsRemaining").and_then(Value::as_u64) {
        out.push_str(&format!("\nQuestions remaining: {}\n", remaining));
    }
    if out.trim().is_empty() {
        response.to_string()
    } else {
        out
    }
}

pub fn format_deck(deck: &PitchDeck) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("=== {} ===", deck.company_name).bold().green()
    ));
    for slide in &deck.slides {
        out.push_str(&format!(
            "\n{} {}\n",
            format!("Slide {}:", slide.slide_number).bold(),
            slide.title.cyan()
        ));
        out.push_str(&format!("  {}\n", slide.content));
        if let Some(points) = &slide.key_points {
            for point in points {
                out.push_str(&format!("  - {}\n", point));
            }
        }
    }
    out
}

pub fn format_analysis(analysis: &PitchDeckAnalysis) -> String {
    let mut out = String::new();
    if !analysis.strengths.is_empty() {
        out.push_str(&format!("\n{}\n", "Strengths".bold().green()));
        for item in &analysis.strengths {
            out.push_str(&format!("  + {}\n", item));
        }
    }
    if !analysis.weaknesses.is_empty() {
        out.push_str(&format!("\n{}\n", "Weaknesses".bold().red()));
        for item in &analysis.weaknesses {
            out.push_str(&format!("  - {}\n", item));
        }
    }
    if !analysis.suggestions.is_empty() {
        out.push_str(&format!("\n{}\n", "Suggestions".bold().yellow()));
        for item in &analysis.suggestions {
            out.push_str(&format!("  * {}\n", item));
        }
    }
    out
}

pub fn format_refinement_areas(areas: &[RefinementArea]) -> String {
    if areas.is_empty() {
        return "All topics look sufficiently covered. Ask me to generate the deck!\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Areas needing refinement".bold().yellow()));
    for area in areas {
        out.push_str(&format!(
            "\n  {} ({:?} priority)\n",
            area.topic.bold(),
            area.priority
        ));
        out.push_str(&format!("    Current: {}\n", area.current_understanding));
        for question in &area.suggested_questions {
            out.push_str(&format!("    ? {}\n", question));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchcraft_core::types::Priority;

    #[test]
    fn prose_without_json_passes_through() {
        let text = "Tell me more about your startup.";
        assert_eq!(format_response(text), text);
    }

    #[test]
    fn refinement_payload_lists_topics() {
        let response = r#"Evaluation done. {"refinementAreas": [{"topic": "Team", "currentUnderstanding": "Not provided", "suggestedQuestions": ["Who is on the team?"], "priority": "medium"}], "questionsRemaining": 6}"#;
        let formatted = format_response(response);
        assert!(formatted.contains("Team"));
        assert!(formatted.contains("Not provided"));
        assert!(formatted.contains("Questions remaining: 6"));
    }

    #[test]
    fn empty_refinement_list_invites_generation() {
        let formatted = format_refinement_areas(&[]);
        assert!(formatted.contains("generate the deck"));
    }

    #[test]
    fn refinement_area_priority_renders() {
        let areas = vec![RefinementArea {
            topic: "Funding Ask".to_string(),
            current_understanding: "Not provided".to_string(),
            suggested_questions: vec!["How much funding are you seeking?".to_string()],
            priority: Priority::Low,
        }];
        let formatted = format_refinement_areas(&areas);
        assert!(formatted.contains("Funding Ask"));
        assert!(formatted.contains("Low priority"));
    }
}
