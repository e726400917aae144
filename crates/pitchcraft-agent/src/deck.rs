//! Deterministic rendering of the fixed 11-slide deck.

use chrono::Utc;

use pitchcraft_core::types::{PitchDeck, PitchDeckSlide, RefinementArea, StartupIdea, Topic};

use crate::rubric::spec_for;

const REFINE_POINT_1: &str = "Area needs refinement";
const REFINE_POINT_2: &str = "Consider the suggested questions";

/// Fixed layout of a fact-backed slide.
struct FactSlideSpec {
    number: u32,
    title: &'static str,
    topic: Topic,
    marker: &'static str,
    strong_points: [&'static str; 3],
    refine_hint: &'static str,
}

static FACT_SLIDES: [FactSlideSpec; 8] = [
    FactSlideSpec {
        number: 2,
        title: "The Problem",
        topic: Topic::Problem,
        marker: "⚠️ NEEDS REFINEMENT: Problem statement requires more clarity",
        strong_points: [
            "Clear articulation of the pain point",
            "Market size and urgency",
            "Why existing solutions fail",
        ],
        refine_hint: "Make problem more specific",
    },
    FactSlideSpec {
        number: 3,
        title: "The Solution",
        topic: Topic::Solution,
        marker: "⚠️ NEEDS REFINEMENT: Solution description requires more detail",
        strong_points: [
            "Simple, clear explanation",
            "Key features and benefits",
            "How it solves the problem",
        ],
        refine_hint: "Make solution more concrete",
    },
    FactSlideSpec {
        number: 4,
        title: "Market Opportunity",
        topic: Topic::Market,
        marker: "⚠️ NEEDS REFINEMENT: Market opportunity requires quantification",
        strong_points: [
            "Total Addressable Market (TAM)",
            "Serviceable Addressable Market (SAM)",
            "Serviceable Obtainable Market (SOM)",
        ],
        refine_hint: "Include market size numbers",
    },
    FactSlideSpec {
        number: 5,
        title: "Business Model",
        topic: Topic::BusinessModel,
        marker: "⚠️ NEEDS REFINEMENT: Business model requires more detail",
        strong_points: [
            "Revenue streams",
            "Pricing strategy",
            "Customer acquisition cost",
        ],
        refine_hint: "Clarify revenue streams",
    },
    FactSlideSpec {
        number: 6,
        title: "Competitive Advantage",
        topic: Topic::CompetitiveAdvantage,
        marker: "⚠️ NEEDS REFINEMENT: Competitive advantage needs clarification",
        strong_points: [
            "Unique technology or approach",
            "Network effects",
            "Barriers to entry",
        ],
        refine_hint: "Identify unique differentiators",
    },
    FactSlideSpec {
        number: 8,
        title: "Team",
        topic: Topic::Team,
        marker: "⚠️ NEEDS REFINEMENT: Team information requires more detail",
        strong_points: [
            "Founder backgrounds",
            "Relevant experience",
            "Why this team can execute",
        ],
        refine_hint: "Highlight relevant experience",
    },
    FactSlideSpec {
        number: 9,
        title: "Traction",
        topic: Topic::Traction,
        marker: "⚠️ NEEDS REFINEMENT: Traction metrics require more detail",
        strong_points: [
            "User growth metrics",
            "Revenue milestones",
            "Customer testimonials",
        ],
        refine_hint: "Include specific metrics",
    },
    FactSlideSpec {
        number: 11,
        title: "Funding Ask",
        topic: Topic::FundingAsk,
        marker: "⚠️ NEEDS REFINEMENT: Funding ask requires more detail",
        strong_points: [
            "Amount being raised",
            "Use of funds",
            "Valuation and terms",
        ],
        refine_hint: "Specify amount and use of funds",
    },
];

fn is_flagged(areas: &[RefinementArea], topic: Topic) -> bool {
    let display_name = spec_for(topic).display_name;
    areas.iter().any(|area| area.topic == display_name)
}

fn fact_slide(
    spec: &FactSlideSpec,
    facts: &StartupIdea,
    areas: &[RefinementArea],
) -> PitchDeckSlide {
    // Key-point choice is driven by the refinement flag, not fact presence:
    // a present-but-short fact keeps its verbatim content yet still gets the
    // refinement bullets.
    let content = facts
        .get(spec.topic)
        .map(str::to_string)
        .unwrap_or_else(|| spec.marker.to_string());
    let key_points = if is_flagged(areas, spec.topic) {
        vec![
            REFINE_POINT_1.to_string(),
            REFINE_POINT_2.to_string(),
            spec.refine_hint.to_string(),
        ]
    } else {
        spec.strong_points.iter().map(|p| p.to_string()).collect()
    };
    PitchDeckSlide {
        slide_number: spec.number,
        title: spec.title.to_string(),
        content,
        key_points: Some(key_points),
    }
}

/// Produce the fixed 11-slide sequence for the given facts.
pub fn generate_slides(
    company_name: &str,
    facts: &StartupIdea,
    areas: &[RefinementArea],
) -> Vec<PitchDeckSlide> {
    let problem = facts
        .get(Topic::Problem)
        .unwrap_or(FACT_SLIDES[0].marker);
    let mut slides = vec![PitchDeckSlide {
        slide_number: 1,
        title: "Company Name".to_string(),
        content: format!("[{}]\nA revolutionary solution to {}", company_name, problem),
        key_points: None,
    }];

    for spec in &FACT_SLIDES[..5] {
        slides.push(fact_slide(spec, facts, areas));
    }
    slides.push(PitchDeckSlide {
        slide_number: 7,
        title: "Go-to-Market Strategy".to_string(),
        content: "How we'll reach and acquire customers".to_string(),
        key_points: Some(vec![
            "Customer acquisition channels".to_string(),
            "Partnerships".to_string(),
            "Marketing strategy".to_string(),
        ]),
    });
    for spec in &FACT_SLIDES[5..7] {
        slides.push(fact_slide(spec, facts, areas));
    }
    slides.push(PitchDeckSlide {
        slide_number: 10,
        title: "Financial Projections".to_string(),
        content: "3-5 year revenue and growth projections".to_string(),
        key_points: Some(vec![
            "Revenue growth".to_string(),
            "Key metrics".to_string(),
            "Path to profitability".to_string(),
        ]),
    });
    slides.push(fact_slide(&FACT_SLIDES[7], facts, areas));

    slides
}

/// Render an immutable deck. The creation timestamp is the only
/// non-deterministic field.
pub fn render_deck(
    company_name: &str,
    facts: &StartupIdea,
    areas: &[RefinementArea],
) -> PitchDeck {
    PitchDeck {
        company_name: company_name.to_string(),
        slides: generate_slides(company_name, facts, areas),
        created_at: Utc::now(),
    }
}
