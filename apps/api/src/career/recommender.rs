//! Employability Bridge — career recommendations tailored to learner metrics.
//!
//! The model gets the learner's aggregated insights; without a usable reply
//! the recommendation falls back to a threshold on the quiz average.

use serde::{Deserialize, Serialize};

use crate::analytics::insights::Insights;
use crate::career::prompts::CAREER_PROMPT_TEMPLATE;
use crate::llm_client::LlmClient;

/// Quiz average (percent) at which analyst-track roles are suggested.
const ANALYST_TRACK_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendations {
    pub roles: Vec<String>,
    pub skills: Vec<String>,
    pub internships: Vec<String>,
    pub resume_tips: Vec<String>,
    pub summary: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Deterministic recommendations keyed off the quiz average.
pub fn heuristic_recommendations(insights: &Insights) -> CareerRecommendations {
    let analyst_track = insights.quiz.avg_score_pct >= ANALYST_TRACK_THRESHOLD;

    let (roles, skills) = if analyst_track {
        (
            strings(&["Data Analyst", "Business Analyst", "Junior ML Engineer"]),
            strings(&["Python", "SQL", "Version Control", "Communication"]),
        )
    } else {
        (
            strings(&["Learning Associate", "Data Intern", "IT Support Intern"]),
            strings(&["Study Skills", "Problem Solving", "Python Basics", "Excel"]),
        )
    };

    CareerRecommendations {
        roles,
        skills,
        internships: strings(&[
            "Analytics Intern @ FinTech Co",
            "Data Ops Intern @ Retail Corp",
        ]),
        resume_tips: strings(&[
            "Quantify outcomes on resume",
            "Map projects to job skills",
            "Highlight continuous learning",
        ]),
        summary: "Focus on core skills and showcase projects aligned to roles.".to_string(),
    }
}

fn build_career_prompt(insights: &Insights) -> String {
    let tones = insights
        .interview
        .tones
        .iter()
        .map(|(tone, count)| format!("{tone}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");

    CAREER_PROMPT_TEMPLATE
        .replace("{avg_score}", &insights.quiz.avg_score_pct.to_string())
        .replace("{attempts}", &insights.quiz.total_attempts.to_string())
        .replace("{clarity}", &insights.interview.avg_clarity.to_string())
        .replace("{structure}", &insights.interview.avg_structure.to_string())
        .replace("{tones}", &format!("{{{tones}}}"))
}

/// AI recommendations when available, heuristics otherwise.
pub async fn recommend(llm: &LlmClient, insights: &Insights) -> CareerRecommendations {
    let prompt = build_career_prompt(insights);

    llm.complete_structured::<CareerRecommendations>(&prompt)
        .await
        .filter(|r| !r.roles.is_empty())
        .unwrap_or_else(|| heuristic_recommendations(insights))
}
