//! Interview Coach — mock questions and rubric feedback on answers.
//!
//! Feedback comes from the model when it returns a usable rubric, otherwise
//! from a fixed heuristic so the learner always gets something actionable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interview::prompts::{COACH_PROMPT_TEMPLATE, HR_QUESTION};
use crate::llm_client::LlmClient;

const DEFAULT_TOPIC: &str = "general";
const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewFeedback {
    pub summary: String,
    #[serde(default = "neutral_tone")]
    pub tone: String,
    #[serde(default)]
    pub clarity: f64,
    #[serde(default)]
    pub structure: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    Ai,
    Heuristic,
}

fn neutral_tone() -> String {
    "neutral".to_string()
}

/// A mock interview question for `topic`; "hr" gets a behavioural question.
pub fn interview_question(topic: Option<&str>) -> String {
    let topic = topic
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TOPIC)
        .to_lowercase();

    if topic == "hr" {
        return HR_QUESTION.to_string();
    }

    format!(
        "{} interview: Explain a key concept and provide a real-world example.",
        title_case(&topic)
    )
}

/// Fixed feedback used when the model is unavailable or the answer is blank.
pub fn heuristic_feedback() -> InterviewFeedback {
    InterviewFeedback {
        summary: "Good attempt. Add a concrete example and measurable impact.".to_string(),
        tone: neutral_tone(),
        clarity: 6.0,
        structure: 6.0,
        recommendations: vec![
            "Use STAR format (Situation, Task, Action, Result).".to_string(),
            "Replace filler words with confident phrasing.".to_string(),
            "Add metrics (e.g., reduced time by 20%).".to_string(),
        ],
    }
}

/// Rubric feedback on `answer`, and where it came from.
pub async fn coach_answer(llm: &LlmClient, answer: &str) -> (InterviewFeedback, FeedbackSource) {
    let answer = answer.trim();
    if answer.is_empty() {
        debug!("Blank interview answer; using heuristic feedback");
        return (heuristic_feedback(), FeedbackSource::Heuristic);
    }

    let prompt = COACH_PROMPT_TEMPLATE.replace("{answer}", answer);

    match llm
        .complete_structured::<InterviewFeedback>(&prompt)
        .await
        .and_then(normalize_feedback)
    {
        Some(feedback) => (feedback, FeedbackSource::Ai),
        None => (heuristic_feedback(), FeedbackSource::Heuristic),
    }
}

/// Rejects empty summaries and clamps scores into the 0–10 rubric range.
fn normalize_feedback(mut feedback: InterviewFeedback) -> Option<InterviewFeedback> {
    if feedback.summary.trim().is_empty() {
        return None;
    }
    feedback.clarity = clamp_score(feedback.clarity);
    feedback.structure = clamp_score(feedback.structure);
    if feedback.tone.trim().is_empty() {
        feedback.tone = neutral_tone();
    }
    Some(feedback)
}

fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, MAX_SCORE)
    } else {
        0.0
    }
}

/// Upper-cases the first letter after every non-letter and lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut after_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if after_letter {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            titled.push(c);
            after_letter = false;
        }
    }

    titled
}
