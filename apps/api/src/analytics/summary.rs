use serde::Deserialize;
use tracing::warn;

use crate::analytics::insights::Insights;
use crate::analytics::prompts::{SUMMARY_JSON_SUFFIX, SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM};
use crate::conversation::builder::PromptBuilder;
use crate::llm_client::LlmClient;

#[derive(Debug, Deserialize)]
struct InsightSummary {
    summary: String,
}

/// AI-written coaching summary of `insights`.
///
/// Tries a JSON reply first, then plain text. `None` when the model is not
/// configured or both attempts fail.
pub async fn ai_summary(llm: &LlmClient, insights: &Insights) -> Option<String> {
    if !llm.is_configured() {
        return None;
    }

    let prompt = build_summary_prompt(insights);

    let structured: Option<InsightSummary> = llm
        .complete_structured(&format!("{prompt}{SUMMARY_JSON_SUFFIX}"))
        .await;
    if let Some(reply) = structured.filter(|r| !r.summary.trim().is_empty()) {
        return Some(reply.summary);
    }

    let request = PromptBuilder::default().build(SUMMARY_SYSTEM, &[], &prompt);
    match llm.complete(&request).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Analytics summary unavailable: {e}");
            None
        }
    }
}

fn build_summary_prompt(insights: &Insights) -> String {
    let tones = if insights.interview.tones.is_empty() {
        "none recorded".to_string()
    } else {
        insights
            .interview
            .tones
            .iter()
            .map(|(tone, count)| format!("{tone}: {count}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    SUMMARY_PROMPT_TEMPLATE
        .replace("{avg_score}", &insights.quiz.avg_score_pct.to_string())
        .replace("{attempts}", &insights.quiz.total_attempts.to_string())
        .replace("{clarity}", &insights.interview.avg_clarity.to_string())
        .replace("{structure}", &insights.interview.avg_structure.to_string())
        .replace("{tones}", &tones)
}
